use std::time::Duration;

use bootboard_types::{FetchError, PageRequest, ResultPage};
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::decode::decode_page;
use crate::fetcher::PageFetcher;

/// HTTP fetcher against a results API base URL
/// (e.g. `https://api.kernelci.org`).
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport(None, format!("HTTP client setup: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        endpoint: &str,
        request: &PageRequest<'_>,
    ) -> Result<ResultPage, FetchError> {
        let url = self.url(endpoint);
        debug!(url = %url, skip = request.skip, limit = request.limit(), "requesting page");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| FetchError::transport(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::transport(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("request failed"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(Some(status.as_u16()), e.to_string()))?;

        decode_page(&body, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_slashes() {
        let fetcher = HttpFetcher::new("http://localhost:8888/", Duration::from_secs(1)).unwrap();
        assert_eq!(fetcher.url("/_ajax/boot"), "http://localhost:8888/_ajax/boot");
        assert_eq!(fetcher.url("_ajax/job"), "http://localhost:8888/_ajax/job");
    }
}
