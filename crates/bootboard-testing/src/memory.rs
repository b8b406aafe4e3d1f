//! Scripted in-memory page fetcher.
//!
//! Serves a fixed dataset per endpoint with real `skip`/`limit` slicing.
//! Individual pages can be delayed (drive arrival order under
//! `tokio::time::pause`) or failed.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use bootboard_client::PageFetcher;
use bootboard_types::{FetchError, PageRequest, Record, ResultPage};

/// One request seen by a [`MemoryFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub skip: u64,
    pub limit: u64,
    pub pairs: Vec<(&'static str, String)>,
}

#[derive(Debug, Default)]
pub struct MemoryFetcher {
    datasets: HashMap<String, Vec<Record>>,
    count_override: Option<u64>,
    delays: HashMap<u64, Duration>,
    page_failures: HashMap<u64, FetchError>,
    endpoint_failures: HashMap<String, FetchError>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` from `endpoint`.
    pub fn with_dataset(mut self, endpoint: &str, records: Vec<Record>) -> Self {
        self.datasets.insert(endpoint.to_string(), records);
        self
    }

    /// Report `count` instead of the dataset length.
    pub fn with_count(mut self, count: u64) -> Self {
        self.count_override = Some(count);
        self
    }

    /// Delay the page at `skip` by `delay`.
    pub fn delay(mut self, skip: u64, delay: Duration) -> Self {
        self.delays.insert(skip, delay);
        self
    }

    /// Fail the page at `skip` on every endpoint.
    pub fn fail_page(mut self, skip: u64, error: FetchError) -> Self {
        self.page_failures.insert(skip, error);
        self
    }

    /// Fail every request to `endpoint`.
    pub fn fail_endpoint(mut self, endpoint: &str, error: FetchError) -> Self {
        self.endpoint_failures.insert(endpoint.to_string(), error);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    /// Sorted `skip` values of every request made so far.
    pub fn requested_skips(&self) -> Vec<u64> {
        let mut skips: Vec<u64> = self.requests().iter().map(|r| r.skip).collect();
        skips.sort_unstable();
        skips
    }
}

impl PageFetcher for MemoryFetcher {
    async fn fetch(
        &self,
        endpoint: &str,
        request: &PageRequest<'_>,
    ) -> Result<ResultPage, FetchError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(RecordedRequest {
                endpoint: endpoint.to_string(),
                skip: request.skip,
                limit: request.limit(),
                pairs: request.query_pairs(),
            });

        if let Some(delay) = self.delays.get(&request.skip) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(error) = self.endpoint_failures.get(endpoint) {
            return Err(error.clone());
        }
        if let Some(error) = self.page_failures.get(&request.skip) {
            return Err(error.clone());
        }

        let records = self
            .datasets
            .get(endpoint)
            .ok_or_else(|| FetchError::transport(Some(404), "Not Found"))?;
        let start = (request.skip as usize).min(records.len());
        let end = start
            .saturating_add(request.limit() as usize)
            .min(records.len());

        Ok(ResultPage {
            count: self.count_override.unwrap_or(records.len() as u64),
            skip: request.skip,
            limit: request.limit(),
            result: records[start..end].to_vec(),
        })
    }
}
