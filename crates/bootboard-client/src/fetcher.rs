use std::future::Future;

use bootboard_types::{FetchError, PageRequest, ResultPage};

/// Source of result pages.
///
/// Implementations issue exactly one request per call and never retry.
pub trait PageFetcher {
    fn fetch(
        &self,
        endpoint: &str,
        request: &PageRequest<'_>,
    ) -> impl Future<Output = Result<ResultPage, FetchError>>;
}

impl<T: PageFetcher> PageFetcher for &T {
    fn fetch(
        &self,
        endpoint: &str,
        request: &PageRequest<'_>,
    ) -> impl Future<Output = Result<ResultPage, FetchError>> {
        (**self).fetch(endpoint, request)
    }
}
