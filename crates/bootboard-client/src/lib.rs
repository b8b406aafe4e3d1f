//! Result Page Fetcher.
//!
//! One bounded GET per call, no retries. The rest of the pipeline only sees
//! typed [`ResultPage`] values; the wire quirks (double-encoded `result`,
//! missing paging fields) stay inside [`decode`].

pub mod decode;
pub mod fetcher;
pub mod http;

pub use decode::decode_page;
pub use fetcher::PageFetcher;
pub use http::HttpFetcher;

pub use bootboard_types::{FetchError, PageRequest, ResultPage};
