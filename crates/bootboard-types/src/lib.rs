pub mod error;
pub mod page;
pub mod query;
pub mod record;
pub mod status;

pub use error::{Error, FetchError, Result};
pub use page::ResultPage;
pub use query::{DateRange, PageRequest, QuerySpec, SortOrder};
pub use record::{Metadata, Record, RecordId, Timestamp};
pub use status::Status;
