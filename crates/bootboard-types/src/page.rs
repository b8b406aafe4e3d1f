use serde::{Deserialize, Serialize};

use crate::record::Record;

/// One bounded response of a results endpoint.
///
/// `count` is the total number of matching records on the server and stays
/// the same for every page of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub count: u64,
    pub skip: u64,
    pub limit: u64,
    pub result: Vec<Record>,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// True when this page covers the last record of the result set.
    pub fn reaches_tail(&self) -> bool {
        self.skip.saturating_add(self.limit) >= self.count
    }

    /// True when the first page alone does not hold every record.
    pub fn is_partial(&self) -> bool {
        (self.result.len() as u64) < self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: u64, skip: u64, limit: u64) -> ResultPage {
        ResultPage {
            count,
            skip,
            limit,
            result: Vec::new(),
        }
    }

    #[test]
    fn test_reaches_tail() {
        assert!(!page(230, 0, 100).reaches_tail());
        assert!(!page(230, 100, 100).reaches_tail());
        assert!(page(230, 200, 100).reaches_tail());
        assert!(page(200, 100, 100).reaches_tail());
        assert!(page(0, 0, 100).reaches_tail());
    }

    #[test]
    fn test_is_partial() {
        assert!(page(10, 0, 100).is_partial());
        assert!(!page(0, 0, 100).is_partial());
    }
}
