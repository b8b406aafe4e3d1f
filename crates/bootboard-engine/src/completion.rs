//! When to clear the "loading more results" indicator.

use bootboard_types::ResultPage;
use serde::{Deserialize, Serialize};

/// Decides, per settled secondary request, whether the run is complete.
pub trait CompletionPolicy {
    /// Called once before any secondary request settles.
    fn begin(&mut self, issued: u64);

    /// A secondary page arrived. Returns true when the indicator should clear.
    fn on_page(&mut self, page: &ResultPage) -> bool;

    /// A secondary request failed. Returns true when the indicator should clear.
    fn on_failure(&mut self, skip: u64) -> bool;
}

impl<P: CompletionPolicy + ?Sized> CompletionPolicy for Box<P> {
    fn begin(&mut self, issued: u64) {
        (**self).begin(issued)
    }

    fn on_page(&mut self, page: &ResultPage) -> bool {
        (**self).on_page(page)
    }

    fn on_failure(&mut self, skip: u64) -> bool {
        (**self).on_failure(skip)
    }
}

/// Completes on the first page whose `skip + limit` reaches `count`,
/// whatever its position among the requests. A fast tail page can therefore
/// clear the indicator while earlier pages are still in flight.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailReached;

impl CompletionPolicy for TailReached {
    fn begin(&mut self, _issued: u64) {}

    fn on_page(&mut self, page: &ResultPage) -> bool {
        page.reaches_tail()
    }

    fn on_failure(&mut self, _skip: u64) -> bool {
        false
    }
}

/// Completes once every issued request has either arrived or failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllSettled {
    remaining: u64,
}

impl AllSettled {
    fn settle(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

impl CompletionPolicy for AllSettled {
    fn begin(&mut self, issued: u64) {
        self.remaining = issued;
    }

    fn on_page(&mut self, _page: &ResultPage) -> bool {
        self.settle()
    }

    fn on_failure(&mut self, _skip: u64) -> bool {
        self.settle()
    }
}

/// Named policy selection for configuration files and flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMode {
    #[default]
    Tail,
    Settled,
}

impl CompletionMode {
    pub fn policy(self) -> Box<dyn CompletionPolicy> {
        match self {
            CompletionMode::Tail => Box::new(TailReached),
            CompletionMode::Settled => Box::new(AllSettled::default()),
        }
    }
}

impl std::fmt::Display for CompletionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionMode::Tail => write!(f, "tail"),
            CompletionMode::Settled => write!(f, "settled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(skip: u64) -> ResultPage {
        ResultPage {
            count: 230,
            skip,
            limit: 100,
            result: Vec::new(),
        }
    }

    #[test]
    fn test_tail_reached_fires_on_tail_page_only() {
        let mut policy = TailReached;
        policy.begin(2);
        assert!(!policy.on_page(&page(100)));
        assert!(policy.on_page(&page(200)));
        assert!(!policy.on_failure(100));
    }

    #[test]
    fn test_tail_reached_ignores_arrival_order() {
        let mut policy = TailReached;
        policy.begin(2);
        assert!(policy.on_page(&page(200)));
    }

    #[test]
    fn test_all_settled_counts_failures() {
        let mut policy = AllSettled::default();
        policy.begin(3);
        assert!(!policy.on_page(&page(200)));
        assert!(!policy.on_failure(100));
        assert!(policy.on_page(&page(300)));
    }

    #[test]
    fn test_boxed_mode_dispatch() {
        let mut policy = CompletionMode::Settled.policy();
        policy.begin(1);
        assert!(policy.on_page(&page(100)));
    }
}
