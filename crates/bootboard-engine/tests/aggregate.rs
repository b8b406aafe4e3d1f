use std::collections::BTreeSet;
use std::time::Duration;

use bootboard_engine::{
    Aggregator, AllSettled, BOOT_ENDPOINT, Column, CompletionMode, NO_BOOTS_MESSAGE, RenderedRow,
    RunState, RunWarning, Table, TableSink, TableStatus, boots_query,
};
use bootboard_testing::MemoryFetcher;
use bootboard_testing::fixtures::{boot_id, boot_records};
use bootboard_types::{DateRange, FetchError, QuerySpec};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn spec(limit: u64) -> QuerySpec {
    boots_query(DateRange::Max, limit).unwrap()
}

fn ids(table: &Table) -> BTreeSet<String> {
    table.rows().iter().map(|r| r.id.to_string()).collect()
}

/// Sink that records the order of calls it receives.
#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
}

impl TableSink for RecordingSink {
    fn initialize(&mut self, _columns: Vec<Column>, rows: Vec<RenderedRow>) {
        self.events.push(format!("initialize:{}", rows.len()));
    }

    fn append(&mut self, rows: Vec<RenderedRow>) {
        self.events.push(format!("append:{}", rows.len()));
    }

    fn set_loading(&mut self, loading: bool) {
        self.events.push(format!("loading:{}", loading));
    }

    fn show_empty(&mut self, message: &str) {
        self.events.push(format!("empty:{}", message));
    }

    fn show_error(&mut self, error: &FetchError) {
        self.events.push(format!("error:{:?}", error.status()));
    }

    fn warn(&mut self, warning: RunWarning) {
        self.events.push(format!("warn:{}", warning.skip));
    }
}

#[tokio::test(start_paused = true)]
async fn test_partial_first_page_loads_everything() {
    let fetcher = MemoryFetcher::new().with_dataset(BOOT_ENDPOINT, boot_records(230));
    let mut aggregator = Aggregator::boots(&fetcher);
    let mut table = Table::new();

    let report = aggregator.run(spec(100), &mut table).await;

    assert_eq!(report.state, RunState::Complete);
    assert_eq!(aggregator.state(), RunState::Complete);
    assert_eq!(report.count, 230);
    assert_eq!(report.requested, vec![100, 200]);
    assert_eq!(fetcher.requested_skips(), vec![0, 100, 200]);
    assert_eq!(table.len(), 230);
    assert!(!table.is_loading());
    assert_eq!(table.status(), &TableStatus::Ready);
    assert!(report.warnings.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_every_request_shares_the_query_but_skip() {
    let fetcher = MemoryFetcher::new().with_dataset(BOOT_ENDPOINT, boot_records(230));
    let mut table = Table::new();
    Aggregator::boots(&fetcher).run(spec(100), &mut table).await;

    let requests = fetcher.requests();
    let strip_skip = |pairs: &[(&'static str, String)]| -> Vec<(&'static str, String)> {
        pairs.iter().filter(|(k, _)| *k != "skip").cloned().collect()
    };
    let first = strip_skip(&requests[0].pairs);
    for request in &requests {
        assert_eq!(request.endpoint, BOOT_ENDPOINT);
        assert_eq!(request.limit, 100);
        assert_eq!(strip_skip(&request.pairs), first);
    }
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime")
}

fn expected_skips(count: usize, limit: u64) -> Vec<u64> {
    let mut skips = vec![0];
    if count as u64 > limit {
        skips.extend((1..=count as u64 / limit).map(|i| i * limit));
    }
    skips
}

#[tokio::test(start_paused = true)]
async fn test_exact_multiple_requests_one_empty_tail_page() {
    let fetcher = MemoryFetcher::new().with_dataset(BOOT_ENDPOINT, boot_records(200));
    let mut table = Table::new();
    let report = Aggregator::boots(&fetcher).run(spec(100), &mut table).await;

    assert_eq!(fetcher.requested_skips(), vec![0, 100, 200]);
    assert_eq!(table.len(), 200);
    assert_eq!(report.state, RunState::Complete);
}

proptest! {
    #![proptest_config(Config::with_cases(64))]
    #[test]
    fn request_count_follows_floor_of_count_over_limit(
        count in 1_usize..600,
        limit in 5_u64..150
    ) {
        let fetcher = MemoryFetcher::new().with_dataset(BOOT_ENDPOINT, boot_records(count));
        let mut table = Table::new();
        let report = paused_runtime()
            .block_on(Aggregator::boots(&fetcher).run(spec(limit), &mut table));

        prop_assert_eq!(fetcher.requested_skips(), expected_skips(count, limit));
        prop_assert_eq!(table.len(), count);
        prop_assert_eq!(report.state, RunState::Complete);
    }

    #[test]
    fn final_rows_independent_of_arrival_order(
        delays in proptest::collection::vec(0_u64..100, 5)
    ) {
        let expected: BTreeSet<String> = (0..530).map(boot_id).collect();
        let mut fetcher = MemoryFetcher::new().with_dataset(BOOT_ENDPOINT, boot_records(530));
        for (i, ms) in delays.iter().enumerate() {
            fetcher = fetcher.delay(100 * (i as u64 + 1), Duration::from_millis(*ms));
        }

        let mut table = Table::new();
        let report = paused_runtime().block_on(
            Aggregator::boots(&fetcher)
                .with_policy(AllSettled::default())
                .run(spec(100), &mut table),
        );

        prop_assert_eq!(ids(&table), expected);
        prop_assert_eq!(report.state, RunState::Complete);
    }
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_set() {
    let fetcher = MemoryFetcher::new().with_dataset(BOOT_ENDPOINT, Vec::new());
    let mut sink = RecordingSink::default();

    let report = Aggregator::boots(&fetcher).run(spec(100), &mut sink).await;

    assert_eq!(report.state, RunState::EmptyResult);
    assert_eq!(fetcher.requested_skips(), vec![0]);
    assert_eq!(sink.events, vec![format!("empty:{}", NO_BOOTS_MESSAGE)]);
}

#[tokio::test(start_paused = true)]
async fn test_first_page_failure_stops_the_run() {
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(230))
        .fail_page(0, FetchError::transport(Some(404), "Not Found"));
    let mut table = Table::new();

    let report = Aggregator::boots(&fetcher).run(spec(100), &mut table).await;

    assert_eq!(report.state, RunState::Error);
    assert_eq!(report.error.as_ref().and_then(|e| e.status()), Some(404));
    assert_eq!(fetcher.requested_skips(), vec![0]);
    assert_eq!(
        table.status(),
        &TableStatus::Error {
            message: "Error loading data.".to_string(),
            status: Some(404),
        }
    );
    assert!(table.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_sink_call_sequence() {
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(230))
        .delay(100, Duration::from_millis(20))
        .delay(200, Duration::from_millis(10));
    let mut sink = RecordingSink::default();

    Aggregator::boots(&fetcher).run(spec(100), &mut sink).await;

    assert_eq!(
        sink.events,
        vec![
            "initialize:100",
            "loading:true",
            "append:30",
            "loading:false",
            "append:100",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_tail_heuristic_clears_before_stragglers() {
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(230))
        .delay(100, Duration::from_millis(50))
        .delay(200, Duration::from_millis(10));
    let mut table = Table::new();

    let report = Aggregator::boots(&fetcher).run(spec(100), &mut table).await;

    assert_eq!(report.outstanding_at_completion, Some(1));
    assert_eq!(report.state, RunState::Complete);
    assert_eq!(table.len(), 230);
}

#[tokio::test(start_paused = true)]
async fn test_all_settled_waits_for_stragglers() {
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(230))
        .delay(100, Duration::from_millis(50))
        .delay(200, Duration::from_millis(10));
    let mut table = Table::new();

    let report = Aggregator::boots(&fetcher)
        .with_policy(CompletionMode::Settled.policy())
        .run(spec(100), &mut table)
        .await;

    assert_eq!(report.outstanding_at_completion, Some(0));
    assert_eq!(report.state, RunState::Complete);
}

#[tokio::test(start_paused = true)]
async fn test_secondary_failure_is_a_warning() {
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(230))
        .fail_page(100, FetchError::transport(Some(500), "Internal Server Error"));
    let mut table = Table::new();

    let report = Aggregator::boots(&fetcher).run(spec(100), &mut table).await;

    assert_eq!(report.state, RunState::Complete);
    assert_eq!(table.len(), 130);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].skip, 100);
    assert_eq!(report.warnings[0].status, Some(500));
    assert_eq!(table.warnings(), report.warnings.as_slice());
}

#[tokio::test(start_paused = true)]
async fn test_failed_tail_page_stalls_tail_policy() {
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(230))
        .fail_page(200, FetchError::transport(None, "connection reset"));
    let mut table = Table::new();

    let report = Aggregator::boots(&fetcher).run(spec(100), &mut table).await;

    assert_eq!(report.state, RunState::Stalled);
    assert_eq!(report.outstanding_at_completion, None);
    assert!(table.is_loading());
    assert_eq!(table.len(), 200);
}

#[tokio::test(start_paused = true)]
async fn test_failed_tail_page_settles_all_settled_policy() {
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(230))
        .fail_page(200, FetchError::transport(None, "connection reset"));
    let mut table = Table::new();

    let report = Aggregator::boots(&fetcher)
        .with_policy(AllSettled::default())
        .run(spec(100), &mut table)
        .await;

    assert_eq!(report.state, RunState::Complete);
    assert!(!table.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_pages_are_deduplicated() {
    let mut records = boot_records(230);
    records[150] = records[10].clone();
    let fetcher = MemoryFetcher::new().with_dataset(BOOT_ENDPOINT, records);
    let mut table = Table::new();

    Aggregator::boots(&fetcher).run(spec(100), &mut table).await;

    assert_eq!(table.len(), 229);
}

#[tokio::test(start_paused = true)]
async fn test_short_partial_page_completes_without_more_requests() {
    // Server claims more records than it returned, but fewer than one page.
    let fetcher = MemoryFetcher::new()
        .with_dataset(BOOT_ENDPOINT, boot_records(40))
        .with_count(60);
    let mut sink = RecordingSink::default();

    let report = Aggregator::boots(&fetcher).run(spec(100), &mut sink).await;

    assert_eq!(report.state, RunState::Complete);
    assert!(report.requested.is_empty());
    assert_eq!(sink.events, vec!["initialize:40"]);
}
