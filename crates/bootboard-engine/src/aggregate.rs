//! Aggregation Controller.
//!
//! One run = first page, then `floor(count / limit)` further pages issued
//! together and merged into the sink in whatever order they arrive.
//!
//! ```text
//! Idle -> FirstFetchInFlight -> EmptyResult | Error | PartialLoaded | Complete
//! PartialLoaded -> AdditionalFetchesInFlight -> Complete | Stalled
//! ```
//!
//! The additional requests are polled through a `FuturesUnordered` on the
//! calling task, so sink mutations are serialized without locking.
//! Dropping the run future drops every request still in flight.

use bootboard_client::PageFetcher;
use bootboard_types::{DateRange, FetchError, QuerySpec};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::completion::{CompletionPolicy, TailReached};
use crate::row::RowFormatter;
use crate::table::TableSink;

pub const BOOT_ENDPOINT: &str = "/_ajax/boot";

/// Empty-state copy of the all-boots view.
pub const NO_BOOTS_MESSAGE: &str = "No boots data available.";

/// Query of the all-boots view: newest first, `limit` records per page.
pub fn boots_query(date_range: DateRange, limit: u64) -> bootboard_types::Result<QuerySpec> {
    Ok(QuerySpec::new("created_on", limit)?.date_range(date_range))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    FirstFetchInFlight,
    /// Terminal: the query matched nothing.
    EmptyResult,
    /// Terminal: the first page failed; nothing else was requested.
    Error,
    PartialLoaded,
    AdditionalFetchesInFlight,
    /// Terminal: the completion policy cleared the loading indicator, or
    /// the first page already held everything.
    Complete,
    /// Terminal: every request settled but the completion policy never
    /// fired, so the loading indicator is still up.
    Stalled,
}

/// Non-blocking failure of a secondary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunWarning {
    pub skip: u64,
    pub status: Option<u16>,
    pub message: String,
}

impl RunWarning {
    pub fn new(skip: u64, error: &FetchError) -> Self {
        Self {
            skip,
            status: error.status(),
            message: error.to_string(),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub state: RunState,
    /// Server-side total from the first page (0 when it failed).
    pub count: u64,
    /// `skip` of every additional request, in issue order.
    pub requested: Vec<u64>,
    pub pages_received: usize,
    /// Additional requests still in flight when the indicator cleared.
    pub outstanding_at_completion: Option<u64>,
    pub warnings: Vec<RunWarning>,
    #[serde(skip)]
    pub error: Option<FetchError>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
            count: 0,
            requested: Vec::new(),
            pages_received: 0,
            outstanding_at_completion: None,
            warnings: Vec::new(),
            error: None,
        }
    }
}

pub struct Aggregator<F, P = TailReached> {
    fetcher: F,
    endpoint: String,
    formatter: RowFormatter,
    policy: P,
    empty_message: String,
    state: RunState,
}

impl<F: PageFetcher> Aggregator<F, TailReached> {
    /// All-boots aggregation with the default tail-reached policy.
    pub fn boots(fetcher: F) -> Self {
        Self {
            fetcher,
            endpoint: BOOT_ENDPOINT.to_string(),
            formatter: RowFormatter::boots(),
            policy: TailReached,
            empty_message: NO_BOOTS_MESSAGE.to_string(),
            state: RunState::Idle,
        }
    }
}

impl<F: PageFetcher, P: CompletionPolicy> Aggregator<F, P> {
    pub fn with_policy<Q: CompletionPolicy>(self, policy: Q) -> Aggregator<F, Q> {
        Aggregator {
            fetcher: self.fetcher,
            endpoint: self.endpoint,
            formatter: self.formatter,
            policy,
            empty_message: self.empty_message,
            state: self.state,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn formatter(mut self, formatter: RowFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }

    /// Execute one aggregation run for `spec`, feeding `sink`.
    ///
    /// Never fails: every outcome is delivered to the sink and summarized in
    /// the returned report.
    pub async fn run<S: TableSink>(&mut self, spec: QuerySpec, sink: &mut S) -> RunReport {
        let mut report = RunReport::new();
        sink.reset();
        self.transition(RunState::FirstFetchInFlight);

        let first = match self.fetcher.fetch(&self.endpoint, &spec.page(0)).await {
            Ok(page) => page,
            Err(error) => {
                warn!(endpoint = %self.endpoint, %error, "first page failed");
                sink.show_error(&error);
                report.error = Some(error);
                self.transition(RunState::Error);
                report.state = self.state;
                return report;
            }
        };
        report.count = first.count;
        report.pages_received = 1;

        if first.count == 0 || first.is_empty() {
            sink.show_empty(&self.empty_message);
            self.transition(RunState::EmptyResult);
            report.state = self.state;
            return report;
        }

        let partial = first.is_partial();
        sink.initialize(
            self.formatter.columns().to_vec(),
            self.formatter.format_all(&first.result),
        );
        if !partial {
            self.transition(RunState::Complete);
            report.state = self.state;
            return report;
        }

        self.transition(RunState::PartialLoaded);
        let total_requests = first.count / spec.limit;
        if total_requests == 0 {
            self.transition(RunState::Complete);
            report.state = self.state;
            return report;
        }

        sink.set_loading(true);
        self.transition(RunState::AdditionalFetchesInFlight);
        self.policy.begin(total_requests);

        let mut outstanding = total_requests;
        let mut completed = false;
        let Self {
            fetcher,
            endpoint,
            formatter,
            policy,
            ..
        } = &mut *self;
        let (fetcher, endpoint) = (&*fetcher, endpoint.as_str());

        let mut pending: FuturesUnordered<_> = (1..=total_requests)
            .map(|i| {
                let request = spec.page(spec.limit * i);
                report.requested.push(request.skip);
                async move { (request.skip, fetcher.fetch(endpoint, &request).await) }
            })
            .collect();

        while let Some((skip, outcome)) = pending.next().await {
            outstanding -= 1;
            let done = match outcome {
                Ok(page) => {
                    report.pages_received += 1;
                    debug!(skip, rows = page.result.len(), "page arrived");
                    if !page.is_empty() {
                        sink.append(formatter.format_all(&page.result));
                    }
                    policy.on_page(&page)
                }
                Err(error) => {
                    warn!(skip, %error, "additional page failed");
                    let warning = RunWarning::new(skip, &error);
                    sink.warn(warning.clone());
                    report.warnings.push(warning);
                    policy.on_failure(skip)
                }
            };

            if done && !completed {
                completed = true;
                sink.set_loading(false);
                report.outstanding_at_completion = Some(outstanding);
            }
        }
        drop(pending);

        self.transition(if completed {
            RunState::Complete
        } else {
            RunState::Stalled
        });
        report.state = self.state;
        info!(
            count = report.count,
            pages = report.pages_received,
            failed = report.warnings.len(),
            state = ?report.state,
            "aggregation run finished"
        );
        report
    }
}
