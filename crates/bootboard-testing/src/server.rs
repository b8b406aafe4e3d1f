//! Stub results API served over real HTTP.
//!
//! The axum app runs on a dedicated current-thread runtime so the server
//! works from both `#[tokio::test]` and plain `#[test]` functions driving
//! the CLI binary. Dataset routes behave like the real API: `skip`/`limit`
//! slicing, a `status` filter and a double-encoded `result` string.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, mpsc};

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use bootboard_types::Record;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
enum Route {
    Dataset(Vec<Record>),
    Status(u16),
    Raw(String),
}

#[derive(Debug, Default)]
struct Routes {
    routes: HashMap<String, Route>,
    page_failures: HashMap<(String, u64), u16>,
    requests: Vec<String>,
}

type SharedRoutes = Arc<Mutex<Routes>>;

#[derive(Debug, Default, Deserialize)]
struct PageParams {
    skip: Option<u64>,
    limit: Option<u64>,
    status: Option<String>,
}

pub struct StubServer {
    addr: SocketAddr,
    routes: SharedRoutes,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    /// Bind an ephemeral local port and start serving.
    pub fn start() -> Result<Self> {
        let routes = SharedRoutes::default();
        let app = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&routes));

        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = addr_tx.send(Err(anyhow!(e).context("build stub runtime")));
                    return;
                }
            };
            runtime.block_on(async move {
                let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                    Ok(listener) => listener,
                    Err(e) => {
                        let _ = addr_tx.send(Err(anyhow!(e).context("bind stub server")));
                        return;
                    }
                };
                let _ = addr_tx.send(listener.local_addr().context("stub server address"));
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        });

        let addr = addr_rx
            .recv()
            .context("stub server thread exited before binding")??;

        Ok(Self {
            addr,
            routes,
            shutdown: Some(shutdown_tx),
        })
    }

    /// Serve `records` as a paginated dataset at `path`.
    pub fn with_dataset(self, path: &str, records: Vec<Record>) -> Self {
        self.route(path, Route::Dataset(records))
    }

    /// Answer every request to `path` with `status`.
    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.route(path, Route::Status(status))
    }

    /// Answer every request to `path` with a 200 and `body` verbatim.
    pub fn with_raw(self, path: &str, body: impl Into<String>) -> Self {
        self.route(path, Route::Raw(body.into()))
    }

    /// Answer the page at `skip` of `path` with `status`.
    pub fn fail_page(self, path: &str, skip: u64, status: u16) -> Self {
        self.lock()
            .page_failures
            .insert((path.to_string(), skip), status);
        self
    }

    fn route(self, path: &str, route: Route) -> Self {
        self.lock().routes.insert(path.to_string(), route);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Routes> {
        self.routes.lock().expect("stub server state poisoned")
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request targets (`path?query`) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// Requests whose path is `path`.
    pub fn requests_to(&self, path: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|target| target.split('?').next() == Some(path))
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn respond(
    State(routes): State<SharedRoutes>,
    uri: Uri,
    Query(params): Query<PageParams>,
) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let (status, body) = page_response(&routes, uri.path(), &target, &params);

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn page_response(
    routes: &Mutex<Routes>,
    path: &str,
    target: &str,
    params: &PageParams,
) -> (u16, String) {
    let skip = params.skip.unwrap_or(0);

    let mut routes = routes.lock().expect("stub server state poisoned");
    routes.requests.push(target.to_string());

    if let Some(status) = routes.page_failures.get(&(path.to_string(), skip)) {
        return (*status, error_body(*status));
    }

    match routes.routes.get(path) {
        None => (404, error_body(404)),
        Some(Route::Status(status)) => (*status, error_body(*status)),
        Some(Route::Raw(body)) => (200, body.clone()),
        Some(Route::Dataset(records)) => {
            let wanted = params.status.as_deref();
            let matching: Vec<&Record> = records
                .iter()
                .filter(|r| wanted.is_none() || r.status.as_deref() == wanted)
                .collect();

            let limit = params.limit.unwrap_or(matching.len() as u64);
            let start = (skip as usize).min(matching.len());
            let end = start.saturating_add(limit as usize).min(matching.len());
            let result = serde_json::to_string(&matching[start..end]).unwrap_or_default();

            let body = json!({
                "code": 200,
                "count": matching.len(),
                "skip": skip,
                "limit": limit,
                "result": result,
            });
            (200, body.to_string())
        }
    }
}

fn error_body(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    json!({ "code": status, "reason": reason }).to_string()
}
