//! Common test utilities and helpers for integration tests.
//!
//! This module provides a stub of the log-analytics API served over real
//! HTTP on an ephemeral port, so the dashboard can be exercised end to end.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use monitor::{Config, Dashboard, Endpoint};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// How the stub answers one endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with a JSON body.
    Json(Value),
    /// An empty response with the given status.
    Status(StatusCode),
    /// 200 with a raw, possibly malformed body.
    Raw(&'static str),
    /// Never answers.
    Hang,
}

#[derive(Clone, Default)]
struct StubState {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

/// A running analytics API stub.
#[derive(Clone)]
pub struct StubApi {
    addr: SocketAddr,
    state: StubState,
}

impl StubApi {
    /// Starts the stub. Every endpoint answers `[]` until told otherwise.
    pub async fn spawn() -> Self {
        let state = StubState::default();

        let app = Router::new()
            .route(Endpoint::LogsOverTime.path(), get(handle))
            .route(Endpoint::LogLevels.path(), get(handle))
            .route(Endpoint::TopHosts.path(), get(handle))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Base URL of the stub.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Sets the reply for an endpoint.
    pub fn reply(&self, endpoint: Endpoint, reply: Reply) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(endpoint.path().to_string(), reply);
    }

    /// Number of requests received for an endpoint.
    pub fn hits(&self, endpoint: Endpoint) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(endpoint.path())
            .copied()
            .unwrap_or(0)
    }

    /// Loads the healthy three-endpoint scenario.
    pub fn healthy(&self) {
        self.reply(
            Endpoint::LogsOverTime,
            Reply::Json(json!([
                {"ts": "2024-01-15T10:30:00.000Z", "count": 5},
                {"ts": "2024-01-15T10:31:00.000Z", "count": 3}
            ])),
        );
        self.reply(
            Endpoint::LogLevels,
            Reply::Json(json!([
                {"level": "ERROR", "count": 2},
                {"level": "INFO", "count": 6}
            ])),
        );
        self.reply(
            Endpoint::TopHosts,
            Reply::Json(json!([
                {"host": "a", "count": 4},
                {"host": "b", "count": 4}
            ])),
        );
    }

    /// Creates a dashboard pointed at this stub.
    pub fn dashboard(&self) -> Dashboard {
        let config = Config::new(self.base_url(), 30).unwrap();
        Dashboard::new(&config)
    }

    /// Creates a dashboard pointed at this stub with a custom cadence.
    pub fn dashboard_every(&self, period: Duration) -> Dashboard {
        self.dashboard().with_refresh_interval(period)
    }
}

async fn handle(State(state): State<StubState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    *state.hits.lock().unwrap().entry(path.clone()).or_default() += 1;

    let reply = state
        .replies
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Reply::Json(json!([])));

    match reply {
        Reply::Json(body) => Json(body).into_response(),
        Reply::Status(status) => status.into_response(),
        Reply::Raw(body) => (StatusCode::OK, body).into_response(),
        Reply::Hang => std::future::pending().await,
    }
}

/// Polls `condition` every 10ms until it holds or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
