use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

/// One request received by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub access: String,
    pub method: String,
    pub params: Vec<(String, String)>,
    pub api_key: Option<String>,
    pub api_sign: Option<String>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn param_keys(&self) -> Vec<&str> {
        self.params.iter().map(|(k, _)| k.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Status(u16, String),
    Raw(String),
}

#[derive(Default)]
struct MockState {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Handle to a running mock of the exchange REST API
///
/// Serves `POST /0/{public|private}/{Method}`. Methods without a configured
/// reply answer `{"error": [], "result": {}}`. The server shuts down when
/// the handle is dropped.
pub struct MockKraken {
    pub base_url: String,
    state: Arc<MockState>,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl MockKraken {
    /// Start the mock on a random available port
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/0/{access}/{method}", post(handle))
            .with_state(state.clone());

        // Bind to random available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind mock server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = served {
                eprintln!("mock server stopped: {}", e);
            }
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Answer `method` with a successful envelope around `result`
    pub fn respond(&self, method: &str, result: Value) -> &Self {
        self.respond_envelope(method, json!({"error": [], "result": result}))
    }

    /// Answer `method` with a complete envelope
    pub fn respond_envelope(&self, method: &str, envelope: Value) -> &Self {
        self.set_reply(method, Reply::Json(envelope))
    }

    /// Answer `method` with error codes and an empty result
    pub fn respond_errors(&self, method: &str, errors: &[&str]) -> &Self {
        self.respond_envelope(method, json!({"error": errors, "result": {}}))
    }

    /// Answer `method` with a bare HTTP status
    pub fn respond_status(&self, method: &str, status: u16, body: &str) -> &Self {
        self.set_reply(method, Reply::Status(status, body.to_string()))
    }

    /// Answer `method` with a 200 response whose body is not JSON
    pub fn respond_raw(&self, method: &str, body: &str) -> &Self {
        self.set_reply(method, Reply::Raw(body.to_string()))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state.requests).len()
    }

    /// Build full HTTP URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn set_reply(&self, method: &str, reply: Reply) -> &Self {
        lock(&self.state.replies).insert(method.to_string(), reply);
        self
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    Path((access, method)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let request = RecordedRequest {
        access,
        method: method.clone(),
        params: url::form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect(),
        api_key: header_value("API-Key"),
        api_sign: header_value("API-Sign"),
    };
    lock(&state.requests).push(request);

    let reply = lock(&state.replies).get(&method).cloned();
    match reply {
        Some(Reply::Json(value)) => Json(value).into_response(),
        Some(Reply::Status(code, body)) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body).into_response()
        }
        Some(Reply::Raw(body)) => ([(header::CONTENT_TYPE, "text/html")], body).into_response(),
        None => Json(json!({"error": [], "result": {}})).into_response(),
    }
}
