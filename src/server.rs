//! HTTP surface for the query pipeline.
//!
//! ## Endpoints
//!
//! - `POST /query` — body `{"query": "..."}`, response `{"answer": "..."}`
//! - `GET /health` — liveness probe

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{Result, WebqaError};
use crate::pipeline::QueryPipeline;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text question.
    #[serde(default)]
    pub query: String,
}

/// Successful response of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The generated answer.
    pub answer: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is serving.
    pub status: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error details.
    pub error: ErrorBody,
}

/// Error details within an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,
    /// Error type (`"upstream_error"`, `"invalid_request_error"`, `"server_error"`).
    #[serde(rename = "type")]
    pub error_type: String,
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<QueryPipeline>,
}

/// Build the router without binding, for embedding or in-process tests.
pub fn router(pipeline: Arc<QueryPipeline>) -> Router {
    Router::new()
        .route("/query", post(handle_query))
        .route("/health", get(handle_health))
        .with_state(AppState { pipeline })
}

// ---------------------------------------------------------------------------
// QueryServer
// ---------------------------------------------------------------------------

/// HTTP server answering queries on a background task.
pub struct QueryServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl QueryServer {
    /// Start the server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(pipeline: Arc<QueryPipeline>, config: &ServerConfig) -> Result<Self> {
        let app = router(pipeline);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| WebqaError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| WebqaError::Server(format!("failed to get local addr: {e}")))?;

        info!("query server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("query server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for QueryServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a pipeline error to its HTTP status and error type.
fn classify(err: &WebqaError) -> (StatusCode, &'static str) {
    match err {
        WebqaError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
        WebqaError::Search(e) if e.is_upstream() => (StatusCode::BAD_GATEWAY, "upstream_error"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
    }
}

fn error_response(err: &WebqaError) -> Response {
    let (status, error_type) = classify(err);
    let body = ErrorResponse {
        error: ErrorBody {
            message: err.to_string(),
            error_type: error_type.to_owned(),
        },
    };
    (status, Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `POST /query` — run the pipeline for one question.
async fn handle_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Response {
    if request.query.trim().is_empty() {
        return error_response(&WebqaError::InvalidRequest(
            "query must not be empty".into(),
        ));
    }

    match state.pipeline.handle(&request.query).await {
        Ok(answer) => (StatusCode::OK, Json(QueryResponse { answer })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "query failed");
            error_response(&err)
        }
    }
}

/// `GET /health` — liveness probe.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use webqa_search::SearchError;

    #[test]
    fn upstream_maps_to_bad_gateway() {
        let err = WebqaError::Search(SearchError::Upstream {
            status: 500,
            message: "down".into(),
        });
        assert_eq!(classify(&err), (StatusCode::BAD_GATEWAY, "upstream_error"));

        let err = WebqaError::Search(SearchError::Http("refused".into()));
        assert_eq!(classify(&err), (StatusCode::BAD_GATEWAY, "upstream_error"));
    }

    #[test]
    fn invalid_request_maps_to_bad_request() {
        let err = WebqaError::InvalidRequest("empty".into());
        assert_eq!(
            classify(&err),
            (StatusCode::BAD_REQUEST, "invalid_request_error")
        );
    }

    #[test]
    fn other_errors_map_to_server_error() {
        let err = WebqaError::Search(SearchError::Config("bad".into()));
        assert_eq!(
            classify(&err),
            (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
        );
        let err = WebqaError::Config("bad".into());
        assert_eq!(
            classify(&err),
            (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
        );
    }

    #[test]
    fn error_body_uses_type_key() {
        let body = ErrorResponse {
            error: ErrorBody {
                message: "m".into(),
                error_type: "upstream_error".into(),
            },
        };
        let json = serde_json::to_value(body).expect("serialize");
        assert_eq!(json["error"]["type"], "upstream_error");
    }

    #[test]
    fn query_request_defaults_missing_field() {
        let request: QueryRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(request.query.is_empty());
    }
}
