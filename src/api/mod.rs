use axum::{
    Router,
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::store::ProfileStore;
use crate::tools::{self, TOOL_NAMES, ToolRequest};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse {
    tools: Vec<&'static str>,
}

/// Mirrors the profile store's load contract: absence is a normal not-found
/// outcome, malformed content surfaces as an error string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<crate::core::UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn run_http_server(port: u16, store: ProfileStore) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(store);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("nestegg tool API listening on http://{addr}");
    println!("nestegg tool API listening on http://{addr}");

    axum::serve(listener, app).await
}

fn router(store: ProfileStore) -> Router {
    Router::new()
        .route("/api/invoke", post(invoke_handler))
        .route("/api/tools", get(catalog_handler))
        .route("/api/profile", get(profile_handler))
        .fallback(not_found_handler)
        .with_state(Arc::new(store))
}

async fn invoke_handler(
    State(store): State<Arc<ProfileStore>>,
    Json(request): Json<ToolRequest>,
) -> Response {
    let reply = tools::invoke(&store, request);
    json_response(StatusCode::OK, reply)
}

async fn catalog_handler() -> Response {
    json_response(
        StatusCode::OK,
        CatalogResponse {
            tools: TOOL_NAMES.to_vec(),
        },
    )
}

async fn profile_handler(State(store): State<Arc<ProfileStore>>) -> Response {
    let response = match store.load() {
        Ok(Some(profile)) => ProfileResponse {
            found: true,
            profile: Some(profile),
            error: None,
        },
        Ok(None) => ProfileResponse {
            found: false,
            profile: None,
            error: None,
        },
        Err(err) => ProfileResponse {
            found: false,
            profile: None,
            error: Some(err.to_string()),
        },
    };
    json_response(StatusCode::OK, response)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (Arc<ProfileStore>, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(temp.path().to_path_buf());
        (Arc::new(store), temp)
    }

    #[test]
    fn catalog_lists_every_operation() {
        assert_eq!(TOOL_NAMES.len(), 21);
        assert!(TOOL_NAMES.contains(&"calculate-compound-growth"));
        assert!(TOOL_NAMES.contains(&"compare-strategies"));
        assert!(TOOL_NAMES.contains(&"set-asset-allocation"));
    }

    #[tokio::test]
    async fn invoke_returns_ok_even_for_structured_failures() {
        let (store, _guard) = test_store();
        let request: ToolRequest = serde_json::from_str(
            r#"{
                "tool": "simulate-withdrawal-strategy",
                "strategy": "bucket",
                "initialPortfolio": 1000000,
                "years": 30,
                "annualReturn": 0.06
            }"#,
        )
        .expect("parse request");

        let response = invoke_handler(State(store), Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_profile_reads_as_not_found() {
        let (store, _guard) = test_store();
        let response = profile_handler(State(store)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_routes_return_404() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
