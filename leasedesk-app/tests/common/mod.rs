/// Common test utilities for integration tests
///
/// Starts an in-memory tenant backend on an ephemeral port. Records are
/// stored as raw JSON so tests can seed shapes the client must tolerate
/// (numeric ids, missing payment status) and inspect exactly what the
/// client sent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use leasedesk_app::api::HttpTenantApi;
use leasedesk_app::config::ApiConfig;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Shared backend state
#[derive(Default)]
pub struct BackendState {
    pub records: Mutex<Vec<Value>>,
    pub failing: AtomicBool,
}

impl BackendState {
    pub fn records(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }

    pub fn seed(&self, record: Value) {
        self.records.lock().unwrap().push(record);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), Response> {
        if self.failing.load(Ordering::SeqCst) {
            Err((StatusCode::INTERNAL_SERVER_ERROR, "backend unavailable").into_response())
        } else {
            Ok(())
        }
    }
}

/// Test context: a running backend and a client pointed at it
pub struct TestContext {
    pub base_url: String,
    pub backend: Arc<BackendState>,
    pub api: HttpTenantApi,
}

impl TestContext {
    /// Starts a fresh backend
    pub async fn new() -> anyhow::Result<Self> {
        let backend = Arc::new(BackendState::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let app = build_router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let api = HttpTenantApi::new(&ApiConfig {
            base_url: base_url.clone(),
            request_timeout: None,
        })?;

        Ok(TestContext {
            base_url,
            backend,
            api,
        })
    }
}

fn build_router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/tenants", get(list_tenants).post(create_tenant))
        .route("/tenants/:id", delete(delete_tenant))
        .with_state(state)
}

async fn list_tenants(State(state): State<Arc<BackendState>>) -> Response {
    if let Err(response) = state.check() {
        return response;
    }
    Json(state.records()).into_response()
}

async fn create_tenant(
    State(state): State<Arc<BackendState>>,
    Json(mut record): Json<Value>,
) -> Response {
    if let Err(response) = state.check() {
        return response;
    }
    record["id"] = Value::String(Uuid::new_v4().to_string());
    state.seed(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn delete_tenant(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = state.check() {
        return response;
    }

    let mut records = state.records.lock().unwrap();
    let before = records.len();
    records.retain(|record| record_id(record).as_deref() != Some(id.as_str()));
    if records.len() == before {
        (StatusCode::NOT_FOUND, "tenant not found").into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

fn record_id(record: &Value) -> Option<String> {
    match &record["id"] {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
