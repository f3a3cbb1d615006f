//! HTTP API
//!
//! JSON routes over the ledger, scorer and identity issuer. Handlers return
//! `(StatusCode, Json<Value>)` and translate `AuditError` into status codes.

pub mod audit;
pub mod blockchain;

use axum::{
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::audit::AuditLedger;
use crate::compliance::ComplianceScorer;
use crate::error::AuditError;
use crate::identity::IdentityIssuer;

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub ledger: AuditLedger,
    pub scorer: ComplianceScorer,
    pub identity: IdentityIssuer,
}

impl AppState {
    pub fn new(ledger: AuditLedger, scorer: ComplianceScorer, identity: IdentityIssuer) -> Self {
        Self {
            ledger,
            scorer,
            identity,
        }
    }
}

pub type ApiResponse = (StatusCode, Json<Value>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/audit",
            get(audit::get_audit_trails)
                .post(audit::create_audit_trail)
                .put(audit::update_audit_trail),
        )
        .route(
            "/api/blockchain",
            get(blockchain::get_blockchain_data).post(blockchain::post_blockchain_action),
        )
        .route("/api/compliance/rules", get(blockchain::get_compliance_rules))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "audit-ledger",
        "timestamp": chrono::Utc::now()
    }))
}

pub(crate) fn bad_request(message: &str) -> ApiResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

pub(crate) fn ok(body: Value) -> ApiResponse {
    (StatusCode::OK, Json(body))
}

/// Map a ledger error onto a response; `context` labels server-side failures
pub(crate) fn error_response(err: &AuditError, context: &str) -> ApiResponse {
    if !err.is_client_error() {
        error!("{}: {}", context, err);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": context })),
        );
    }

    match err {
        AuditError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Audit trail not found" })),
        ),
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "error": err.to_string() }))),
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T, context: &str) -> Result<Value, ApiResponse> {
    serde_json::to_value(value).map_err(|e| error_response(&AuditError::from(e), context))
}
