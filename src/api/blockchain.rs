use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::api::{bad_request, error_response, ok, to_json, ApiResponse, AppState};
use crate::audit::{verify_integrity_value, LedgerStats};
use crate::chain::NetworkStatus;
use crate::compliance::ComplianceRequest;
use crate::identity::UserCredential;

/// Blocks returned by `?action=recent-blocks`
pub const RECENT_BLOCK_COUNT: usize = 5;

const CONTEXT: &str = "Internal server error";

#[derive(Debug, Deserialize)]
pub struct BlockchainQuery {
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlockchainRequest {
    pub action: String,
    #[serde(default)]
    pub data: Option<Value>,
}

fn respond<T: serde::Serialize>(value: &T) -> ApiResponse {
    match to_json(value, CONTEXT) {
        Ok(body) => ok(body),
        Err(response) => response,
    }
}

/// `GET /api/blockchain?action=stats|network-status|recent-blocks`
pub async fn get_blockchain_data(
    State(state): State<AppState>,
    Query(query): Query<BlockchainQuery>,
) -> ApiResponse {
    match query.action.as_deref() {
        Some("stats") => {
            let records = state.ledger.list().await;
            respond(&LedgerStats::from_records(&records))
        }
        Some("network-status") => {
            let records = state.ledger.list().await;
            respond(&NetworkStatus::collect(state.ledger.telemetry(), &records))
        }
        Some("recent-blocks") => {
            respond(&state.ledger.telemetry().recent_blocks(RECENT_BLOCK_COUNT))
        }
        other => {
            debug!("Unknown blockchain query action: {:?}", other);
            bad_request("Invalid action")
        }
    }
}

/// `POST /api/blockchain` with `{action, data}`
pub async fn post_blockchain_action(
    State(state): State<AppState>,
    Json(request): Json<BlockchainRequest>,
) -> ApiResponse {
    match request.action.as_str() {
        "compliance-check" => compliance_check(&state, request.data),
        "generate-did" => generate_did(&state, request.data),
        "verify-integrity" => verify_integrity(request.data),
        other => {
            warn!("Unhandled blockchain action: {}", other);
            bad_request("Invalid action")
        }
    }
}

fn compliance_check(state: &AppState, data: Option<Value>) -> ApiResponse {
    let data = match data {
        Some(data) if !data.is_null() => data,
        _ => return bad_request("Data required for compliance check"),
    };

    match serde_json::from_value::<ComplianceRequest>(data) {
        Ok(subject) => respond(&state.scorer.score(&subject)),
        Err(_) => bad_request("Invalid compliance check data"),
    }
}

fn generate_did(state: &AppState, data: Option<Value>) -> ApiResponse {
    let user = data
        .and_then(|data| serde_json::from_value::<UserCredential>(data).ok())
        .filter(|user| user.address.as_deref().is_some_and(|a| !a.is_empty()));
    let user = match user {
        Some(user) => user,
        None => return bad_request("Address required for DID generation"),
    };

    let did = state.identity.generate_did(user.address.as_deref().unwrap_or_default());
    let credential = match state.identity.create_verifiable_credential(&user) {
        Ok(credential) => credential,
        Err(e) => return error_response(&e, CONTEXT),
    };

    match to_json(&credential, CONTEXT) {
        Ok(credential) => ok(json!({
            "did": did,
            "credential": credential,
            "message": "DID and credential generated successfully"
        })),
        Err(response) => response,
    }
}

fn verify_integrity(data: Option<Value>) -> ApiResponse {
    let data = data.unwrap_or(Value::Null);
    let (audit_data, hash) = match (data.get("auditData"), data.get("hash").and_then(Value::as_str)) {
        (Some(audit_data), Some(hash)) if !audit_data.is_null() => (audit_data, hash),
        _ => return bad_request("Audit data and hash required"),
    };

    match verify_integrity_value(audit_data, hash) {
        Ok(valid) => ok(json!({
            "valid": valid,
            "message": if valid {
                "Data integrity verified"
            } else {
                "Data integrity check failed"
            }
        })),
        Err(e) => error_response(&e, CONTEXT),
    }
}

/// `GET /api/compliance/rules`: the rule set the scorer runs
pub async fn get_compliance_rules(State(state): State<AppState>) -> ApiResponse {
    respond(state.scorer.rules())
}
