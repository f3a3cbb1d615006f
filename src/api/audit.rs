use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::api::{bad_request, error_response, ok, to_json, ApiResponse, AppState};
use crate::audit::{AuditRecord, AuditStatus, NewAuditRecord, RiskLevel, TransactionReceipt};
use crate::compliance::ComplianceResult;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub id: Option<String>,
    pub action: Option<String>,
    pub status: Option<AuditStatus>,
    pub risk_level: Option<RiskLevel>,
}

/// `GET /api/audit`: one record by `id`, otherwise the filtered listing
pub async fn get_audit_trails(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> ApiResponse {
    const CONTEXT: &str = "Internal server error";

    if let Some(id) = query.id {
        return match state.ledger.get(&id).await {
            Ok(record) => match to_json(&record, CONTEXT) {
                Ok(body) => ok(body),
                Err(response) => response,
            },
            Err(e) => error_response(&e, CONTEXT),
        };
    }

    let records = state
        .ledger
        .list_filtered(query.status, query.risk_level)
        .await;
    match to_json(&records, CONTEXT) {
        Ok(body) => ok(body),
        Err(response) => response,
    }
}

/// `POST /api/audit`: store a record and run the compliance check on it
pub async fn create_audit_trail(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResponse {
    const CONTEXT: &str = "Failed to create audit trail";

    let request: NewAuditRecord = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(e) => return bad_request(&format!("Invalid audit record: {}", e)),
    };

    let (record, receipt) = match state.ledger.create(request).await {
        Ok(created) => created,
        Err(e) => return error_response(&e, CONTEXT),
    };

    let compliance = state.scorer.score(&record);
    if !compliance.passed {
        info!(
            "Audit trail {} flagged: {}",
            record.id,
            compliance.violations.join("; ")
        );
    }

    match created_body(&record, &receipt, &compliance) {
        Ok(body) => ok(body),
        Err(response) => response,
    }
}

fn created_body(
    record: &AuditRecord,
    receipt: &TransactionReceipt,
    compliance: &ComplianceResult,
) -> Result<Value, ApiResponse> {
    const CONTEXT: &str = "Failed to create audit trail";

    Ok(json!({
        "success": true,
        "record": to_json(record, CONTEXT)?,
        "transaction": to_json(receipt, CONTEXT)?,
        "compliance": to_json(compliance, CONTEXT)?,
        "message": "Audit trail created successfully"
    }))
}

/// `PUT /api/audit?id=..&action=verify`: re-check a stored record's digest
pub async fn update_audit_trail(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> ApiResponse {
    const CONTEXT: &str = "Failed to verify audit trail";

    let id = match query.id {
        Some(id) if !id.is_empty() => id,
        _ => return bad_request("Audit trail ID required"),
    };

    match query.action.as_deref() {
        Some("verify") => match state.ledger.verify(&id).await {
            Ok(report) => ok(json!({
                "id": report.id,
                "verified": report.verified,
                "status": report.status,
                "message": report.message()
            })),
            Err(e) => error_response(&e, CONTEXT),
        },
        _ => bad_request("Invalid action"),
    }
}
