//! Audit Record Verification
//!
//! Recomputes record digests and compares them with an expected value.
//! Mismatches are a normal `false`; only structurally broken input is an
//! error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::audit::record::{AuditRecord, AuditStatus, BusinessFields};
use crate::error::AuditError;

/// Outcome of verifying a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub id: String,
    pub verified: bool,
    pub computed_hash: String,
    pub stored_hash: Option<String>,
    pub status: AuditStatus,
}

impl IntegrityReport {
    pub fn message(&self) -> &'static str {
        if self.verified {
            "Audit trail verified successfully"
        } else {
            "Audit trail integrity check failed"
        }
    }
}

fn ensure_required(fields: &BusinessFields) -> Result<(), AuditError> {
    let missing: Vec<&str> = [
        ("action", fields.action.as_str()),
        ("description", fields.description.as_str()),
        ("user", fields.user.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuditError::MalformedRecord(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Check business fields against an expected digest
pub fn verify_fields(fields: &BusinessFields, expected: &str) -> Result<bool, AuditError> {
    ensure_required(fields)?;
    let computed = fields.fingerprint()?;
    let matches = computed == expected;
    debug!("Integrity check: computed {} expected {} -> {}", computed, expected, matches);
    Ok(matches)
}

/// Check a stored record against an expected digest
pub fn verify_integrity(record: &AuditRecord, expected: &str) -> Result<bool, AuditError> {
    verify_fields(&record.business_fields(), expected)
}

/// Check an arbitrary JSON record against an expected digest.
///
/// Extra keys (id, timestamps, stored hashes) are ignored; missing
/// `action`, `description` or `user` is a malformed record.
pub fn verify_integrity_value(record: &Value, expected: &str) -> Result<bool, AuditError> {
    let fields: BusinessFields = serde_json::from_value(record.clone())
        .map_err(|e| AuditError::MalformedRecord(e.to_string()))?;
    verify_fields(&fields, expected)
}

/// Indices of records whose stored digest no longer matches their fields
pub fn find_tampered_records(records: &[AuditRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| match record.data_hash.as_deref() {
            Some(stored) => !verify_integrity(record, stored).unwrap_or(false),
            None => false,
        })
        .map(|(i, _)| i)
        .collect()
}
