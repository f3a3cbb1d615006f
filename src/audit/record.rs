//! Audit Record Types
//!
//! Stored audit records, the creation request accepted by the ledger and the
//! synthetic transaction receipt handed back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::audit::fingerprint;
use crate::error::AuditError;

/// Sentinel amount for records that carry no monetary value
pub const NO_AMOUNT: &str = "-";

/// Risk classification attached to an audit record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification status of an audit record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    #[default]
    Pending,
    Verified,
    Failed,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Pending => "pending",
            AuditStatus::Verified => "verified",
            AuditStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_amount() -> String {
    NO_AMOUNT.to_string()
}

/// The fields covered by a record's integrity digest.
///
/// Field order here is the serialization order, so it is part of the digest
/// contract and must not be rearranged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFields {
    pub action: String,
    pub description: String,
    #[serde(default = "default_amount")]
    pub amount: String,
    pub user: String,
    #[serde(default)]
    pub risk_level: RiskLevel,
}

impl BusinessFields {
    pub fn fingerprint(&self) -> Result<String, AuditError> {
        fingerprint::fingerprint(self)
    }
}

/// Creation request for a new audit record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditRecord {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
}

impl NewAuditRecord {
    pub fn new(action: &str, description: &str, user: &str) -> Self {
        Self {
            action: action.to_string(),
            description: description.to_string(),
            user: user.to_string(),
            ..Default::default()
        }
    }

    pub fn with_amount(mut self, amount: &str) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    /// Reject requests with an empty required text field. Whitespace counts
    /// as content, matching the integrity check on stored records.
    pub fn validate(&self) -> Result<(), AuditError> {
        let missing: Vec<&str> = [
            ("action", &self.action),
            ("description", &self.description),
            ("user", &self.user),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AuditError::missing_fields(&missing))
        }
    }

    /// Resolve defaults into the digest-covered field set
    pub fn business_fields(&self) -> BusinessFields {
        let amount = match self.amount.as_deref().map(str::trim) {
            Some(amount) if !amount.is_empty() => amount.to_string(),
            _ => default_amount(),
        };

        BusinessFields {
            action: self.action.clone(),
            description: self.description.clone(),
            amount,
            user: self.user.clone(),
            risk_level: self.risk_level.unwrap_or_default(),
        }
    }
}

/// A stored audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub transaction_id: String,
    pub action: String,
    pub description: String,
    pub amount: String,
    pub user: String,
    pub risk_level: RiskLevel,
    pub status: AuditStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_hash: Option<String>,
}

impl AuditRecord {
    pub fn business_fields(&self) -> BusinessFields {
        BusinessFields {
            action: self.action.clone(),
            description: self.description.clone(),
            amount: self.amount.clone(),
            user: self.user.clone(),
            risk_level: self.risk_level,
        }
    }

    /// Whether the record carries a monetary amount
    pub fn has_amount(&self) -> bool {
        !self.amount.is_empty() && self.amount != NO_AMOUNT
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} by {} ({}, {})",
            self.id, self.action, self.user, self.risk_level, self.status
        )
    }
}

/// Synthetic acknowledgment returned after a record is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub block_hash: String,
    pub block_number: u64,
    pub gas_used: u64,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let request = NewAuditRecord::new("Review", "", "");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("description, user"));
    }

    #[test]
    fn test_business_fields_defaults() {
        let fields = NewAuditRecord::new("Review", "Quarterly review", "Sarah").business_fields();
        assert_eq!(fields.amount, NO_AMOUNT);
        assert_eq!(fields.risk_level, RiskLevel::Low);

        let fields = NewAuditRecord::new("Review", "Quarterly review", "Sarah")
            .with_amount("   ")
            .business_fields();
        assert_eq!(fields.amount, NO_AMOUNT);
    }

    #[test]
    fn test_business_fields_serialization_order() {
        let fields = NewAuditRecord::new("Review", "Desc", "Sarah")
            .with_amount("$10")
            .with_risk_level(RiskLevel::High)
            .business_fields();
        assert_eq!(
            serde_json::to_string(&fields).unwrap(),
            r#"{"action":"Review","description":"Desc","amount":"$10","user":"Sarah","riskLevel":"high"}"#
        );
    }

    #[test]
    fn test_new_record_deserializes_camel_case() {
        let request: NewAuditRecord = serde_json::from_value(json!({
            "action": "Asset Transfer",
            "description": "Transfer of digital assets",
            "amount": "$75,000",
            "user": "David Wilson",
            "riskLevel": "medium",
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(request.risk_level, Some(RiskLevel::Medium));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_deserialize_then_fail_validation() {
        let request: NewAuditRecord = serde_json::from_value(json!({"action": "x"})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_fields_are_present() {
        let request = NewAuditRecord::new(" ", "\t", " ");
        assert!(request.validate().is_ok());
    }
}
