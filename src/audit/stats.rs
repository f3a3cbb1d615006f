//! Ledger Statistics
//!
//! Dashboard roll-up of the records currently in the ledger.

use serde::{Deserialize, Serialize};

use crate::audit::record::{AuditRecord, AuditStatus, RiskLevel};
use crate::compliance::parse_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub total_transactions: usize,
    pub verified_transactions: usize,
    pub pending_transactions: usize,
    pub failed_transactions: usize,
    pub high_risk_transactions: usize,
    /// Sum of every parsable amount
    pub total_value: f64,
    /// Percentage of verified records, 0 for an empty ledger
    pub compliance_score: u32,
}

impl LedgerStats {
    pub fn from_records(records: &[AuditRecord]) -> Self {
        let count_status = |status: AuditStatus| records.iter().filter(|r| r.status == status).count();

        let total_transactions = records.len();
        let verified_transactions = count_status(AuditStatus::Verified);
        let total_value: f64 = records
            .iter()
            .filter(|r| r.has_amount())
            .filter_map(|r| parse_amount(&r.amount))
            .sum();

        let compliance_score = if total_transactions == 0 {
            0
        } else {
            (verified_transactions as f64 / total_transactions as f64 * 100.0).round() as u32
        };

        Self {
            total_transactions,
            verified_transactions,
            pending_transactions: count_status(AuditStatus::Pending),
            failed_transactions: count_status(AuditStatus::Failed),
            high_risk_transactions: records
                .iter()
                .filter(|r| r.risk_level == RiskLevel::High)
                .count(),
            total_value,
            compliance_score,
        }
    }
}
