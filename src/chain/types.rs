//! Chain Status Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::record::{AuditRecord, AuditStatus};
use crate::audit::verify::find_tampered_records;
use crate::chain::telemetry::ChainTelemetry;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainHealth {
    pub status: String,
    pub block_height: u64,
    pub avg_block_time: String,
    pub network_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityHealth {
    pub status: String,
    pub last_security_audit: String,
    pub active_nodes: u32,
    pub consensus_health: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIntegrityHealth {
    pub status: String,
    pub last_integrity_check: DateTime<Utc>,
    pub total_records: usize,
    pub verified_records: usize,
    pub tampered_records: usize,
}

impl DataIntegrityHealth {
    /// Summarize ledger integrity. A record that failed verification, or whose
    /// stored digest no longer matches its fields, marks the ledger compromised.
    pub fn from_records(records: &[AuditRecord]) -> Self {
        let verified_records = records
            .iter()
            .filter(|r| r.status == AuditStatus::Verified)
            .count();
        let any_failed = records.iter().any(|r| r.status == AuditStatus::Failed);
        let tampered_records = find_tampered_records(records).len();

        Self {
            status: if any_failed || tampered_records > 0 {
                "compromised"
            } else {
                "verified"
            }
            .to_string(),
            last_integrity_check: Utc::now(),
            total_records: records.len(),
            verified_records,
            tampered_records,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceHealth {
    pub status: String,
    pub avg_response_time: String,
    pub throughput: String,
    pub uptime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub blockchain: BlockchainHealth,
    pub security: SecurityHealth,
    pub data_integrity: DataIntegrityHealth,
    pub performance: PerformanceHealth,
}

impl NetworkStatus {
    pub fn collect(telemetry: &dyn ChainTelemetry, records: &[AuditRecord]) -> Self {
        Self {
            blockchain: telemetry.blockchain_health(),
            security: telemetry.security_health(),
            data_integrity: DataIntegrityHealth::from_records(records),
            performance: telemetry.performance_health(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub block_number: u64,
    pub block_hash: String,
    pub timestamp: DateTime<Utc>,
    pub transaction_count: u32,
    pub miner: String,
    pub gas_used: u64,
}
