//! Audit Ledger
//!
//! In-memory store of audit records keyed by generated identifier. The ledger
//! handle is cheap to clone; all clones share one store. Identifier
//! assignment and insertion happen under a single lock acquisition, so
//! concurrent `create` calls never hand out the same identifier.

use chrono::{Datelike, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::audit::record::{
    AuditRecord, AuditStatus, NewAuditRecord, RiskLevel, TransactionReceipt,
};
use crate::audit::verify::{verify_integrity, IntegrityReport};
use crate::chain::{ChainTelemetry, MockTelemetry};
use crate::error::AuditError;

/// Receipt status reported for every stored record
pub const RECEIPT_SUCCESS: &str = "success";

/// Tunables for ledger behaviour
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Delay applied to every `create`, modelling a round trip to the chain
    pub simulated_latency: Duration,
    /// Year embedded in identifiers; the current UTC year when unset
    pub id_year: Option<i32>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(2000),
            id_year: None,
        }
    }
}

impl LedgerConfig {
    /// No latency, fixed year: what tests want
    pub fn immediate(id_year: i32) -> Self {
        Self {
            simulated_latency: Duration::ZERO,
            id_year: Some(id_year),
        }
    }
}

#[derive(Default)]
struct LedgerState {
    records: Vec<AuditRecord>,
    index: HashMap<String, usize>,
    counter: u64,
}

/// Shared handle to the audit ledger
#[derive(Clone)]
pub struct AuditLedger {
    state: Arc<Mutex<LedgerState>>,
    telemetry: Arc<dyn ChainTelemetry>,
    config: LedgerConfig,
}

impl AuditLedger {
    /// Create an empty ledger backed by random placeholder telemetry
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_telemetry(config, Arc::new(MockTelemetry::new()))
    }

    pub fn with_telemetry(config: LedgerConfig, telemetry: Arc<dyn ChainTelemetry>) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState::default())),
            telemetry,
            config,
        }
    }

    pub fn telemetry(&self) -> &dyn ChainTelemetry {
        self.telemetry.as_ref()
    }

    /// Validate, fingerprint and store a new audit record.
    ///
    /// Suspends for the configured simulated latency before touching the
    /// store. On validation failure nothing is stored and no identifier is
    /// consumed.
    pub async fn create(
        &self,
        request: NewAuditRecord,
    ) -> Result<(AuditRecord, TransactionReceipt), AuditError> {
        if let Err(e) = request.validate() {
            warn!("Rejected audit record: {}", e);
            return Err(e);
        }

        let fields = request.business_fields();
        let data_hash = fields.fingerprint()?;

        if !self.config.simulated_latency.is_zero() {
            tokio::time::sleep(self.config.simulated_latency).await;
        }

        let transaction_id = self.telemetry.transaction_id();
        let block_hash = self.telemetry.block_hash();

        let record = {
            let mut state = self.state.lock().await;
            state.counter += 1;

            let now = Utc::now();
            let year = self.config.id_year.unwrap_or_else(|| now.year());
            let record = AuditRecord {
                id: format!("AT-{}-{:03}", year, state.counter),
                transaction_id: transaction_id.clone(),
                action: fields.action,
                description: fields.description,
                amount: fields.amount,
                user: fields.user,
                risk_level: fields.risk_level,
                status: AuditStatus::Verified,
                timestamp: now,
                block_hash: Some(block_hash.clone()),
                data_hash: Some(data_hash),
            };

            let position = state.records.len();
            state.index.insert(record.id.clone(), position);
            state.records.push(record.clone());
            record
        };

        let receipt = TransactionReceipt {
            transaction_hash: transaction_id,
            block_hash,
            block_number: self.telemetry.block_number(),
            gas_used: self.telemetry.gas_used(),
            status: RECEIPT_SUCCESS.to_string(),
            timestamp: Utc::now(),
        };

        info!("Created audit trail {}", record.summary());
        Ok((record, receipt))
    }

    /// Look up a record by identifier
    pub async fn get(&self, id: &str) -> Result<AuditRecord, AuditError> {
        let state = self.state.lock().await;
        state
            .index
            .get(id)
            .map(|&position| state.records[position].clone())
            .ok_or_else(|| AuditError::not_found(id))
    }

    /// All records, most recent first.
    ///
    /// Records sharing a timestamp come back newest-inserted first.
    pub async fn list(&self) -> Vec<AuditRecord> {
        let mut records: Vec<AuditRecord> = {
            let state = self.state.lock().await;
            state.records.iter().rev().cloned().collect()
        };
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Records matching the given status and risk level, most recent first
    pub async fn list_filtered(
        &self,
        status: Option<AuditStatus>,
        risk_level: Option<RiskLevel>,
    ) -> Vec<AuditRecord> {
        self.list()
            .await
            .into_iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .filter(|r| risk_level.map_or(true, |l| r.risk_level == l))
            .collect()
    }

    /// Recompute a stored record's digest and move it to verified or failed
    pub async fn verify(&self, id: &str) -> Result<IntegrityReport, AuditError> {
        let mut state = self.state.lock().await;
        let position = *state.index.get(id).ok_or_else(|| AuditError::not_found(id))?;
        let record = &mut state.records[position];

        let computed_hash = record.business_fields().fingerprint()?;
        let verified = match record.data_hash.as_deref() {
            Some(stored) => verify_integrity(record, stored)?,
            None => false,
        };

        record.status = if verified {
            AuditStatus::Verified
        } else {
            AuditStatus::Failed
        };

        if verified {
            debug!("Audit trail {} verified", id);
        } else {
            warn!("Audit trail {} failed integrity check", id);
        }

        Ok(IntegrityReport {
            id: id.to_string(),
            verified,
            computed_hash,
            stored_hash: record.data_hash.clone(),
            status: record.status,
        })
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    #[cfg(test)]
    async fn tamper(&self, id: &str, description: &str) {
        let mut state = self.state.lock().await;
        let position = state.index[id];
        state.records[position].description = description.to_string();
    }
}
