//! Audit Trail
//!
//! Tamper-indicating audit records: fingerprinting, the in-memory ledger,
//! integrity verification and dashboard statistics.

pub mod fingerprint;
pub mod ledger;
pub mod record;
pub mod seed;
pub mod stats;
pub mod verify;

pub use fingerprint::{fingerprint, fingerprint_str};
pub use ledger::{AuditLedger, LedgerConfig};
pub use record::{
    AuditRecord, AuditStatus, BusinessFields, NewAuditRecord, RiskLevel, TransactionReceipt,
};
pub use stats::LedgerStats;
pub use verify::{verify_integrity, verify_integrity_value, IntegrityReport};
