#![allow(dead_code)]

use audit_ledger::api::{self, AppState};
use audit_ledger::audit::{AuditLedger, LedgerConfig, NewAuditRecord, RiskLevel};
use audit_ledger::compliance::ComplianceScorer;
use audit_ledger::identity::IdentityIssuer;
use axum::Router;

/// Ledger with no simulated latency and identifiers pinned to 2024
pub fn test_ledger() -> AuditLedger {
    AuditLedger::new(LedgerConfig::immediate(2024))
}

/// Router over a fresh ledger, returning the ledger for direct inspection
pub fn test_app() -> (Router, AuditLedger) {
    let ledger = test_ledger();
    let state = AppState::new(
        ledger.clone(),
        ComplianceScorer::default(),
        IdentityIssuer::default(),
    );
    (api::router(state), ledger)
}

pub fn wire_transfer() -> NewAuditRecord {
    NewAuditRecord::new(
        "Financial Transaction",
        "Wire transfer of $500,000 to vendor account",
        "John Smith",
    )
    .with_amount("$500,000")
    .with_risk_level(RiskLevel::High)
}

pub fn routine_review() -> NewAuditRecord {
    NewAuditRecord::new(
        "Audit Review",
        "Quarterly financial audit review process",
        "Sarah Johnson",
    )
}
