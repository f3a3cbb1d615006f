//! Sample audit trails loaded into a fresh ledger for demos

use tracing::info;

use crate::audit::ledger::AuditLedger;
use crate::audit::record::{NewAuditRecord, RiskLevel};
use crate::error::AuditError;

pub fn sample_records() -> Vec<NewAuditRecord> {
    vec![
        NewAuditRecord::new(
            "Financial Transaction",
            "Wire transfer of $500,000 to vendor account",
            "John Smith",
        )
        .with_amount("$500,000")
        .with_risk_level(RiskLevel::High),
        NewAuditRecord::new(
            "Contract Amendment",
            "Updated service agreement terms",
            "Maria Garcia",
        )
        .with_risk_level(RiskLevel::Medium),
        NewAuditRecord::new(
            "Compliance Check",
            "Automated regulatory compliance verification",
            "System",
        ),
        NewAuditRecord::new(
            "Asset Transfer",
            "Transfer of digital assets between accounts",
            "David Wilson",
        )
        .with_amount("$75,000")
        .with_risk_level(RiskLevel::Medium),
        NewAuditRecord::new(
            "Audit Review",
            "Quarterly financial audit review process",
            "Sarah Johnson",
        ),
    ]
}

/// Insert the sample records, returning how many were stored
pub async fn seed_sample_data(ledger: &AuditLedger) -> Result<usize, AuditError> {
    let samples = sample_records();
    let count = samples.len();
    for sample in samples {
        ledger.create(sample).await?;
    }
    info!("Seeded {} sample audit trails", count);
    Ok(count)
}
