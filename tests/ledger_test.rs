//! Audit Ledger Tests
//!
//! Creation, lookup, ordering and integrity verification through the public
//! ledger API.

mod common;

use audit_ledger::audit::{
    fingerprint, verify_integrity, verify_integrity_value, AuditStatus, LedgerStats,
    NewAuditRecord,
};
use audit_ledger::compliance;
use audit_ledger::AuditError;
use common::{routine_review, test_ledger, wire_transfer};

#[tokio::test]
async fn test_create_assigns_sequential_ids() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();

    let (first, _) = ledger.create(wire_transfer()).await?;
    let (second, _) = ledger.create(routine_review()).await?;

    assert_eq!(first.id, "AT-2024-001");
    assert_eq!(second.id, "AT-2024-002");
    assert_ne!(first.transaction_id, second.transaction_id);
    Ok(())
}

#[tokio::test]
async fn test_stored_digest_covers_business_fields() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    let (record, _) = ledger.create(wire_transfer()).await?;

    let expected = fingerprint(&record.business_fields())?;
    assert_eq!(record.data_hash.as_deref(), Some(expected.as_str()));
    assert!(verify_integrity(&record, &expected)?);
    assert!(!verify_integrity(&record, "0xdeadbeef")?);
    Ok(())
}

#[tokio::test]
async fn test_digest_ignores_random_chain_fields() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    let (a, _) = ledger.create(routine_review()).await?;
    let (b, _) = ledger.create(routine_review()).await?;

    assert_ne!(a.block_hash, b.block_hash);
    assert_eq!(a.data_hash, b.data_hash);
    Ok(())
}

#[tokio::test]
async fn test_stored_record_json_verifies() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    let (record, _) = ledger.create(wire_transfer()).await?;

    let value = serde_json::to_value(&record)?;
    let stored = record.data_hash.clone().unwrap_or_default();
    assert!(verify_integrity_value(&value, &stored)?);

    let mut tampered = value.clone();
    tampered["amount"] = serde_json::json!("$5,000,000");
    assert!(!verify_integrity_value(&tampered, &stored)?);
    Ok(())
}

#[tokio::test]
async fn test_get_and_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    let (record, _) = ledger.create(routine_review()).await?;

    assert_eq!(ledger.get(&record.id).await?, record);
    assert!(matches!(
        ledger.get("AT-2024-404").await,
        Err(AuditError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_list_orders_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    for _ in 0..3 {
        ledger.create(routine_review()).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let records = ledger.list().await;
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["AT-2024-003", "AT-2024-002", "AT-2024-001"]);
    assert!(records.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    Ok(())
}

#[tokio::test]
async fn test_verify_keeps_clean_records_verified() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    let (record, _) = ledger.create(wire_transfer()).await?;

    let report = ledger.verify(&record.id).await?;
    assert!(report.verified);
    assert_eq!(report.stored_hash, record.data_hash);
    assert_eq!(ledger.get(&record.id).await?.status, AuditStatus::Verified);
    Ok(())
}

#[tokio::test]
async fn test_whitespace_fields_create_and_verify() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    let (record, _) = ledger.create(NewAuditRecord::new(" ", "Spacer entry", " ")).await?;

    let report = ledger.verify(&record.id).await?;
    assert!(report.verified);

    let err = ledger
        .create(NewAuditRecord::new("", "Spacer entry", " "))
        .await
        .unwrap_err();
    assert!(matches!(err, AuditError::ValidationError(_)));
    assert_eq!(ledger.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_stats_and_scoring_over_ledger() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = test_ledger();
    ledger.create(wire_transfer()).await?;
    ledger.create(routine_review()).await?;

    let records = ledger.list().await;
    let stats = LedgerStats::from_records(&records);
    assert_eq!(stats.total_transactions, 2);
    assert_eq!(stats.high_risk_transactions, 1);
    assert_eq!(stats.total_value, 500_000.0);
    assert_eq!(stats.compliance_score, 100);

    let flagged: Vec<_> = records
        .iter()
        .filter(|r| !compliance::score(*r).passed)
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].action, "Financial Transaction");
    Ok(())
}
