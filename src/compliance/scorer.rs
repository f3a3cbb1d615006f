//! Compliance Scorer
//!
//! Additive, order-independent point rules over a record's amount, risk
//! level and action text. The score is clamped to 100.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::audit::record::{AuditRecord, BusinessFields, NewAuditRecord, RiskLevel, NO_AMOUNT};
use crate::compliance::amount::parse_amount;
use crate::compliance::rules::{ComplianceRule, RuleCondition, RuleSet};

pub const MAX_RISK_SCORE: u32 = 100;

/// The record fields a compliance check looks at
#[derive(Debug, Clone, Copy)]
pub struct ScoringSubject<'a> {
    pub amount: &'a str,
    pub risk_level: RiskLevel,
    pub action: &'a str,
}

impl<'a> From<&'a AuditRecord> for ScoringSubject<'a> {
    fn from(record: &'a AuditRecord) -> Self {
        Self {
            amount: &record.amount,
            risk_level: record.risk_level,
            action: &record.action,
        }
    }
}

impl<'a> From<&'a BusinessFields> for ScoringSubject<'a> {
    fn from(fields: &'a BusinessFields) -> Self {
        Self {
            amount: &fields.amount,
            risk_level: fields.risk_level,
            action: &fields.action,
        }
    }
}

impl<'a> From<&'a NewAuditRecord> for ScoringSubject<'a> {
    fn from(request: &'a NewAuditRecord) -> Self {
        Self {
            amount: request.amount.as_deref().unwrap_or(NO_AMOUNT),
            risk_level: request.risk_level.unwrap_or_default(),
            action: &request.action,
        }
    }
}

/// Loose compliance-check payload as accepted over the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
}

impl<'a> From<&'a ComplianceRequest> for ScoringSubject<'a> {
    fn from(request: &'a ComplianceRequest) -> Self {
        Self {
            amount: request.amount.as_deref().unwrap_or(NO_AMOUNT),
            risk_level: request.risk_level.unwrap_or_default(),
            action: &request.action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub passed: bool,
    pub violations: Vec<String>,
    pub risk_score: u32,
}

impl ComplianceRule {
    fn applies_to(&self, subject: &ScoringSubject<'_>, amount: Option<f64>) -> bool {
        match &self.condition {
            RuleCondition::AmountLimit { threshold } => {
                amount.map(|value| value > *threshold).unwrap_or(false)
            }
            RuleCondition::RiskAssessment { level } => subject.risk_level == *level,
            RuleCondition::ActionKeyword { keyword } => subject
                .action
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
        }
    }
}

impl RuleSet {
    /// Run every active rule against a subject
    pub fn evaluate(&self, subject: &ScoringSubject<'_>) -> ComplianceResult {
        let amount = parse_amount(subject.amount);
        let mut violations = Vec::new();
        let mut points: u32 = 0;

        for rule in self.active_rules() {
            if !rule.applies_to(subject, amount) {
                continue;
            }
            points = points.saturating_add(rule.points);
            if let Some(violation) = &rule.violation {
                violations.push(violation.clone());
            }
        }

        let result = ComplianceResult {
            passed: violations.is_empty(),
            violations,
            risk_score: points.min(MAX_RISK_SCORE),
        };

        debug!(
            "Compliance check for '{}': score {} ({} violations)",
            subject.action,
            result.risk_score,
            result.violations.len()
        );
        result
    }
}

/// Shareable scorer bound to one rule set
#[derive(Debug, Clone, Default)]
pub struct ComplianceScorer {
    rules: Arc<RuleSet>,
}

impl ComplianceScorer {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn score<'a>(&self, subject: impl Into<ScoringSubject<'a>>) -> ComplianceResult {
        self.rules.evaluate(&subject.into())
    }
}

/// Score a subject against the built-in rule set
pub fn score<'a>(subject: impl Into<ScoringSubject<'a>>) -> ComplianceResult {
    RuleSet::default().evaluate(&subject.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject<'a>(amount: &'a str, risk_level: RiskLevel, action: &'a str) -> ScoringSubject<'a> {
        ScoringSubject {
            amount,
            risk_level,
            action,
        }
    }

    #[test]
    fn test_high_value_only() {
        let result = score(subject("$150,000", RiskLevel::Low, "Review"));
        assert_eq!(result.risk_score, 30);
        assert_eq!(
            result.violations,
            vec!["High-value transaction requires additional approval".to_string()]
        );
        assert!(!result.passed);
    }

    #[test]
    fn test_everything_clamps_to_100() {
        let result = score(subject("$2,000,000", RiskLevel::High, "Wire Transfer to vendor"));
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.violations.len(), 3);
        assert_eq!(result.violations[1], "Transaction exceeds regulatory threshold");
        assert!(!result.passed);
    }

    #[test]
    fn test_sentinel_amount_passes() {
        let result = score(subject("-", RiskLevel::Low, "Routine check"));
        assert_eq!(result.risk_score, 0);
        assert!(result.violations.is_empty());
        assert!(result.passed);
    }

    #[test]
    fn test_wire_transfer_scores_but_passes() {
        let result = score(subject("-", RiskLevel::Medium, "Outbound WIRE TRANSFER"));
        assert_eq!(result.risk_score, 20);
        assert!(result.passed);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let result = score(subject("$100,000", RiskLevel::Low, "Payment"));
        assert_eq!(result.risk_score, 0);
        let result = score(subject("$1,000,000", RiskLevel::Low, "Payment"));
        assert_eq!(result.risk_score, 30);
    }

    #[test]
    fn test_amount_with_trailing_currency_code() {
        let result = score(subject("$150,000 USD", RiskLevel::Low, "Review"));
        assert_eq!(result.risk_score, 30);
        assert_eq!(result.violations.len(), 1);
        assert!(!result.passed);
    }

    #[test]
    fn test_unparsable_amount_contributes_nothing() {
        let result = score(subject("about a million", RiskLevel::High, "Payment"));
        assert_eq!(result.risk_score, 40);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_inactive_rules_skipped() {
        let mut rules = RuleSet::default();
        rules.rules[2].active = false;
        let scorer = ComplianceScorer::new(rules);
        let result = scorer.score(subject("-", RiskLevel::High, "Review"));
        assert!(result.passed);
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn test_request_defaults() {
        let request = ComplianceRequest {
            action: "Wire transfer".to_string(),
            ..Default::default()
        };
        let result = score(&request);
        assert_eq!(result.risk_score, 20);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = score(subject("-", RiskLevel::Low, "Routine check"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["riskScore"], 0);
        assert_eq!(json["passed"], true);
    }
}
