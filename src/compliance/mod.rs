//! Compliance Checks
//!
//! Rule-based risk scoring for audit records. Scores are advisory: a record
//! fails compliance only when a rule with violation text applies.

pub mod amount;
pub mod rules;
pub mod scorer;

pub use amount::parse_amount;
pub use rules::{ComplianceRule, RuleCondition, RuleSet};
pub use scorer::{score, ComplianceRequest, ComplianceResult, ComplianceScorer, ScoringSubject};
