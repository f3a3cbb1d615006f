//! Compliance Rule Definitions
//!
//! Rules are plain data so deployments can ship their own rule file. The
//! built-in set reproduces the platform's default checks.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::audit::record::RiskLevel;
use crate::error::AuditError;

/// Condition that makes a rule apply to a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCondition {
    /// Parsed amount strictly greater than `threshold`
    AmountLimit { threshold: f64 },
    /// Record carries exactly this risk level
    RiskAssessment { level: RiskLevel },
    /// Action text contains `keyword`, case-insensitively
    ActionKeyword { keyword: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub condition: RuleCondition,
    pub points: u32,
    /// Violation text; rules without one raise the score but never fail a record
    #[serde(default)]
    pub violation: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ComplianceRule {
    fn builtin(
        id: &str,
        name: &str,
        condition: RuleCondition,
        points: u32,
        violation: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            condition,
            points,
            violation: violation.map(str::to_string),
            active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<ComplianceRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: vec![
                ComplianceRule::builtin(
                    "high-value",
                    "High-value transaction",
                    RuleCondition::AmountLimit { threshold: 100_000.0 },
                    30,
                    Some("High-value transaction requires additional approval"),
                ),
                ComplianceRule::builtin(
                    "regulatory-threshold",
                    "Regulatory threshold",
                    RuleCondition::AmountLimit { threshold: 1_000_000.0 },
                    50,
                    Some("Transaction exceeds regulatory threshold"),
                ),
                ComplianceRule::builtin(
                    "high-risk",
                    "Enhanced due diligence",
                    RuleCondition::RiskAssessment { level: RiskLevel::High },
                    40,
                    Some("High-risk transaction requires enhanced due diligence"),
                ),
                // Scores without a violation: a wire transfer alone still passes.
                ComplianceRule::builtin(
                    "wire-transfer",
                    "Wire transfer",
                    RuleCondition::ActionKeyword { keyword: "wire transfer".to_string() },
                    20,
                    None,
                ),
            ],
        }
    }
}

impl RuleSet {
    /// Load a rule set from a YAML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, AuditError> {
        info!("Loading compliance rules from: {:?}", path);

        if !path.exists() {
            return Err(AuditError::ConfigError(format!(
                "Rule file not found: {:?}",
                path
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            AuditError::ConfigError(format!("Failed to read {:?}: {}", path, e))
        })?;

        let rule_set: RuleSet = serde_yaml::from_str(&contents)?;
        rule_set.validate()?;

        info!("Loaded {} compliance rules", rule_set.rules.len());
        Ok(rule_set)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.rules.is_empty() {
            return Err(AuditError::ConfigError("No compliance rules defined".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(AuditError::ConfigError(format!(
                    "Duplicate compliance rule id: {}",
                    rule.id
                )));
            }

            match &rule.condition {
                RuleCondition::AmountLimit { threshold } if !(*threshold > 0.0) => {
                    return Err(AuditError::ConfigError(format!(
                        "Rule {} must have a positive amount threshold",
                        rule.id
                    )));
                }
                RuleCondition::ActionKeyword { keyword } if keyword.trim().is_empty() => {
                    return Err(AuditError::ConfigError(format!(
                        "Rule {} has an empty action keyword",
                        rule.id
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub fn active_rules(&self) -> impl Iterator<Item = &ComplianceRule> {
        self.rules.iter().filter(|rule| rule.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = RuleSet::default();
        assert_eq!(rules.rules.len(), 4);
        assert!(rules.validate().is_ok());
        assert!(rules.rules[3].violation.is_none());
    }

    #[test]
    fn test_load_from_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
rules:
  - id: large
    name: Large amount
    condition:
      type: amount_limit
      threshold: 5000
    points: 25
    violation: Large amount
  - id: crypto
    name: Crypto keyword
    condition:
      type: action_keyword
      keyword: crypto
    points: 10
    active: false
"#
        )
        .unwrap();

        let rules = RuleSet::load_from_file(file.path()).unwrap();
        assert_eq!(rules.rules.len(), 2);
        assert_eq!(
            rules.rules[0].condition,
            RuleCondition::AmountLimit { threshold: 5000.0 }
        );
        assert_eq!(rules.active_rules().count(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut rules = RuleSet::default();
        rules.rules[1].id = rules.rules[0].id.clone();
        assert!(matches!(rules.validate(), Err(AuditError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RuleSet::load_from_file(Path::new("/nonexistent/rules.yml"));
        assert!(result.is_err());
    }
}
