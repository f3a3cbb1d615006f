use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::audit::LedgerConfig;
use crate::compliance::RuleSet;
use crate::error::AuditError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub simulated_latency_ms: u64,
    pub audit_id_year: Option<i32>,
    pub seed_sample_data: bool,
    pub compliance_rules_path: Option<String>,
    pub did_method: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AuditError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn load_from<F>(lookup: F) -> Result<Self, AuditError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = parse_var(&lookup, "SERVER_PORT")?.unwrap_or(3000);

        let simulated_latency_ms = parse_var(&lookup, "SIMULATED_LATENCY_MS")?.unwrap_or(2000);

        let audit_id_year = parse_var(&lookup, "AUDIT_ID_YEAR")?;

        let seed_sample_data = parse_var(&lookup, "SEED_SAMPLE_DATA")?.unwrap_or(true);

        let compliance_rules_path = lookup("COMPLIANCE_RULES_PATH").filter(|p| !p.is_empty());

        let did_method = lookup("DID_METHOD").unwrap_or_else(|| "pwc".to_string());

        Ok(AppConfig {
            server_host,
            server_port,
            simulated_latency_ms,
            audit_id_year,
            seed_sample_data,
            compliance_rules_path,
            did_method,
        })
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            simulated_latency: Duration::from_millis(self.simulated_latency_ms),
            id_year: self.audit_id_year,
        }
    }

    /// Rules from the configured file, or the built-in set
    pub fn rule_set(&self) -> Result<RuleSet, AuditError> {
        match &self.compliance_rules_path {
            Some(path) => RuleSet::load_from_file(Path::new(path)),
            None => Ok(RuleSet::default()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AuditError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AuditError::ConfigError(format!("Invalid {}: {}", key, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Result<AppConfig, AuditError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.simulated_latency_ms, 2000);
        assert!(config.seed_sample_data);
        assert_eq!(config.audit_id_year, None);
        assert_eq!(config.did_method, "pwc");
        assert_eq!(config.rule_set().unwrap(), RuleSet::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("SERVER_PORT", "8080"),
            ("SIMULATED_LATENCY_MS", "0"),
            ("AUDIT_ID_YEAR", "2024"),
            ("SEED_SAMPLE_DATA", "false"),
        ])
        .unwrap();
        assert_eq!(config.server_port, 8080);
        assert!(!config.seed_sample_data);

        let ledger = config.ledger_config();
        assert!(ledger.simulated_latency.is_zero());
        assert_eq!(ledger.id_year, Some(2024));
    }

    #[test]
    fn test_invalid_port() {
        let err = from_map(&[("SERVER_PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_missing_rules_file() {
        let config = from_map(&[("COMPLIANCE_RULES_PATH", "/nonexistent/rules.yml")]).unwrap();
        assert!(config.rule_set().is_err());
    }
}
