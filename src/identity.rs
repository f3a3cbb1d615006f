//! Decentralized Identity
//!
//! DID generation and W3C-shaped verifiable credentials for auditors. The
//! credential proof is the record fingerprint of the credential input, so it
//! is a tamper indicator and not a signature.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::fingerprint;
use crate::error::AuditError;

pub const CREDENTIALS_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Identity data an auditor credential is issued for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserCredential {
    pub name: String,
    pub role: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSubject {
    pub id: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialProof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: DateTime<Utc>,
    pub proof_purpose: String,
    pub verification_method: String,
    pub jws: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,
    pub issuer: String,
    pub issuance_date: DateTime<Utc>,
    pub credential_subject: CredentialSubject,
    pub proof: CredentialProof,
}

/// Issues DIDs and credentials under one DID method
#[derive(Debug, Clone)]
pub struct IdentityIssuer {
    method: String,
}

impl IdentityIssuer {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
        }
    }

    pub fn generate_did(&self, address: &str) -> String {
        format!("did:{}:{}", self.method, address.to_lowercase())
    }

    pub fn issuer_did(&self) -> String {
        format!("did:{}:issuer", self.method)
    }

    pub fn create_verifiable_credential(
        &self,
        user: &UserCredential,
    ) -> Result<VerifiableCredential, AuditError> {
        let now = Utc::now();
        let issuer = self.issuer_did();
        let subject_id = self.generate_did(user.address.as_deref().unwrap_or("0x0"));

        Ok(VerifiableCredential {
            context: vec![CREDENTIALS_CONTEXT.to_string()],
            credential_type: vec![
                "VerifiableCredential".to_string(),
                "AuditorCredential".to_string(),
            ],
            issuer: issuer.clone(),
            issuance_date: now,
            credential_subject: CredentialSubject {
                id: subject_id,
                name: user.name.clone(),
                role: user.role.clone(),
                department: user.department.clone(),
                permissions: user.permissions.clone(),
            },
            proof: CredentialProof {
                proof_type: "Ed25519Signature2018".to_string(),
                created: now,
                proof_purpose: "assertionMethod".to_string(),
                verification_method: format!("{}#keys-1", issuer),
                jws: fingerprint::fingerprint(user)?,
            },
        })
    }
}

impl Default for IdentityIssuer {
    fn default() -> Self {
        Self::new("pwc")
    }
}
