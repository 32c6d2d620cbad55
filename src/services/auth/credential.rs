use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::authz::PermissionSet;

/// Which slot a credential may be used in. Checked explicitly; expiry alone is not enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Errors returned by credential verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("malformed credential")]
    Malformed,
    #[error("invalid credential signature")]
    InvalidSignature,
    #[error("credential expired")]
    Expired,
    #[error("wrong credential kind: expected {expected}, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("failed to sign credential")]
    Signing,
}

/// JWT claims as they travel on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CredentialClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub kind: TokenKind,
}

/// A verified credential. Only ever constructed from a signature- and expiry-checked decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub subject: String,
    pub role: Option<String>,
    pub permissions: PermissionSet,
    pub kind: TokenKind,
    pub token_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A freshly minted, signed credential.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
    /// Seconds until expiry at issue time.
    pub expires_in: u64,
}
