use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::credential::{
    Credential, CredentialClaims, CredentialError, IssuedCredential, TokenKind,
};
use crate::services::authz::PermissionSet;

/// Lifetimes and claim values stamped into every credential.
#[derive(Debug, Clone)]
pub struct IssuerSettings {
    pub issuer: String,
    pub audience: String,
    pub access_ttl_seconds: u64,
    pub refresh_ttl_seconds: u64,
    pub leeway_seconds: u64,
}

/// Mints and verifies HS256 session credentials with a process-wide secret.
///
/// Issuance and verification are pure functions of their input plus the
/// secret; the struct is read-only after construction and shared via `Arc`.
/// HMAC tags are compared in constant time by the crypto backend.
#[derive(Clone)]
pub struct CredentialIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    settings: IssuerSettings,
}

impl std::fmt::Debug for CredentialIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("CredentialIssuer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CredentialIssuer {
    pub fn new(secret: &str, settings: IssuerSettings) -> Result<Self, AppError> {
        if secret.is_empty() {
            warn!("refusing to build a credential issuer with an empty signing secret");
            return Err(AppError::Internal);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = settings.leeway_seconds;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            settings,
        })
    }

    /// Short-lived credential presented on every request.
    pub fn issue_access(
        &self,
        subject: &str,
        role: Option<&str>,
        permissions: &PermissionSet,
    ) -> Result<IssuedCredential, CredentialError> {
        self.issue_at(TokenKind::Access, subject, role, permissions, Utc::now())
    }

    /// Long-lived credential only accepted by the refresh operation.
    pub fn issue_refresh(
        &self,
        subject: &str,
        role: Option<&str>,
        permissions: &PermissionSet,
    ) -> Result<IssuedCredential, CredentialError> {
        self.issue_at(TokenKind::Refresh, subject, role, permissions, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        kind: TokenKind,
        subject: &str,
        role: Option<&str>,
        permissions: &PermissionSet,
        now: DateTime<Utc>,
    ) -> Result<IssuedCredential, CredentialError> {
        let ttl_seconds = match kind {
            TokenKind::Access => self.settings.access_ttl_seconds,
            TokenKind::Refresh => self.settings.refresh_ttl_seconds,
        };
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(ChronoDuration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                error!(ttl_seconds, kind = %kind, "credential lifetime out of range");
                CredentialError::Signing
            })?;

        let claims = CredentialClaims {
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            sub: subject.to_string(),
            role: role.map(str::to_string),
            permissions: permissions.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign credential");
            CredentialError::Signing
        })?;

        Ok(IssuedCredential {
            token,
            kind,
            expires_at,
            expires_in: ttl_seconds,
        })
    }

    /// Verify signature, expiry, issuer and audience, then enforce required claims.
    ///
    /// This is the only way a [`Credential`] is produced. The token kind is not
    /// checked here; use [`CredentialIssuer::verify_kind`] at enforcement points.
    pub fn verify(&self, token: &str) -> Result<Credential, CredentialError> {
        let data = jsonwebtoken::decode::<CredentialClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => CredentialError::InvalidSignature,
            ErrorKind::ExpiredSignature => CredentialError::Expired,
            // Bad encoding, unexpected alg, foreign iss/aud, missing claims
            _ => CredentialError::Malformed,
        })?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() || claims.jti.trim().is_empty() {
            return Err(CredentialError::Malformed);
        }

        let issued_at =
            DateTime::from_timestamp(claims.iat, 0).ok_or(CredentialError::Malformed)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(CredentialError::Malformed)?;
        if expires_at <= issued_at {
            return Err(CredentialError::Malformed);
        }

        Ok(Credential {
            subject: claims.sub,
            role: claims.role.filter(|r| !r.trim().is_empty()),
            permissions: claims.permissions,
            kind: claims.kind,
            token_id: claims.jti,
            issued_at,
            expires_at,
        })
    }

    /// Verify + require a specific token kind.
    pub fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<Credential, CredentialError> {
        let credential = self.verify(token)?;
        if credential.kind != expected {
            return Err(CredentialError::WrongKind {
                expected,
                actual: credential.kind,
            });
        }
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn settings() -> IssuerSettings {
        IssuerSettings {
            issuer: "storefront-api".into(),
            audience: "storefront-api".into(),
            access_ttl_seconds: 900,
            refresh_ttl_seconds: 604_800,
            leeway_seconds: 0,
        }
    }

    fn issuer() -> CredentialIssuer {
        CredentialIssuer::new("test-secret-test-secret-test-secret", settings()).unwrap()
    }

    fn perms(items: &[&str]) -> PermissionSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn access_round_trip_preserves_identity() {
        let issuer = issuer();
        let granted = perms(&["catalog.write", "orders.read"]);
        let issued = issuer
            .issue_access("user-42", Some("manager"), &granted)
            .unwrap();
        assert_eq!(issued.kind, TokenKind::Access);
        assert_eq!(issued.expires_in, 900);

        let credential = issuer.verify(&issued.token).unwrap();
        assert_eq!(credential.subject, "user-42");
        assert_eq!(credential.role.as_deref(), Some("manager"));
        assert_eq!(credential.permissions, granted);
        assert_eq!(credential.kind, TokenKind::Access);
        assert_eq!(
            (credential.expires_at - credential.issued_at).num_seconds(),
            900
        );
    }

    #[test]
    fn refresh_round_trip_preserves_identity() {
        let issuer = issuer();
        let granted = perms(&["reports.read"]);
        let issued = issuer.issue_refresh("user-7", None, &granted).unwrap();

        let credential = issuer.verify_kind(&issued.token, TokenKind::Refresh).unwrap();
        assert_eq!(credential.subject, "user-7");
        assert_eq!(credential.role, None);
        assert_eq!(credential.permissions, granted);
        assert_eq!(
            (credential.expires_at - credential.issued_at).num_days(),
            7
        );
    }

    #[test]
    fn every_credential_gets_a_unique_token_id() {
        let issuer = issuer();
        let a = issuer.issue_access("u", None, &PermissionSet::new()).unwrap();
        let b = issuer.issue_access("u", None, &PermissionSet::new()).unwrap();
        let a = issuer.verify(&a.token).unwrap();
        let b = issuer.verify(&b.token).unwrap();
        assert_ne!(a.token_id, b.token_id);
    }

    #[test]
    fn expired_credentials_are_rejected() {
        let issuer = issuer();
        let long_ago = Utc::now() - ChronoDuration::days(30);
        for kind in [TokenKind::Access, TokenKind::Refresh] {
            let issued = issuer
                .issue_at(kind, "user-1", None, &perms(&["a"]), long_ago)
                .unwrap();
            assert_eq!(issuer.verify(&issued.token), Err(CredentialError::Expired));
        }
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let lenient = CredentialIssuer::new(
            "test-secret-test-secret-test-secret",
            IssuerSettings {
                leeway_seconds: 120,
                ..settings()
            },
        )
        .unwrap();
        // expired 60s ago
        let issued = lenient
            .issue_at(
                TokenKind::Access,
                "user-1",
                None,
                &PermissionSet::new(),
                Utc::now() - ChronoDuration::seconds(960),
            )
            .unwrap();
        assert!(lenient.verify(&issued.token).is_ok());
        assert_eq!(issuer().verify(&issued.token), Err(CredentialError::Expired));
    }

    #[test]
    fn out_of_range_lifetime_is_a_signing_error() {
        let issuer = CredentialIssuer::new(
            "test-secret-test-secret-test-secret",
            IssuerSettings {
                access_ttl_seconds: 10_000_000_000_000_000,
                refresh_ttl_seconds: u64::MAX,
                ..settings()
            },
        )
        .unwrap();

        assert_eq!(
            issuer.issue_access("user-1", None, &PermissionSet::new()).unwrap_err(),
            CredentialError::Signing
        );
        assert_eq!(
            issuer.issue_refresh("user-1", None, &PermissionSet::new()).unwrap_err(),
            CredentialError::Signing
        );
    }

    #[test]
    fn tampered_payload_fails_signature_check() {
        let issuer = issuer();
        let issued = issuer
            .issue_access("user-1", Some("customer"), &PermissionSet::new())
            .unwrap();

        let mut parts: Vec<String> = issued.token.split('.').map(str::to_string).collect();
        let payload = URL_SAFE_NO_PAD.decode(&parts[1]).unwrap();
        let mut claims: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        claims["permissions"] = serde_json::json!(["staff.write", "catalog.write"]);
        claims["role"] = serde_json::json!("owner");
        parts[1] = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let forged = parts.join(".");

        assert_eq!(issuer.verify(&forged), Err(CredentialError::InvalidSignature));
    }

    #[test]
    fn credential_from_another_secret_is_rejected() {
        let other = CredentialIssuer::new("some-other-secret", settings()).unwrap();
        let issued = other
            .issue_access("user-1", None, &perms(&["catalog.write"]))
            .unwrap();
        assert_eq!(
            issuer().verify(&issued.token),
            Err(CredentialError::InvalidSignature)
        );
    }

    #[test]
    fn foreign_audience_is_malformed() {
        let other = CredentialIssuer::new(
            "test-secret-test-secret-test-secret",
            IssuerSettings {
                audience: "admin-console".into(),
                ..settings()
            },
        )
        .unwrap();
        let issued = other.issue_access("user-1", None, &PermissionSet::new()).unwrap();
        assert_eq!(issuer().verify(&issued.token), Err(CredentialError::Malformed));
    }

    #[test]
    fn garbage_is_malformed() {
        let issuer = issuer();
        assert_eq!(issuer.verify(""), Err(CredentialError::Malformed));
        assert_eq!(issuer.verify("not-a-jwt"), Err(CredentialError::Malformed));
        assert_eq!(issuer.verify("a.b.c"), Err(CredentialError::Malformed));
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let issuer = issuer();
        let access = issuer.issue_access("u", None, &PermissionSet::new()).unwrap();
        let refresh = issuer.issue_refresh("u", None, &PermissionSet::new()).unwrap();

        assert_eq!(
            issuer.verify_kind(&access.token, TokenKind::Refresh),
            Err(CredentialError::WrongKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            })
        );
        assert_eq!(
            issuer.verify_kind(&refresh.token, TokenKind::Access),
            Err(CredentialError::WrongKind {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        );
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(CredentialIssuer::new("", settings()).is_err());
    }
}
