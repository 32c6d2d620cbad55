use std::sync::Arc;

use tracing::{debug, error};

use crate::error::AppError;
use crate::services::auth::accounts::{Account, AccountDirectory};
use crate::services::auth::credential::{IssuedCredential, TokenKind};
use crate::services::auth::issuer::CredentialIssuer;
use crate::services::authz::{PermissionSet, RoleRegistry};

/// Service that orchestrates login (access + refresh pair) and refresh (new access).
///
/// - CredentialIssuer signs/verifies credentials.
/// - RoleRegistry is the authoritative role -> permissions source; it is consulted
///   at login and again at every refresh so revocations do not survive a refresh.
/// - AccountDirectory performs the (stub) credential check.
#[derive(Clone)]
pub struct TokenService {
    issuer: Arc<CredentialIssuer>,
    roles: Arc<dyn RoleRegistry>,
    accounts: Arc<dyn AccountDirectory>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(
        issuer: Arc<CredentialIssuer>,
        roles: Arc<dyn RoleRegistry>,
        accounts: Arc<dyn AccountDirectory>,
    ) -> Self {
        Self {
            issuer,
            roles,
            accounts,
        }
    }

    /// Authenticate and issue a new credential pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedTokenPair, AppError> {
        let account = self
            .accounts
            .authenticate(email, password)
            .await
            .map_err(|e| {
                error!(error = %e, "account lookup failed");
                AppError::Internal
            })?
            .ok_or(AppError::InvalidCredentials)?;

        self.issue_token_pair(&account).await
    }

    /// Issue access + refresh credentials for an authenticated account.
    pub async fn issue_token_pair(&self, account: &Account) -> Result<IssuedTokenPair, AppError> {
        let subject = account.user_id.to_string();
        let permissions = self.resolve_permissions(&account.role).await?;

        let access = self
            .issuer
            .issue_access(&subject, Some(&account.role), &permissions)?;
        let refresh = self
            .issuer
            .issue_refresh(&subject, Some(&account.role), &permissions)?;

        debug!(
            user_id = %subject,
            role = %account.role,
            permissions = permissions.len(),
            "issued credential pair"
        );

        Ok(IssuedTokenPair { access, refresh })
    }

    /// Exchange a refresh credential for a new access credential.
    ///
    /// - the credential must verify AND be of kind `refresh`
    /// - subject and role are carried over
    /// - permissions are re-resolved from the registry, never copied from the old token
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedCredential, AppError> {
        let credential = self
            .issuer
            .verify_kind(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                debug!(error = %e, "refresh rejected");
                AppError::InvalidToken
            })?;

        let permissions = match credential.role.as_deref() {
            Some(role) => self.resolve_permissions(role).await?,
            None => PermissionSet::new(),
        };

        let access = self.issuer.issue_access(
            &credential.subject,
            credential.role.as_deref(),
            &permissions,
        )?;

        debug!(user_id = %credential.subject, "refreshed access credential");

        Ok(access)
    }

    async fn resolve_permissions(&self, role: &str) -> Result<PermissionSet, AppError> {
        let resolved = self.roles.permissions_for(role).await.map_err(|e| {
            error!(role = %role, error = %e, "role registry lookup failed");
            AppError::Internal
        })?;

        // Unknown roles grant nothing.
        Ok(resolved.unwrap_or_default())
    }
}

/// Service-level return type to keep handlers thin.
#[derive(Clone, Debug)]
pub struct IssuedTokenPair {
    pub access: IssuedCredential,
    pub refresh: IssuedCredential,
}
