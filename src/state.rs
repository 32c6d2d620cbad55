/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - credential issuer, token service, role registry, permission source
 * - Cheap to Clone (everything inside is Arc/Copy); read-only after startup
 */
use std::sync::Arc;

use crate::config::PermissionSource;
use crate::services::{
    auth::{CredentialIssuer, TokenService},
    authz::RoleRegistry,
};

#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<CredentialIssuer>,
    pub auth: Arc<TokenService>,
    pub roles: Arc<dyn RoleRegistry>,
    pub permission_source: PermissionSource,
    pub started_at: std::time::Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("issuer", &self.issuer)
            .field("permission_source", &self.permission_source)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        issuer: Arc<CredentialIssuer>,
        auth: Arc<TokenService>,
        roles: Arc<dyn RoleRegistry>,
        permission_source: PermissionSource,
    ) -> Self {
        Self {
            issuer,
            auth,
            roles,
            permission_source,
            started_at: std::time::Instant::now(),
        }
    }
}
