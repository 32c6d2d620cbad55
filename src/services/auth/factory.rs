/// Factory: build the credential issuer and `TokenService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::accounts::StaticAccountDirectory;
use crate::services::auth::issuer::{CredentialIssuer, IssuerSettings};
use crate::services::auth::token_service::TokenService;
use crate::services::authz::RoleRegistry;

pub fn build_issuer(config: &Config) -> Result<Arc<CredentialIssuer>, AppError> {
    let issuer = CredentialIssuer::new(
        &config.jwt_secret,
        IssuerSettings {
            issuer: config.auth_issuer.clone(),
            audience: config.auth_audience.clone(),
            access_ttl_seconds: config.access_token_ttl_seconds,
            refresh_ttl_seconds: config.refresh_token_ttl_seconds,
            leeway_seconds: config.token_leeway_seconds,
        },
    )?;

    Ok(Arc::new(issuer))
}

pub fn build_token_service(
    config: &Config,
    issuer: Arc<CredentialIssuer>,
    roles: Arc<dyn RoleRegistry>,
) -> Arc<TokenService> {
    let accounts = StaticAccountDirectory::new(&config.staff_accounts);
    Arc::new(TokenService::new(issuer, roles, Arc::new(accounts)))
}
