/*
 * Responsibility
 * - Load Config -> build services -> assemble the Router
 * - Apply middleware (context extraction, security headers, CORS, HTTP layers)
 * - Start the server with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::auth::{build_issuer, build_token_service};
use crate::services::authz::{RoleRegistry, StaticRoleRegistry};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,storefront_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash so it gets noticed. Production: keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        app_env = ?config.app_env,
        addr = %config.addr,
        permission_source = ?config.permission_source,
        "starting storefront API"
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Process-level services, shared through `AppState`.
pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let roles: Arc<dyn RoleRegistry> = Arc::new(StaticRoleRegistry::builtin());
    let issuer = build_issuer(config)?;
    let auth = build_token_service(config, issuer.clone(), roles.clone());

    Ok(AppState::new(issuer, auth, roles, config.permission_source))
}

/// Routes (with guards) -> context extraction -> state -> transport layers.
///
/// Layers added later wrap earlier ones, so the HTTP layers (request id first)
/// run before the context middleware sees the request.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = middleware::auth::context::apply(api::routes(), state.clone()).with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
