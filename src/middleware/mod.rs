/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth: request context extraction + route guards
 * - cors / http / security_headers: transport concerns applied in app::build_router
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
