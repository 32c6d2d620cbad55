/*!
 * Request context extractor
 *
 * Responsibility:
 * - Provide the per-request identity snapshot (RequestContext) to handlers and guards
 * - Keep axum dependencies in core; the type itself lives in types
 *
 * Public API:
 * - RequestContext
 * - Ctx
 */

mod core;
mod types;

pub use core::Ctx;
pub use types::RequestContext;
