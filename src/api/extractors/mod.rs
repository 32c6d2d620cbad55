pub mod json_body;
pub mod request_ctx;

pub use json_body::JsonBody;
pub use request_ctx::{Ctx, RequestContext};
