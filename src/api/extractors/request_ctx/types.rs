/*
 * Responsibility
 * - The request context as seen by handlers and the permission engine
 * - The context middleware builds it once per request and stores it in request extensions
 *
 * Notes
 * - Credential verification lives in middleware/services; this is only the contract
 * - Immutable after construction: fields are private, there are no setters
 */
use crate::services::authz::PermissionSet;

/// Per-request identity snapshot.
///
/// - `request_id` is always present (propagated `x-request-id` or freshly generated)
/// - `user_id` / `role` are set only when an access credential verified
/// - `permissions` is empty for anonymous requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
    user_id: Option<String>,
    role: Option<String>,
    permissions: PermissionSet,
}

impl RequestContext {
    pub fn anonymous(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            user_id: None,
            role: None,
            permissions: PermissionSet::new(),
        }
    }

    pub fn authenticated(
        request_id: impl Into<String>,
        user_id: impl Into<String>,
        role: Option<String>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            user_id: Some(user_id.into()),
            role,
            permissions,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}
