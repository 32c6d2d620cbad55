//! Role -> permission registry.
//!
//! This is the authoritative source consulted when credentials are minted and
//! refreshed (and, with `PermissionSource::Registry`, on every request).
use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use super::PermissionSet;
use super::permissions as p;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("role registry unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a role name into the permissions it currently grants.
///
/// Implementations must not mutate shared state on lookup. A database/cache
/// backed registry would be awaited per request; concurrent identical lookups
/// are allowed.
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    /// Returns:
    /// - `Ok(Some(set))` when the role is known (the set may be empty)
    /// - `Ok(None)` when the role is unknown
    /// - `Err(_)` when the backing source could not be reached
    async fn permissions_for(&self, role: &str) -> Result<Option<PermissionSet>, RegistryError>;
}

/// In-memory registry, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleRegistry {
    roles: HashMap<String, PermissionSet>,
}

impl StaticRoleRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in staff roles of the storefront.
    pub fn builtin() -> Self {
        Self::empty()
            .with_role("owner", p::ALL.iter().copied())
            .with_role(
                "admin",
                p::ALL.iter().copied().filter(|perm| *perm != p::FINANCE_WRITE),
            )
            .with_role(
                "manager",
                [
                    p::CATALOG_WRITE,
                    p::INVENTORY_READ,
                    p::INVENTORY_WRITE,
                    p::ORDERS_READ,
                    p::ORDERS_WRITE,
                    p::CUSTOMERS_READ,
                    p::PROMOTIONS_READ,
                    p::PROMOTIONS_WRITE,
                    p::REVIEWS_MODERATE,
                    p::CONTENT_WRITE,
                    p::REPORTS_READ,
                    p::GROWTH_READ,
                    p::STAFF_READ,
                ],
            )
            .with_role(
                "fulfillment",
                [
                    p::ORDERS_READ,
                    p::ORDERS_WRITE,
                    p::INVENTORY_READ,
                    p::INVENTORY_WRITE,
                ],
            )
            .with_role(
                "support",
                [
                    p::ORDERS_READ,
                    p::CUSTOMERS_READ,
                    p::CUSTOMERS_WRITE,
                    p::REVIEWS_MODERATE,
                ],
            )
            .with_role(
                "marketing",
                [
                    p::PROMOTIONS_READ,
                    p::PROMOTIONS_WRITE,
                    p::GROWTH_READ,
                    p::GROWTH_WRITE,
                    p::CONTENT_WRITE,
                    p::CUSTOMERS_READ,
                ],
            )
            .with_role("content_editor", [p::CONTENT_WRITE, p::CATALOG_WRITE])
            .with_role("analyst", [p::REPORTS_READ, p::GROWTH_READ])
            .with_role("customer", std::iter::empty::<&str>())
    }

    /// Adds (or replaces) a role.
    pub fn with_role<I, S>(mut self, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles
            .insert(role.into(), permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }
}

#[async_trait]
impl RoleRegistry for StaticRoleRegistry {
    async fn permissions_for(&self, role: &str) -> Result<Option<PermissionSet>, RegistryError> {
        Ok(self.roles.get(role).cloned())
    }
}
