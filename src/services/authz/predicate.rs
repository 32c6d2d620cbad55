//! Permission engine: declarative guards evaluated against a request context.
//!
//! A route is bound to exactly one [`Guard`] when the router is built:
//! - [`Guard::Public`]: no check is bound at all
//! - [`Guard::Optional`]: a check is bound but always allows; the handler may
//!   read identity if present
//! - [`Guard::Require`]: a [`Predicate`] must hold
//!
//! When a predicate carries both `any_of` and `all_of`, both must hold.
//! Empty sets follow plain set semantics: an empty `any_of` can never be
//! intersected (deny), an empty `all_of` is trivially covered (allow).
use crate::api::extractors::RequestContext;

use super::PermissionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// `{ anyOf?, allOf? }` over permission strings.
///
/// `Predicate::default()` (neither field set) places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    any_of: Option<PermissionSet>,
    all_of: Option<PermissionSet>,
}

impl Predicate {
    pub fn any_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().and_any_of(permissions)
    }

    pub fn all_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().and_all_of(permissions)
    }

    pub fn and_any_of<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.any_of = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn and_all_of<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_of = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.any_of.is_none() && self.all_of.is_none()
    }

    /// Evaluates against a granted permission set. Roles are never consulted.
    pub fn evaluate(&self, granted: &PermissionSet) -> Decision {
        if let Some(any_of) = &self.any_of
            && any_of.is_disjoint(granted)
        {
            return Decision::Deny;
        }

        if let Some(all_of) = &self.all_of
            && !all_of.is_subset(granted)
        {
            return Decision::Deny;
        }

        Decision::Allow
    }
}

/// Static access policy of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Public,
    Optional,
    Require(Predicate),
}

impl Guard {
    pub fn any_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Guard::Require(Predicate::any_of(permissions))
    }

    pub fn all_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Guard::Require(Predicate::all_of(permissions))
    }

    pub fn evaluate(&self, ctx: &RequestContext) -> Decision {
        match self {
            Guard::Public | Guard::Optional => Decision::Allow,
            Guard::Require(predicate) => predicate.evaluate(ctx.permissions()),
        }
    }
}

/// `evaluate(guard, context) -> Allow | Deny`
pub fn evaluate(guard: &Guard, ctx: &RequestContext) -> Decision {
    guard.evaluate(ctx)
}
