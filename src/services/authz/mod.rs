//! Authorization: permission vocabulary, role registry, and the guard/predicate engine.
pub mod permissions;
pub mod predicate;
pub mod roles;

use std::collections::BTreeSet;

/// A set of granted or required permission strings (e.g. `"catalog.write"`).
pub type PermissionSet = BTreeSet<String>;

pub use predicate::{Decision, Guard, Predicate, evaluate};
pub use roles::{RegistryError, RoleRegistry, StaticRoleRegistry};
