use serde::{Deserialize, Serialize};

use super::common::{require, require_email};
use crate::services::authz::permissions;

#[derive(Debug, Serialize, Deserialize)]
pub struct RolePayload {
    pub name: String,
    pub permissions: Vec<String>,
}

impl RolePayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.name, "name is required")?;
        // A role may only grant permissions that some route actually checks.
        if self
            .permissions
            .iter()
            .any(|p| !permissions::ALL.contains(&p.as_str()))
        {
            return Err("unknown permission");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Active,
    Invited,
    Disabled,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayload {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StaffStatus>,
}

impl StaffPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require_email(&self.email)
    }
}
