//! Login account lookup.
//!
//! The credential check is a stub: any non-empty password is accepted.
//! Seeded staff accounts carry a role; everyone else signs in as `customer`.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::config::StaffAccount;

pub const CUSTOMER_ROLE: &str = "customer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("account directory unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// `Ok(None)` means the email/password pair was rejected.
    async fn authenticate(&self, email: &str, password: &str)
    -> Result<Option<Account>, DirectoryError>;
}

#[derive(Debug, Default)]
pub struct StaticAccountDirectory {
    staff: HashMap<String, Account>,
    // customer email -> stable id for the process lifetime
    customers: Mutex<HashMap<String, Uuid>>,
}

impl StaticAccountDirectory {
    pub fn new(staff: &[StaffAccount]) -> Self {
        let staff = staff
            .iter()
            .map(|s| {
                let email = normalize_email(&s.email);
                let account = Account {
                    user_id: Uuid::new_v4(),
                    email: email.clone(),
                    role: s.role.clone(),
                };
                (email, account)
            })
            .collect();

        Self {
            staff,
            customers: Mutex::new(HashMap::new()),
        }
    }

    fn customer(&self, email: String) -> Result<Account, DirectoryError> {
        let mut customers = self
            .customers
            .lock()
            .map_err(|_| DirectoryError::Unavailable("customer index poisoned".to_string()))?;
        let user_id = *customers.entry(email.clone()).or_insert_with(Uuid::new_v4);

        Ok(Account {
            user_id,
            email,
            role: CUSTOMER_ROLE.to_string(),
        })
    }
}

#[async_trait]
impl AccountDirectory for StaticAccountDirectory {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, DirectoryError> {
        if password.is_empty() {
            return Ok(None);
        }

        let email = normalize_email(email);
        if email.is_empty() {
            return Ok(None);
        }

        match self.staff.get(&email) {
            Some(account) => Ok(Some(account.clone())),
            None => self.customer(email).map(Some),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
