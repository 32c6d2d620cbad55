use serde::Serialize;
use uuid::Uuid;

/// `{ items: [...], meta: { total } }`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            items,
            meta: ListMeta { total },
        }
    }
}

/// `{ id, ...payload }`
#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub id: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Created<T> {
    pub fn new(payload: T) -> Self {
        Self {
            id: new_id(),
            payload,
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn require(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err(message);
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), &'static str> {
    require(value, "email is required")?;
    if !value.contains('@') {
        return Err("email is invalid");
    }
    Ok(())
}
