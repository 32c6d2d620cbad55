use serde::{Deserialize, Serialize};

use super::common::require;

#[derive(Debug, Serialize, Deserialize)]
pub struct PagePayload {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published: bool,
}

impl PagePayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.title, "title is required")?;
        require(&self.slug, "slug is required")?;
        if !self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err("slug may only contain a-z, 0-9 and '-'");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationItem {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationPayload {
    pub name: String,
    pub items: Vec<NavigationItem>,
}

impl NavigationPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.name, "name is required")?;
        for item in &self.items {
            require(&item.label, "label is required")?;
            require(&item.href, "href is required")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeSetting {
    pub setting: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ThemeUpdated {
    pub updated: bool,
    #[serde(flatten)]
    pub setting: ThemeSetting,
}
