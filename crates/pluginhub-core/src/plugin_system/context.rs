use serde::{Deserialize, Serialize};

use crate::storage::option::OptionScope;

/// The project a plugin is being configured for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub slug: String,
    pub organization_slug: String,
}

impl Project {
    pub fn new(id: u64, slug: impl Into<String>, organization_slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            organization_slug: organization_slug.into(),
        }
    }

    /// Option scope holding this project's settings
    pub fn option_scope(&self) -> OptionScope {
        OptionScope::Project(self.slug.clone())
    }
}

/// The acting user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub is_superuser: bool,
}

impl User {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_superuser: false,
        }
    }
}
