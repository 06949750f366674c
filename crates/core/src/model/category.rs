use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CategoryId;

/// Validated category display name (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a validated category name.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CategoryError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = CategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl std::fmt::Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question category. Read-only outside of seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    #[serde(rename = "type")]
    name: CategoryName,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, name: CategoryName) -> Self {
        Self { id, name }
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &CategoryName {
        &self.name
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}
