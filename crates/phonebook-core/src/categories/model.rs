//! Category model types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub i64);

impl CategoryId {
    /// Create a new category ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named grouping for contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier (None for unsaved categories).
    pub id: Option<CategoryId>,
    /// Category name, unique in the store.
    pub name: String,
}

impl Category {
    /// Creates a new, unsaved category.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Checks whether `name` equals this category's name, ignoring case.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// A category together with the number of contacts assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// The category.
    pub category: Category,
    /// Number of contacts referencing the category.
    pub contact_count: u32,
}
