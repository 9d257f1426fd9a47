//! Contact model types.

use serde::{Deserialize, Serialize};

use crate::categories::{Category, CategoryId};

/// Unique identifier for a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub i64);

impl ContactId {
    /// Create a new contact ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person record in the phonebook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    /// Unique identifier (None for unsaved contacts).
    pub id: Option<ContactId>,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number, `+` followed by digits.
    pub phone_number: String,
    /// Email address, if known.
    pub email: Option<String>,
    /// Assigned category, if any.
    pub category_id: Option<CategoryId>,
    /// Name of the assigned category, filled in when read from the store.
    pub category_name: Option<String>,
}

impl Contact {
    /// Creates a new, unsaved and uncategorized contact without email.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
            ..Self::default()
        }
    }

    /// Sets the email address. Blank addresses are stored as no email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = if email.trim().is_empty() {
            None
        } else {
            Some(email)
        };
        self
    }

    /// Assigns the contact to `category`, or clears the assignment.
    #[must_use]
    pub fn with_category(mut self, category: Option<&Category>) -> Self {
        self.set_category(category);
        self
    }

    /// Assigns the contact to `category`, or clears the assignment.
    pub fn set_category(&mut self, category: Option<&Category>) {
        self.category_id = category.and_then(|c| c.id);
        self.category_name = category.map(|c| c.name.clone());
    }

    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the email address when it is present and not blank.
    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}
