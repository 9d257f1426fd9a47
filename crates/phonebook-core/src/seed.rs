//! Default data loaded into an empty store.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::categories::repository as categories;
use crate::contacts::Contact;
use crate::contacts::repository as contacts;
use crate::{Database, Result};

/// Contents of the seed file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeedData {
    /// Categories to create.
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    /// Contacts to create.
    #[serde(default)]
    pub contacts: Vec<SeedContact>,
}

/// A default category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeedCategory {
    /// Category name.
    pub name: String,
}

/// A default contact; the category is referenced by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeedContact {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone_number: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Name of the category the contact belongs to.
    #[serde(default)]
    pub category: Option<String>,
}

/// What a seeding attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Auto-seeding is turned off.
    Disabled,
    /// At least one table already has rows; nothing was written.
    StoreNotEmpty,
    /// The seed file could not be read or parsed; nothing was written.
    Failed,
    /// Rows were created.
    Seeded {
        /// Number of categories created.
        categories: usize,
        /// Number of contacts created.
        contacts: usize,
    },
}

impl SeedData {
    /// Parse seed data from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid seed JSON.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::parse(&json)
    }

    /// Write every category, then every contact, in one transaction.
    ///
    /// Contacts naming an unknown category are stored uncategorized.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; the transaction is rolled back.
    pub async fn apply(&self, db: &Database) -> Result<SeedOutcome> {
        let mut tx = db.pool().begin().await?;

        for category in &self.categories {
            categories::insert_row(&mut *tx, &category.name).await?;
        }

        for seed in &self.contacts {
            let mut contact = Contact::new(&seed.first_name, &seed.last_name, &seed.phone_number)
                .with_email(seed.email.clone().unwrap_or_default());

            if let Some(name) = seed.category.as_deref().filter(|n| !n.is_empty()) {
                let category = categories::find_by_name(&mut *tx, name).await?;
                if category.is_none() {
                    debug!("Seed contact {} names unknown category {name}", contact.full_name());
                }
                contact.set_category(category.as_ref());
            }

            contacts::insert_row(&mut *tx, &contact).await?;
        }

        tx.commit().await?;

        info!(
            "Seeded {} categories and {} contacts",
            self.categories.len(),
            self.contacts.len()
        );
        Ok(SeedOutcome::Seeded {
            categories: self.categories.len(),
            contacts: self.contacts.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "Categories": [ { "Name": "Family" }, { "Name": "Work" } ],
        "Contacts": [
            { "FirstName": "Ana", "LastName": "Horvat", "PhoneNumber": "+38591111",
              "Email": "ana@example.com", "Category": "Family" },
            { "FirstName": "Ivan", "LastName": "Babic", "PhoneNumber": "+38592222",
              "Email": null, "Category": "Gym" },
            { "FirstName": "Maja", "LastName": "Kovac", "PhoneNumber": "+38593333" }
        ]
    }"#;

    #[test]
    fn test_parse() {
        let data = SeedData::parse(SEED).unwrap();
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.contacts.len(), 3);
        assert_eq!(data.contacts[0].category.as_deref(), Some("Family"));
        assert!(data.contacts[2].email.is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SeedData::parse("{ not json").is_err());
        assert!(SeedData::parse(r#"{ "Contacts": [ { "FirstName": 1 } ] }"#).is_err());
    }

    #[tokio::test]
    async fn test_apply_resolves_categories_by_name() {
        let db = Database::in_memory().await.unwrap();
        let outcome = SeedData::parse(SEED).unwrap().apply(&db).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                categories: 2,
                contacts: 3
            }
        );

        let contacts = db.contacts().list().await.unwrap();
        assert_eq!(contacts[0].category_name.as_deref(), Some("Family"));
        // Unknown category name falls back to uncategorized.
        assert!(contacts[1].category_id.is_none());
        assert!(contacts[2].category_id.is_none());
    }

    #[tokio::test]
    async fn test_apply_rolls_back_on_duplicate_category() {
        let db = Database::in_memory().await.unwrap();
        let data = SeedData::parse(
            r#"{ "Categories": [ { "Name": "Work" }, { "Name": "Work" } ], "Contacts": [] }"#,
        )
        .unwrap();

        assert!(data.apply(&db).await.is_err());
        assert_eq!(db.categories().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default_data.json");
        std::fs::write(&path, SEED).unwrap();

        let data = SeedData::load(&path).await.unwrap();
        assert_eq!(data.contacts.len(), 3);
        assert!(SeedData::load(&dir.path().join("missing.json")).await.is_err());
    }
}
