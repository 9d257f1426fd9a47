//! Domain service over the phonebook store.

use std::fmt::Display;
use std::path::Path;

use tracing::{error, info, warn};

use crate::Database;
use crate::categories::{Category, CategoryId, CategoryRepository, CategorySummary};
use crate::contacts::{Contact, ContactRepository};
use crate::seed::{SeedData, SeedOutcome};

/// CRUD operations, seeding and queries used by the console application.
///
/// Write operations report whether the store recorded a change. Store
/// errors are logged and reported as `false`; read operations return an
/// empty list on error.
#[derive(Debug, Clone)]
pub struct PhonebookService {
    db: Database,
    contacts: ContactRepository,
    categories: CategoryRepository,
    auto_seed: bool,
}

impl PhonebookService {
    /// Creates a service over `db`. `auto_seed` controls [`Self::auto_seed`].
    #[must_use]
    pub fn new(db: Database, auto_seed: bool) -> Self {
        Self {
            contacts: db.contacts(),
            categories: db.categories(),
            db,
            auto_seed,
        }
    }

    /// Populates an empty store from the seed file at `path`.
    ///
    /// Does nothing when auto-seeding is disabled or when either table
    /// already has rows. A missing, unreadable or invalid seed file is
    /// logged and leaves the store untouched.
    pub async fn auto_seed(&self, path: &Path) -> SeedOutcome {
        if !self.auto_seed {
            return SeedOutcome::Disabled;
        }

        match self.is_empty().await {
            Ok(true) => {}
            Ok(false) => return SeedOutcome::StoreNotEmpty,
            Err(e) => {
                error!("Could not check store before seeding: {e}");
                return SeedOutcome::Failed;
            }
        }

        let data = match SeedData::load(path).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping seed from {}: {e}", path.display());
                return SeedOutcome::Failed;
            }
        };

        match data.apply(&self.db).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Seeding from {} failed: {e}", path.display());
                SeedOutcome::Failed
            }
        }
    }

    async fn is_empty(&self) -> crate::Result<bool> {
        Ok(self.contacts.count().await? == 0 && self.categories.count().await? == 0)
    }

    /// Adds a contact, assigning its ID.
    pub async fn insert_contact(&self, contact: &mut Contact) -> bool {
        changed("insert contact", self.contacts.insert(contact).await)
    }

    /// Saves every field of an existing contact.
    pub async fn update_contact(&self, contact: &Contact) -> bool {
        changed("update contact", self.contacts.update(contact).await)
    }

    /// Removes a contact.
    pub async fn delete_contact(&self, contact: &Contact) -> bool {
        let Some(id) = contact.id else {
            return false;
        };
        changed("delete contact", self.contacts.delete(id).await)
    }

    /// Adds a category, assigning its ID.
    pub async fn insert_category(&self, category: &mut Category) -> bool {
        changed("insert category", self.categories.insert(category).await)
    }

    /// Renames an existing category.
    pub async fn update_category(&self, category: &Category) -> bool {
        changed("update category", self.categories.update(category).await)
    }

    /// Removes a category; its contacts become uncategorized.
    pub async fn delete_category(&self, category: &Category) -> bool {
        let Some(id) = category.id else {
            return false;
        };
        let deleted = changed("delete category", self.categories.delete(id).await);
        if deleted {
            info!("Deleted category {}", category.name);
        }
        deleted
    }

    /// All contacts ordered by first name.
    pub async fn all_contacts(&self) -> Vec<Contact> {
        rows("list contacts", self.contacts.list().await)
    }

    /// Contacts whose first name starts with `prefix`, ignoring case.
    pub async fn contacts_starting_with(&self, prefix: &str) -> Vec<Contact> {
        rows("search contacts", self.contacts.starting_with(prefix).await)
    }

    /// Contacts in `category`, or uncategorized contacts for `None`.
    pub async fn contacts_by_category(&self, category: Option<CategoryId>) -> Vec<Contact> {
        rows(
            "list contacts by category",
            self.contacts.in_category(category).await,
        )
    }

    /// Contacts that can be emailed.
    pub async fn contacts_with_email(&self) -> Vec<Contact> {
        rows("list contacts with email", self.contacts.with_email().await)
    }

    /// All categories ordered by name.
    pub async fn all_categories(&self) -> Vec<Category> {
        rows("list categories", self.categories.list().await)
    }

    /// All categories with their contact counts.
    pub async fn categories_with_counts(&self) -> Vec<CategorySummary> {
        rows(
            "list categories with counts",
            self.categories.list_with_counts().await,
        )
    }
}

fn changed<E: Display>(operation: &str, result: Result<bool, E>) -> bool {
    match result {
        Ok(changed) => changed,
        Err(e) => {
            error!("Failed to {operation}: {e}");
            false
        }
    }
}

fn rows<T, E: Display>(operation: &str, result: Result<Vec<T>, E>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!("Failed to {operation}: {e}");
        Vec::new()
    })
}
