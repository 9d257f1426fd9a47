//! Contact storage repository.

use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};

use super::model::{Contact, ContactId};
use crate::Result;
use crate::categories::CategoryId;

/// Columns selected for every contact read, joined with the category name.
const SELECT_CONTACT: &str = r"
    SELECT c.id, c.first_name, c.last_name, c.phone_number, c.email,
           c.category_id, cat.name AS category_name
    FROM contacts c
    LEFT JOIN categories cat ON cat.id = c.category_id
";

/// Ordering shared by every list query.
const ORDER_BY_NAME: &str =
    " ORDER BY c.first_name COLLATE NOCASE, c.last_name COLLATE NOCASE, c.id";

/// Repository for contact storage and retrieval.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub(crate) const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new contact and assign its generated ID.
    ///
    /// Returns `true` if the store reported a new row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (for example when the
    /// category reference does not exist).
    pub async fn insert(&self, contact: &mut Contact) -> Result<bool> {
        let id = insert_row(&self.pool, contact).await?;
        contact.id = Some(id);
        Ok(true)
    }

    /// Update every field of an existing contact.
    ///
    /// Returns `false` if the contact is unsaved or no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn update(&self, contact: &Contact) -> Result<bool> {
        let Some(id) = contact.id else {
            return Ok(false);
        };

        let result = sqlx::query(
            r"
            UPDATE contacts SET
                first_name = ?, last_name = ?, phone_number = ?,
                email = ?, category_id = ?
            WHERE id = ?
            ",
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.phone_number)
        .bind(contact.email.as_deref())
        .bind(contact.category_id.map(|c| c.0))
        .bind(id.0)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: ContactId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get contact by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
        let sql = format!("{SELECT_CONTACT} WHERE c.id = ?");
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_contact))
    }

    /// Get all contacts ordered by first name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Contact>> {
        let sql = format!("{SELECT_CONTACT}{ORDER_BY_NAME}");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_contact).collect())
    }

    /// Contacts whose first name starts with `prefix` (case-insensitive),
    /// ordered by first name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn starting_with(&self, prefix: &str) -> Result<Vec<Contact>> {
        let pattern = format!("{}%", escape_like(&prefix.trim().to_lowercase()));
        let sql = format!(
            r"{SELECT_CONTACT} WHERE LOWER(c.first_name) LIKE ? ESCAPE '\'{ORDER_BY_NAME}"
        );
        let rows = sqlx::query(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_contact).collect())
    }

    /// Contacts assigned to `category`, or uncategorized contacts for `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn in_category(&self, category: Option<CategoryId>) -> Result<Vec<Contact>> {
        let rows = if let Some(id) = category {
            let sql = format!("{SELECT_CONTACT} WHERE c.category_id = ?{ORDER_BY_NAME}");
            sqlx::query(&sql).bind(id.0).fetch_all(&self.pool).await?
        } else {
            let sql = format!("{SELECT_CONTACT} WHERE c.category_id IS NULL{ORDER_BY_NAME}");
            sqlx::query(&sql).fetch_all(&self.pool).await?
        };

        Ok(rows.iter().map(row_to_contact).collect())
    }

    /// Contacts that have a non-empty email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn with_email(&self) -> Result<Vec<Contact>> {
        let sql = format!(
            "{SELECT_CONTACT} WHERE c.email IS NOT NULL AND TRIM(c.email) != ''{ORDER_BY_NAME}"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_contact).collect())
    }

    /// Number of stored contacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.unsigned_abs())
    }
}

/// Insert `contact` through any executor (pool or open transaction).
pub(crate) async fn insert_row<'e, E>(executor: E, contact: &Contact) -> Result<ContactId>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r"
        INSERT INTO contacts (first_name, last_name, phone_number, email, category_id)
        VALUES (?, ?, ?, ?, ?)
        ",
    )
    .bind(&contact.first_name)
    .bind(&contact.last_name)
    .bind(&contact.phone_number)
    .bind(contact.email.as_deref())
    .bind(contact.category_id.map(|c| c.0))
    .execute(executor)
    .await?;

    Ok(ContactId::new(result.last_insert_rowid()))
}

/// Escape `%`, `_` and `\` so user input matches literally in a LIKE pattern.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Convert a database row to a Contact.
fn row_to_contact(row: &SqliteRow) -> Contact {
    Contact {
        id: Some(ContactId::new(row.get("id"))),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        phone_number: row.get("phone_number"),
        email: row.get("email"),
        category_id: row
            .get::<Option<i64>, _>("category_id")
            .map(CategoryId::new),
        category_name: row.get("category_name"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::categories::Category;

    async fn seeded() -> (Database, Category) {
        let db = Database::in_memory().await.unwrap();
        let mut work = Category::new("Work");
        db.categories().insert(&mut work).await.unwrap();

        let repo = db.contacts();
        for mut contact in [
            Contact::new("marko", "Ivic", "+38591111").with_email("marko@example.com"),
            Contact::new("Ana", "Horvat", "+38592222").with_category(Some(&work)),
            Contact::new("Maja", "Kovac", "+38593333")
                .with_email("maja@example.com")
                .with_category(Some(&work)),
            Contact::new("Ivan", "Babic", "+38594444"),
        ] {
            repo.insert(&mut contact).await.unwrap();
        }

        (db, work)
    }

    fn first_names(contacts: &[Contact]) -> Vec<&str> {
        contacts.iter().map(|c| c.first_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let db = Database::in_memory().await.unwrap();
        let mut contact = Contact::new("Ana", "Horvat", "+385911234567");

        assert!(db.contacts().insert(&mut contact).await.unwrap());
        let id = contact.id.unwrap();

        let stored = db.contacts().get(id).await.unwrap().unwrap();
        assert_eq!(stored.full_name(), "Ana Horvat");
        assert_eq!(stored.phone_number, "+385911234567");
        assert!(stored.email.is_none());
        assert!(stored.category_name.is_none());
    }

    #[tokio::test]
    async fn test_list_ordered_by_first_name() {
        let (db, _) = seeded().await;
        let contacts = db.contacts().list().await.unwrap();
        assert_eq!(first_names(&contacts), vec!["Ana", "Ivan", "Maja", "marko"]);
    }

    #[tokio::test]
    async fn test_starting_with_is_case_insensitive() {
        let (db, _) = seeded().await;

        let contacts = db.contacts().starting_with("MA").await.unwrap();
        assert_eq!(first_names(&contacts), vec!["Maja", "marko"]);

        let contacts = db.contacts().starting_with("mar").await.unwrap();
        assert_eq!(first_names(&contacts), vec!["marko"]);

        // Last names are not searched.
        assert!(db.contacts().starting_with("horvat").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_starting_with_treats_wildcards_literally() {
        let (db, _) = seeded().await;
        assert!(db.contacts().starting_with("%").await.unwrap().is_empty());
        assert!(db.contacts().starting_with("_a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_category() {
        let (db, work) = seeded().await;

        let contacts = db.contacts().in_category(work.id).await.unwrap();
        assert_eq!(first_names(&contacts), vec!["Ana", "Maja"]);
        assert!(contacts.iter().all(|c| c.category_name.as_deref() == Some("Work")));

        let uncategorized = db.contacts().in_category(None).await.unwrap();
        assert_eq!(first_names(&uncategorized), vec!["Ivan", "marko"]);
    }

    #[tokio::test]
    async fn test_with_email() {
        let (db, _) = seeded().await;
        let contacts = db.contacts().with_email().await.unwrap();
        assert_eq!(first_names(&contacts), vec!["Maja", "marko"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, work) = seeded().await;
        let repo = db.contacts();

        let mut ivan = repo.starting_with("ivan").await.unwrap().remove(0);
        ivan.phone_number = "+1000".to_string();
        ivan.email = Some("ivan@example.com".to_string());
        ivan.set_category(Some(&work));
        assert!(repo.update(&ivan).await.unwrap());

        let stored = repo.get(ivan.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.phone_number, "+1000");
        assert_eq!(stored.category_name.as_deref(), Some("Work"));

        assert!(repo.delete(ivan.id.unwrap()).await.unwrap());
        assert!(!repo.delete(ivan.id.unwrap()).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_unsaved_contact_reports_no_change() {
        let db = Database::in_memory().await.unwrap();
        let contact = Contact::new("Ana", "Horvat", "+1");
        assert!(!db.contacts().update(&contact).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_with_unknown_category_fails() {
        let db = Database::in_memory().await.unwrap();
        let mut contact = Contact::new("Ana", "Horvat", "+1");
        contact.category_id = Some(CategoryId::new(42));
        assert!(db.contacts().insert(&mut contact).await.is_err());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("a%b_c\\"), "a\\%b\\_c\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
