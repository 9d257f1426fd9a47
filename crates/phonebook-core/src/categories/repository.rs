//! Category storage repository.

use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};
use tracing::debug;

use super::model::{Category, CategoryId, CategorySummary};
use crate::Result;

/// Repository for category storage and retrieval.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub(crate) const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new category and assign its generated ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails, including when a
    /// category with exactly the same name already exists.
    pub async fn insert(&self, category: &mut Category) -> Result<bool> {
        let id = insert_row(&self.pool, &category.name).await?;
        category.id = Some(id);
        Ok(true)
    }

    /// Rename an existing category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn update(&self, category: &Category) -> Result<bool> {
        let Some(id) = category.id else {
            return Ok(false);
        };

        let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(&category.name)
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a category.
    ///
    /// Contacts in the category are kept and become uncategorized. The
    /// detach and the delete run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: CategoryId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("UPDATE contacts SET category_id = NULL WHERE category_id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("Deleted category {id}, detached {detached} contact(s)");
        Ok(result.rows_affected() > 0)
    }

    /// Get category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_category))
    }

    /// Find a category by its exact (case-sensitive) name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        find_by_name(&self.pool, name).await
    }

    /// Get all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name COLLATE NOCASE")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_category).collect())
    }

    /// Get all categories with the number of contacts in each.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_counts(&self) -> Result<Vec<CategorySummary>> {
        let rows = sqlx::query(
            r"
            SELECT cat.id, cat.name, COUNT(c.id) AS contact_count
            FROM categories cat
            LEFT JOIN contacts c ON c.category_id = cat.id
            GROUP BY cat.id, cat.name
            ORDER BY cat.name COLLATE NOCASE
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let summaries = rows
            .iter()
            .map(|row| CategorySummary {
                category: row_to_category(row),
                contact_count: row.get::<i64, _>("contact_count") as u32,
            })
            .collect();

        Ok(summaries)
    }

    /// Number of stored categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.unsigned_abs())
    }
}

/// Insert a category named `name` through any executor.
pub(crate) async fn insert_row<'e, E>(executor: E, name: &str) -> Result<CategoryId>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(executor)
        .await?;

    Ok(CategoryId::new(result.last_insert_rowid()))
}

/// Look up a category by exact name through any executor.
pub(crate) async fn find_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Category>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT id, name FROM categories WHERE name = ?")
        .bind(name)
        .fetch_optional(executor)
        .await?;

    Ok(row.as_ref().map(row_to_category))
}

/// Convert a database row to a Category.
fn row_to_category(row: &SqliteRow) -> Category {
    Category {
        id: Some(CategoryId::new(row.get("id"))),
        name: row.get("name"),
    }
}
