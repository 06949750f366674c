use trivia_core::model::{Category, CategoryId};

use super::SqliteRepository;
use super::mapping::{category_id_to_i64, category_key, db_err, map_category_row};
use crate::repository::{CategoryRepository, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, type
            FROM categories
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut categories = Vec::with_capacity(rows.len());
        for row in rows {
            categories.push(map_category_row(&row)?);
        }
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let Some(key) = category_key(id) else {
            return Ok(None);
        };
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_category_row).transpose()
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO categories (id, type)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET type = excluded.type
            ",
        )
        .bind(category_id_to_i64(category.id())?)
        .bind(category.name().as_str().to_owned())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}
