//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id(id: &str) -> RecordId {
        if let Ok(rid) = id.parse::<RecordId>()
            && rid.table() == TABLE
        {
            rid
        } else {
            RecordId::from_table_key(TABLE, id)
        }
    }

    /// All menu items ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.base.db().select(Self::record_id(id)).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            name: data.name,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            available: true,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Partial update (MERGE semantics)
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let record_id = Self::record_id(id);
        self.base
            .db()
            .query("UPDATE $item MERGE $data")
            .bind(("item", record_id.clone()))
            .bind(("data", data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Set availability of a single item
    pub async fn set_availability(&self, id: &str, available: bool) -> RepoResult<Option<MenuItem>> {
        let record_id = Self::record_id(id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $item SET available = $available RETURN AFTER")
            .bind(("item", record_id))
            .bind(("available", available))
            .await?;
        let updated: Vec<MenuItem> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Set availability of every item (update-by-filter). Returns how many
    /// items were touched.
    pub async fn set_all_availability(&self, available: bool) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("UPDATE menu_item SET available = $available RETURN AFTER")
            .bind(("available", available))
            .await?;
        let updated: Vec<MenuItem> = result.take(0)?;
        Ok(updated.len())
    }

    /// Hard delete. Returns `false` when the item did not exist.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        let _removed: Option<MenuItem> = self.base.db().delete(Self::record_id(id)).await?;
        Ok(true)
    }
}
