//! Order Repository
//!
//! Single-document reads and writes for orders. Status mutation goes
//! through `update_status` only; the order service owns which transitions
//! are legal.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Order;
use shared::order::OrderStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// All retained orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders placed by one user, newest first
    pub async fn find_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Order>> {
        let owner = owner_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE owner_id = $owner ORDER BY created_at DESC")
            .bind(("owner", owner))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find by storage identity
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    /// Find by the 4-character public token
    pub async fn find_by_public_id(&self, public_id: &str) -> RepoResult<Option<Order>> {
        let pid = public_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE public_id = $pid LIMIT 1")
            .bind(("pid", pid))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Resolve a caller-supplied reference.
    ///
    /// Tries the storage-identity shape first and falls back to the public
    /// token; callers may hold either.
    pub async fn resolve(&self, reference: &str) -> RepoResult<Option<Order>> {
        if let Ok(id) = reference.parse::<RecordId>()
            && id.table() == TABLE
        {
            return self.find_by_id(&id).await;
        }
        self.find_by_public_id(reference).await
    }

    /// Set the status of a single order (read-modify-write is the caller's;
    /// this is the single-document write). Returns the updated record, or
    /// `None` if the order no longer exists.
    pub async fn update_status(
        &self,
        id: &RecordId,
        status: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $order SET status = $status RETURN AFTER")
            .bind(("order", id.clone()))
            .bind(("status", status))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Consistency check used by the public-id allocator.
    pub async fn public_id_exists(&self, public_id: &str) -> RepoResult<bool> {
        let pid = public_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE public_id FROM order WHERE public_id = $pid LIMIT 1")
            .bind(("pid", pid))
            .await?;
        let hits: Vec<String> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    /// Remove orders created before `cutoff_ms`. Returns the removed count.
    pub async fn delete_expired(&self, cutoff_ms: i64) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("DELETE FROM order WHERE created_at < $cutoff RETURN BEFORE")
            .bind(("cutoff", cutoff_ms))
            .await?;
        let removed: Vec<Order> = result.take(0)?;
        Ok(removed.len())
    }
}
