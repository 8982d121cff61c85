//! Public order id allocator
//!
//! Short human-facing tokens for orders: 4 characters from `A-Z0-9`
//! (36^4 ≈ 1.68M), so collisions stay rare with a few thousand live
//! orders. Every returned token has passed a uniqueness check against the
//! store; a collision draws a fresh candidate, a store failure surfaces
//! immediately as a transient error. The allocator never fabricates an
//! unchecked token.

use rand::Rng;

use super::error::OrderError;
use crate::db::repository::OrderRepository;

/// Token length
pub const PUBLIC_ID_LEN: usize = 4;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub struct IdAllocator {
    orders: OrderRepository,
}

impl IdAllocator {
    pub fn new(orders: OrderRepository) -> Self {
        Self { orders }
    }

    /// Draw one candidate token.
    fn candidate() -> String {
        let mut rng = rand::thread_rng();
        (0..PUBLIC_ID_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Allocate a token that is unique among retained orders.
    pub async fn allocate(&self) -> Result<String, OrderError> {
        self.allocate_with(Self::candidate).await
    }

    /// Allocation loop with an injectable candidate source (tests force
    /// collisions deterministically through this seam).
    async fn allocate_with<F>(&self, mut next_candidate: F) -> Result<String, OrderError>
    where
        F: FnMut() -> String,
    {
        loop {
            let candidate = next_candidate();
            match self.orders.public_id_exists(&candidate).await {
                Ok(false) => return Ok(candidate),
                Ok(true) => {
                    tracing::debug!(candidate = %candidate, "Public id collision, retrying");
                }
                Err(e) => {
                    return Err(OrderError::Transient(format!(
                        "Public id check failed: {e}"
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::Order;
    use shared::order::OrderStatus;

    async fn repo() -> OrderRepository {
        let service = DbService::memory().await.unwrap();
        OrderRepository::new(service.db)
    }

    fn stored_order(public_id: &str) -> Order {
        Order {
            id: None,
            public_id: public_id.to_string(),
            owner_id: "student:u1".to_string(),
            line_items: vec![],
            status: OrderStatus::Pending,
            roll_no: "B21CS001".to_string(),
            payment_ref: None,
            hostel_tag: None,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn candidates_have_the_right_shape() {
        for _ in 0..100 {
            let c = IdAllocator::candidate();
            assert_eq!(c.len(), PUBLIC_ID_LEN);
            assert!(c.bytes().all(|b| ALPHABET.contains(&b)), "bad candidate {c}");
        }
    }

    #[tokio::test]
    async fn allocate_returns_checked_token() {
        let orders = repo().await;
        let allocator = IdAllocator::new(orders.clone());

        let id = allocator.allocate().await.unwrap();
        assert_eq!(id.len(), PUBLIC_ID_LEN);
        assert!(!orders.public_id_exists(&id).await.unwrap());
    }

    #[tokio::test]
    async fn collision_draws_a_fresh_candidate() {
        let orders = repo().await;
        orders.create(stored_order("AAAA")).await.unwrap();

        let allocator = IdAllocator::new(orders);
        let mut draws = vec!["AAAA".to_string(), "AAAA".to_string(), "BBBB".to_string()]
            .into_iter();

        let id = allocator
            .allocate_with(move || draws.next().expect("ran out of scripted candidates"))
            .await
            .unwrap();
        assert_eq!(id, "BBBB");
    }
}
