//! Order service
//!
//! The single orchestrator for placement and transition requests. Nothing
//! else calls the allocator, the lifecycle or the dispatcher.

use chrono::{Datelike, Utc};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::allocator::IdAllocator;
use super::error::OrderError;
use super::lifecycle::{self, NoticeKind};
use crate::auth::Role;
use crate::db::models::Order;
use crate::db::repository::{OrderRepository, StudentRepository};
use crate::realtime::{NotificationDispatcher, OrderNotice};
use shared::models::LineItem;
use shared::order::{OrderStatus, REJECTION_MESSAGE};

/// Placement request, as accepted from a student.
///
/// `first_year`, `hostel_choice` and `email` feed the hostel tag; the
/// claimed flag is revalidated against the owner's canonical email before
/// any tag is applied.
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    pub items: Vec<LineItem>,
    pub roll_no: String,
    pub payment_ref: Option<String>,
    pub first_year: bool,
    pub hostel_choice: Option<String>,
    pub email: Option<String>,
}

pub struct OrderService {
    orders: OrderRepository,
    students: StudentRepository,
    allocator: IdAllocator,
    dispatcher: Arc<NotificationDispatcher>,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, dispatcher: Arc<NotificationDispatcher>) -> Self {
        let orders = OrderRepository::new(db.clone());
        Self {
            allocator: IdAllocator::new(orders.clone()),
            orders,
            students: StudentRepository::new(db),
            dispatcher,
        }
    }

    /// Place a new order for `owner_id`.
    ///
    /// Validates line items, recomputes the hostel tag, allocates a public
    /// id, persists, and broadcasts the `newOrder` event.
    pub async fn place_order(
        &self,
        owner_id: &str,
        request: PlacementRequest,
    ) -> Result<Order, OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }
        if request.items.iter().any(|line| line.quantity < 1) {
            return Err(OrderError::Validation(
                "Item quantity must be at least 1".to_string(),
            ));
        }

        let hostel_tag = self.compute_hostel_tag(owner_id, &request).await;
        let public_id = self.allocator.allocate().await?;

        let order = Order {
            id: None,
            public_id,
            owner_id: owner_id.to_string(),
            line_items: request.items,
            status: OrderStatus::Pending,
            roll_no: request.roll_no,
            payment_ref: request.payment_ref,
            hostel_tag,
            created_at: Utc::now().timestamp_millis(),
        };

        let created = self.orders.create(order).await?;

        self.dispatcher
            .dispatch(OrderNotice::Created(created.clone().into()))
            .await;

        tracing::info!(
            order = %created.public_id,
            owner = %created.owner_id,
            "Order placed"
        );
        Ok(created)
    }

    /// Apply a status transition requested by a staff member.
    ///
    /// `order_ref` may be a storage identity or the public token. On
    /// success the updated order is returned and the matching notice is
    /// dispatched; on `NotFound`/`InvalidTransition` nothing changes.
    pub async fn transition(
        &self,
        actor_role: Role,
        order_ref: &str,
        target: OrderStatus,
    ) -> Result<Order, OrderError> {
        if !actor_role.is_staff() {
            return Err(OrderError::Forbidden(
                "Only staff may change order status".to_string(),
            ));
        }

        let order = self
            .orders
            .resolve(order_ref)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Order {} not found", order_ref)))?;

        let notice_kind = lifecycle::apply(order.status, target)?;

        let id = order
            .id
            .clone()
            .ok_or_else(|| OrderError::Transient("Order record is missing its id".to_string()))?;

        // The order may have been swept between resolve and update; the
        // update reports that as an absent record.
        let updated = self
            .orders
            .update_status(&id, target)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Order {} not found", order_ref)))?;

        let notice = match notice_kind {
            NoticeKind::Rejected => OrderNotice::Rejected {
                owner_id: updated.owner_id.clone(),
                public_id: updated.public_id.clone(),
                message: REJECTION_MESSAGE.to_string(),
            },
            NoticeKind::StatusChanged => OrderNotice::StatusChanged {
                owner_id: updated.owner_id.clone(),
                public_id: updated.public_id.clone(),
                status: updated.status,
            },
        };
        self.dispatcher.dispatch(notice).await;

        tracing::info!(
            order = %updated.public_id,
            from = %order.status,
            to = %updated.status,
            "Order status changed"
        );
        Ok(updated)
    }

    /// All retained orders, newest first (staff dashboards).
    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.find_all().await?)
    }

    /// Orders placed by one user, newest first.
    pub async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.find_by_owner(owner_id).await?)
    }

    /// Compute the hostel tag for a placement.
    ///
    /// The tag applies only when the owner's email carries the current
    /// two-digit year prefix AND the client claimed first-year AND the
    /// hostel choice is one of the known hostels. The canonical email from
    /// the student record takes precedence over the client-supplied one;
    /// any lookup failure degrades to no tag.
    async fn compute_hostel_tag(&self, owner_id: &str, request: &PlacementRequest) -> Option<String> {
        if !request.first_year {
            return None;
        }

        let hostel = match request.hostel_choice.as_deref()?.to_ascii_lowercase().as_str() {
            "boys" => "Boys Hostel",
            "girls" => "Girls Hostel",
            _ => return None,
        };

        let email = match self.students.email_of(owner_id).await {
            Ok(Some(email)) => email,
            Ok(None) => request.email.clone()?,
            Err(e) => {
                tracing::warn!(owner = %owner_id, error = %e, "Student lookup failed, skipping hostel tag");
                return None;
            }
        };

        let current_yy = format!("{:02}", Utc::now().year() % 100);
        if email.to_ascii_lowercase().get(0..2)? == current_yy {
            Some(format!("First Year – {hostel}"))
        } else {
            None
        }
    }
}
