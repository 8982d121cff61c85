//! Order service tests
//!
//! In-memory store plus recording sessions; no network involved.

use super::allocator::PUBLIC_ID_LEN;
use super::service::{OrderService, PlacementRequest};
use super::error::OrderError;
use crate::auth::Role;
use crate::db::DbService;
use crate::db::models::Student;
use crate::db::repository::{OrderRepository, StudentRepository};
use crate::realtime::{MemorySession, NotificationDispatcher, RealtimeHub};
use chrono::{Datelike, Utc};
use shared::models::LineItem;
use shared::order::{OrderStatus, REJECTION_MESSAGE};
use shared::realtime::{Frame, FrameType, RejectedPayload, StatusUpdatedPayload};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc::UnboundedReceiver;

struct TestEnv {
    db: Surreal<Db>,
    hub: Arc<RealtimeHub>,
    service: OrderService,
}

async fn setup() -> TestEnv {
    let db = DbService::memory().await.unwrap().db;
    let hub = Arc::new(RealtimeHub::new());
    let dispatcher = Arc::new(NotificationDispatcher::new(hub.clone()));
    let service = OrderService::new(db.clone(), dispatcher);
    TestEnv { db, hub, service }
}

impl TestEnv {
    /// Connect a session and bind it to `identity`.
    fn connect_as(&self, session_id: &str, identity: &str) -> UnboundedReceiver<Frame> {
        let (session, rx) = MemorySession::channel(session_id);
        self.hub.connect(session);
        self.hub.identify(identity, session_id);
        rx
    }
}

fn line(item: &str, quantity: u32) -> LineItem {
    LineItem {
        item: item.to_string(),
        quantity,
    }
}

fn placement(items: Vec<LineItem>) -> PlacementRequest {
    PlacementRequest {
        items,
        roll_no: "B21CS001".to_string(),
        payment_ref: None,
        first_year: false,
        hostel_choice: None,
        email: None,
    }
}

fn current_year_prefix() -> String {
    format!("{:02}", Utc::now().year() % 100)
}

// ========== Placement ==========

#[tokio::test]
async fn placement_creates_pending_order_with_public_id() {
    let env = setup().await;
    let mut staff_rx = env.connect_as("s-staff", "staff:admin");

    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 2)]))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.owner_id, "student:u1");
    assert_eq!(order.public_id.len(), PUBLIC_ID_LEN);
    assert!(order.id.is_some());

    // Everyone connected sees the broadcast
    let frame = staff_rx.try_recv().unwrap();
    assert_eq!(frame.frame_type, FrameType::NewOrder);
    let record: shared::models::Order = frame.decode().unwrap();
    assert_eq!(record.public_id, order.public_id);
    assert_eq!(record.status, OrderStatus::Pending);
}

#[tokio::test]
async fn placements_never_reuse_a_live_public_id() {
    let env = setup().await;

    let mut seen = std::collections::HashSet::new();
    for _ in 0..20 {
        let order = env
            .service
            .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
            .await
            .unwrap();
        assert!(seen.insert(order.public_id.clone()), "duplicate public id");
    }
}

#[tokio::test]
async fn placement_rejects_empty_items() {
    let env = setup().await;
    let err = env
        .service
        .place_order("student:u1", placement(vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
}

#[tokio::test]
async fn placement_rejects_zero_quantity() {
    let env = setup().await;
    let err = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
}

// ========== Hostel tag ==========

#[tokio::test]
async fn hostel_tag_set_for_revalidated_first_year() {
    let env = setup().await;
    let students = StudentRepository::new(env.db.clone());
    let created = students
        .create(Student {
            id: None,
            email: format!("{}bcs001@college.edu", current_year_prefix()),
            name: "alice".to_string(),
        })
        .await
        .unwrap();
    let owner_id = created.id.unwrap().to_string();

    let mut request = placement(vec![line("menu_item:a", 1)]);
    request.first_year = true;
    request.hostel_choice = Some("boys".to_string());

    let order = env.service.place_order(&owner_id, request).await.unwrap();
    assert_eq!(order.hostel_tag.as_deref(), Some("First Year – Boys Hostel"));
}

#[tokio::test]
async fn hostel_tag_requires_matching_email_prefix() {
    let env = setup().await;

    // Client-supplied email only; prefix can never match the current year.
    let mut request = placement(vec![line("menu_item:a", 1)]);
    request.first_year = true;
    request.hostel_choice = Some("girls".to_string());
    request.email = Some("zzold@college.edu".to_string());

    let order = env
        .service
        .place_order("student:ghost", request)
        .await
        .unwrap();
    assert_eq!(order.hostel_tag, None);
}

#[tokio::test]
async fn hostel_tag_requires_the_claim_and_a_valid_hostel() {
    let env = setup().await;

    // No first-year claim
    let mut request = placement(vec![line("menu_item:a", 1)]);
    request.email = Some(format!("{}x@college.edu", current_year_prefix()));
    request.hostel_choice = Some("boys".to_string());
    let order = env
        .service
        .place_order("student:ghost", request)
        .await
        .unwrap();
    assert_eq!(order.hostel_tag, None);

    // Unknown hostel choice
    let mut request = placement(vec![line("menu_item:a", 1)]);
    request.first_year = true;
    request.email = Some(format!("{}x@college.edu", current_year_prefix()));
    request.hostel_choice = Some("staff quarters".to_string());
    let order = env
        .service
        .place_order("student:ghost", request)
        .await
        .unwrap();
    assert_eq!(order.hostel_tag, None);
}

// ========== Transitions ==========

#[tokio::test]
async fn transition_requires_staff_role() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();

    let err = env
        .service
        .transition(Role::Student, &order.public_id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));

    // No state change happened
    let stored = OrderRepository::new(env.db.clone())
        .find_by_public_id(&order.public_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn transition_resolves_public_token_and_record_id() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();

    // By public token
    let updated = env
        .service
        .transition(Role::Staff, &order.public_id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Confirmed);

    // By record id
    let record_ref = updated.id.clone().unwrap().to_string();
    let updated = env
        .service
        .transition(Role::Staff, &record_ref, OrderStatus::Prepared)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Prepared);
}

#[tokio::test]
async fn transition_rejects_skipping_ahead() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();

    let err = env
        .service
        .transition(Role::Staff, &order.public_id, OrderStatus::Prepared)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Prepared,
        }
    ));

    let stored = OrderRepository::new(env.db.clone())
        .find_by_public_id(&order.public_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn transition_to_current_status_is_rejected() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();

    let err = env
        .service
        .transition(Role::Staff, &order.public_id, OrderStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
}

#[tokio::test]
async fn rejection_notifies_only_the_connected_owner() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();

    let mut owner_rx = env.connect_as("s1", "student:u1");
    let mut other_rx = env.connect_as("s2", "student:u2");

    env.service
        .transition(Role::Staff, &order.public_id, OrderStatus::Rejected)
        .await
        .unwrap();

    let frame = owner_rx.try_recv().unwrap();
    assert_eq!(frame.frame_type, FrameType::OrderRejected);
    let payload: RejectedPayload = frame.decode().unwrap();
    assert_eq!(payload.order_id, order.public_id);
    assert_eq!(payload.message, REJECTION_MESSAGE);

    assert!(other_rx.try_recv().is_err());
}

#[tokio::test]
async fn status_change_notifies_owner_with_new_status() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();

    let mut owner_rx = env.connect_as("s1", "student:u1");

    env.service
        .transition(Role::Staff, &order.public_id, OrderStatus::Confirmed)
        .await
        .unwrap();

    let frame = owner_rx.try_recv().unwrap();
    assert_eq!(frame.frame_type, FrameType::OrderStatusUpdated);
    let payload: StatusUpdatedPayload = frame.decode().unwrap();
    assert_eq!(payload.order_id, order.public_id);
    assert_eq!(payload.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn transition_succeeds_silently_when_owner_disconnected() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();
    env.service
        .transition(Role::Staff, &order.public_id, OrderStatus::Confirmed)
        .await
        .unwrap();

    // A bystander session with no identity binding observes nothing targeted.
    let (session, mut rx) = MemorySession::channel("s-bystander");
    env.hub.connect(session);

    let updated = env
        .service
        .transition(Role::Staff, &order.public_id, OrderStatus::Prepared)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Prepared);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn transition_of_unknown_order_is_not_found() {
    let env = setup().await;
    let err = env
        .service
        .transition(Role::Staff, "ZZZZ", OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}

#[tokio::test]
async fn transition_of_swept_order_is_not_found() {
    let env = setup().await;
    let order = env
        .service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();

    // Retention removes the order out from under the workflow.
    let repo = OrderRepository::new(env.db.clone());
    repo.delete_expired(order.created_at + 1).await.unwrap();

    let err = env
        .service
        .transition(Role::Staff, &order.public_id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}

// ========== Queries ==========

#[tokio::test]
async fn list_for_owner_returns_only_their_orders() {
    let env = setup().await;
    env.service
        .place_order("student:u1", placement(vec![line("menu_item:a", 1)]))
        .await
        .unwrap();
    env.service
        .place_order("student:u2", placement(vec![line("menu_item:b", 1)]))
        .await
        .unwrap();

    let mine = env.service.list_for_owner("student:u1").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].owner_id, "student:u1");

    let all = env.service.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
}
