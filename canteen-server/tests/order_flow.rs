//! Order workflow integration tests
//!
//! Runs against the fully assembled server state (in-memory store +
//! realtime hub), the way the HTTP and TCP layers drive it.

use canteen_server::auth::Role;
use canteen_server::core::{Config, ServerState};
use canteen_server::db::DbService;
use canteen_server::orders::PlacementRequest;
use canteen_server::realtime::MemorySession;
use shared::models::LineItem;
use shared::order::{OrderStatus, REJECTION_MESSAGE};
use shared::realtime::{FrameType, RejectedPayload};
use std::collections::HashSet;
use std::sync::Arc;

async fn test_state() -> ServerState {
    let db = DbService::memory().await.unwrap().db;
    ServerState::with_db(Config::default(), db)
}

fn placement(item: &str, quantity: u32) -> PlacementRequest {
    PlacementRequest {
        items: vec![LineItem {
            item: item.to_string(),
            quantity,
        }],
        roll_no: "B21CS001".to_string(),
        payment_ref: Some("uploads/abc.jpg".to_string()),
        first_year: false,
        hostel_choice: None,
        email: None,
    }
}

#[tokio::test]
async fn full_lifecycle_with_realtime_observers() {
    let state = test_state().await;

    // A staff dashboard and the ordering student are both connected.
    let (staff_session, mut staff_rx) = MemorySession::channel("s-staff");
    state.hub.connect(staff_session);
    state.hub.identify("staff:admin", "s-staff");

    let (student_session, mut student_rx) = MemorySession::channel("s-student");
    state.hub.connect(student_session);
    state.hub.identify("student:u1", "s-student");

    // Place
    let order = state
        .orders
        .place_order("student:u1", placement("menu_item:maggi", 2))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.public_id.len(), 4);

    // Both sessions see the broadcast
    assert_eq!(staff_rx.try_recv().unwrap().frame_type, FrameType::NewOrder);
    assert_eq!(
        student_rx.try_recv().unwrap().frame_type,
        FrameType::NewOrder
    );

    // Walk the happy path
    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Prepared,
        OrderStatus::Delivered,
    ] {
        let updated = state
            .orders
            .transition(Role::Staff, &order.public_id, target)
            .await
            .unwrap();
        assert_eq!(updated.status, target);

        // Targeted: only the owner hears about it
        let frame = student_rx.try_recv().unwrap();
        assert_eq!(frame.frame_type, FrameType::OrderStatusUpdated);
        assert!(staff_rx.try_recv().is_err());
    }

    // Terminal: no further transitions
    let err = state
        .orders
        .transition(Role::Staff, &order.public_id, OrderStatus::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        canteen_server::OrderError::InvalidTransition { .. }
    ));
}

#[tokio::test]
async fn rejection_carries_the_canonical_message() {
    let state = test_state().await;

    let order = state
        .orders
        .place_order("student:u1", placement("menu_item:tea", 1))
        .await
        .unwrap();

    let (session, mut rx) = MemorySession::channel("s1");
    state.hub.connect(session);
    state.hub.identify("student:u1", "s1");

    state
        .orders
        .transition(Role::Staff, &order.public_id, OrderStatus::Rejected)
        .await
        .unwrap();

    let frame = rx.try_recv().unwrap();
    assert_eq!(frame.frame_type, FrameType::OrderRejected);
    let payload: RejectedPayload = frame.decode().unwrap();
    assert_eq!(payload.order_id, order.public_id);
    assert_eq!(payload.message, REJECTION_MESSAGE);
}

#[tokio::test]
async fn concurrent_placements_yield_distinct_public_ids() {
    const PLACEMENTS: usize = 50;

    let state = Arc::new(test_state().await);

    let mut handles = Vec::with_capacity(PLACEMENTS);
    for i in 0..PLACEMENTS {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state
                .orders
                .place_order(
                    &format!("student:u{}", i),
                    placement("menu_item:maggi", 1),
                )
                .await
                .unwrap()
                .public_id
        }));
    }

    let mut ids = HashSet::new();
    for result in futures::future::join_all(handles).await {
        let public_id = result.unwrap();
        assert!(
            ids.insert(public_id.clone()),
            "public id {} allocated twice",
            public_id
        );
    }
    assert_eq!(ids.len(), PLACEMENTS);
}
