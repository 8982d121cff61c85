//! Notification dispatcher
//!
//! Decides broadcast vs targeted delivery for each order/menu event and
//! performs the send. Delivery is advisory: the dispatcher never raises
//! errors for a missed or failed send and never mutates order state;
//! clients re-derive truth from the next state read.

use shared::models::Order;
use shared::order::OrderStatus;
use shared::realtime::{
    Frame, ItemAvailabilityPayload, ItemRemovedPayload, RejectedPayload, StatusUpdatedPayload,
};
use std::sync::Arc;

use super::hub::RealtimeHub;

/// Outbound event produced by order placement, a lifecycle transition, or
/// a menu mutation.
#[derive(Debug, Clone)]
pub enum OrderNotice {
    /// New order placed (broadcast, full record)
    Created(Order),
    /// Order moved to a new status (targeted at the owner)
    StatusChanged {
        owner_id: String,
        public_id: String,
        status: OrderStatus,
    },
    /// Order rejected (targeted at the owner, carries the explanation)
    Rejected {
        owner_id: String,
        public_id: String,
        message: String,
    },
    /// Menu contents changed (broadcast; clients refetch)
    MenuUpdated,
    /// One item toggled (broadcast)
    ItemAvailabilityChanged { item_id: String, available: bool },
    /// One item removed (broadcast)
    ItemRemoved { item_id: String },
}

pub struct NotificationDispatcher {
    hub: Arc<RealtimeHub>,
}

impl NotificationDispatcher {
    pub fn new(hub: Arc<RealtimeHub>) -> Self {
        Self { hub }
    }

    /// Route and send one notice.
    pub async fn dispatch(&self, notice: OrderNotice) {
        match notice {
            OrderNotice::Created(order) => {
                self.hub.broadcast(&Frame::new_order(&order)).await;
            }
            OrderNotice::StatusChanged {
                owner_id,
                public_id,
                status,
            } => {
                let frame = Frame::status_updated(&StatusUpdatedPayload {
                    order_id: public_id,
                    status,
                });
                self.send_to_owner(&owner_id, frame).await;
            }
            OrderNotice::Rejected {
                owner_id,
                public_id,
                message,
            } => {
                let frame = Frame::rejected(&RejectedPayload {
                    order_id: public_id,
                    message,
                });
                self.send_to_owner(&owner_id, frame).await;
            }
            OrderNotice::MenuUpdated => {
                self.hub.broadcast(&Frame::menu_updated()).await;
            }
            OrderNotice::ItemAvailabilityChanged { item_id, available } => {
                let frame = Frame::item_availability(&ItemAvailabilityPayload {
                    item_id,
                    available,
                });
                self.hub.broadcast(&frame).await;
            }
            OrderNotice::ItemRemoved { item_id } => {
                self.hub
                    .broadcast(&Frame::item_removed(&ItemRemovedPayload { item_id }))
                    .await;
            }
        }
    }

    /// Targeted delivery to the session owned by `owner_id`, if any.
    ///
    /// Absence means the owner is not connected: drop silently, they will
    /// see the new state on their next read. A send failure means the
    /// handle went stale between lookup and write; same treatment.
    async fn send_to_owner(&self, owner_id: &str, frame: Frame) {
        match self.hub.registry().lookup(owner_id) {
            Some(session) => {
                if let Err(e) = session.send(&frame).await {
                    tracing::debug!(
                        user = %owner_id,
                        event = %frame.frame_type,
                        error = %e,
                        "Targeted send to stale session failed, dropping"
                    );
                }
            }
            None => {
                tracing::debug!(
                    user = %owner_id,
                    event = %frame.frame_type,
                    "Owner not connected, notification dropped"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::MemorySession;
    use shared::order::REJECTION_MESSAGE;
    use shared::realtime::FrameType;

    fn hub_with_dispatcher() -> (Arc<RealtimeHub>, NotificationDispatcher) {
        let hub = Arc::new(RealtimeHub::new());
        let dispatcher = NotificationDispatcher::new(hub.clone());
        (hub, dispatcher)
    }

    fn order(public_id: &str, owner_id: &str) -> Order {
        Order {
            id: Some(format!("order:{}", public_id.to_lowercase())),
            public_id: public_id.to_string(),
            owner_id: owner_id.to_string(),
            items: vec![],
            status: OrderStatus::Pending,
            roll_no: "B21CS001".to_string(),
            payment_ref: None,
            hostel_tag: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn created_is_broadcast_to_all_sessions() {
        let (hub, dispatcher) = hub_with_dispatcher();
        let (staff, mut rx_staff) = MemorySession::channel("s-staff");
        let (student, mut rx_student) = MemorySession::channel("s-student");
        hub.connect(staff);
        hub.connect(student);

        dispatcher
            .dispatch(OrderNotice::Created(order("A1B2", "u1")))
            .await;

        let frame = rx_staff.try_recv().unwrap();
        assert_eq!(frame.frame_type, FrameType::NewOrder);
        let record: Order = frame.decode().unwrap();
        assert_eq!(record.public_id, "A1B2");
        assert_eq!(
            rx_student.try_recv().unwrap().frame_type,
            FrameType::NewOrder
        );
    }

    #[tokio::test]
    async fn rejected_goes_only_to_the_owner() {
        let (hub, dispatcher) = hub_with_dispatcher();
        let (owner, mut rx_owner) = MemorySession::channel("s1");
        let (other, mut rx_other) = MemorySession::channel("s2");
        hub.connect(owner);
        hub.connect(other);
        hub.identify("u1", "s1");
        hub.identify("u2", "s2");

        dispatcher
            .dispatch(OrderNotice::Rejected {
                owner_id: "u1".to_string(),
                public_id: "A1B2".to_string(),
                message: REJECTION_MESSAGE.to_string(),
            })
            .await;

        let frame = rx_owner.try_recv().unwrap();
        assert_eq!(frame.frame_type, FrameType::OrderRejected);
        let payload: shared::realtime::RejectedPayload = frame.decode().unwrap();
        assert_eq!(payload.order_id, "A1B2");
        assert_eq!(payload.message, REJECTION_MESSAGE);

        assert!(rx_other.try_recv().is_err());
    }

    #[tokio::test]
    async fn status_change_for_disconnected_owner_is_dropped_silently() {
        let (_hub, dispatcher) = hub_with_dispatcher();

        // No session for u1; dispatch must not panic or error.
        dispatcher
            .dispatch(OrderNotice::StatusChanged {
                owner_id: "u1".to_string(),
                public_id: "A1B2".to_string(),
                status: OrderStatus::Prepared,
            })
            .await;
    }

    #[tokio::test]
    async fn stale_handle_send_is_swallowed() {
        let (hub, dispatcher) = hub_with_dispatcher();
        let (owner, rx) = MemorySession::channel("s1");
        hub.connect(owner);
        hub.identify("u1", "s1");
        drop(rx);

        dispatcher
            .dispatch(OrderNotice::StatusChanged {
                owner_id: "u1".to_string(),
                public_id: "A1B2".to_string(),
                status: OrderStatus::Confirmed,
            })
            .await;
    }
}
