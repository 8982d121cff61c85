//! Order API Module
//!
//! | path | method | role | action |
//! |------|--------|------|--------|
//! | /api/orders | GET | staff | list all retained orders |
//! | /api/orders/my | GET | student | list own orders |
//! | /api/orders | POST | student | place an order |
//! | /api/orders/{id} | PUT | staff | status transition |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::place))
        .route("/my", get(handler::list_my))
        .route("/{id}", put(handler::update_status))
}
