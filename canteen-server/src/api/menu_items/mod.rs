//! Menu Item API Module
//!
//! | path | method | role | action |
//! |------|--------|------|--------|
//! | /api/items | GET | any | list menu |
//! | /api/items | POST | staff | add item |
//! | /api/items/{id} | PUT | staff | update item |
//! | /api/items/{id} | DELETE | staff | remove item |
//! | /api/items/{id}/availability | PUT | staff | toggle availability |
//! | /api/items/availability/all | PUT | staff | set availability of all |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Menu item router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/availability/all", put(handler::set_all_availability))
        .route(
            "/{id}",
            put(handler::update).delete(handler::remove),
        )
        .route("/{id}/availability", put(handler::toggle_availability))
}
