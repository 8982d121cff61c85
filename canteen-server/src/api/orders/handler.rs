//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::PlacementRequest;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models as api;
use shared::models::LineItem;
use shared::order::OrderStatus;

/// Placement request body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub items: Vec<LineItem>,
    #[validate(length(min = 1, max = 100))]
    pub roll_no: String,
    #[serde(default)]
    pub payment_ref: Option<String>,
    #[serde(default)]
    pub first_year: bool,
    #[serde(default)]
    pub hostel_choice: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<PlaceOrderRequest> for PlacementRequest {
    fn from(req: PlaceOrderRequest) -> Self {
        Self {
            items: req.items,
            roll_no: req.roll_no,
            payment_ref: req.payment_ref,
            first_year: req.first_year,
            hostel_choice: req.hostel_choice,
            email: req.email,
        }
    }
}

/// Transition request body; accepts the legacy status synonyms
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// List all retained orders (staff dashboards)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<api::Order>>>> {
    user.require_staff()?;
    let orders = state.orders.list_all().await?;
    Ok(ok(orders.into_iter().map(api::Order::from).collect()))
}

/// List the caller's own orders
pub async fn list_my(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<api::Order>>>> {
    user.require_student()?;
    let orders = state.orders.list_for_owner(&user.id).await?;
    Ok(ok(orders.into_iter().map(api::Order::from).collect()))
}

/// Place an order
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(request): Json<PlaceOrderRequest>,
) -> AppResult<Json<AppResponse<api::Order>>> {
    user.require_student()?;
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = state.orders.place_order(&user.id, request.into()).await?;
    Ok(ok(order.into()))
}

/// Apply a status transition. `id` may be the storage identity or the
/// 4-character public token.
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<AppResponse<api::Order>>> {
    let target: OrderStatus = request
        .status
        .parse()
        .map_err(|e: shared::order::StatusParseError| AppError::validation(e.to_string()))?;

    let order = state.orders.transition(user.role, &id, target).await?;
    Ok(ok(order.into()))
}
