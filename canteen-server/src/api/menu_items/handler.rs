//! Menu Item API Handlers
//!
//! Mutations broadcast the matching menu event so connected dashboards
//! and student menus refetch without polling.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::realtime::OrderNotice;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models as api;

/// List the menu (no role restriction)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<api::MenuItem>>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo
        .find_all()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(ok(items.into_iter().map(api::MenuItem::from).collect()))
}

/// Add a menu item
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(data): Json<MenuItemCreate>,
) -> AppResult<Json<AppResponse<api::MenuItem>>> {
    user.require_staff()?;
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Item name must not be empty"));
    }
    if data.price < 0.0 {
        return Err(AppError::validation("Item price must not be negative"));
    }

    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .create(data)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    state.dispatcher.dispatch(OrderNotice::MenuUpdated).await;
    Ok(ok(item.into()))
}

/// Update a menu item
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(data): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<api::MenuItem>>> {
    user.require_staff()?;

    let repo = MenuItemRepository::new(state.db.clone());
    if repo
        .find_by_id(&id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .is_none()
    {
        return Err(AppError::not_found(format!("Menu item {} not found", id)));
    }

    let item = repo
        .update(&id, data)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    state.dispatcher.dispatch(OrderNotice::MenuUpdated).await;
    Ok(ok(item.into()))
}

/// Flip availability of one item
pub async fn toggle_availability(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<api::MenuItem>>> {
    user.require_staff()?;

    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;

    let updated = repo
        .set_availability(&id, !item.available)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;

    state
        .dispatcher
        .dispatch(OrderNotice::ItemAvailabilityChanged {
            item_id: id,
            available: updated.available,
        })
        .await;
    Ok(ok(updated.into()))
}

#[derive(Debug, Deserialize)]
pub struct SetAllAvailabilityRequest {
    pub available: bool,
}

/// Set availability of every item at once
pub async fn set_all_availability(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(request): Json<SetAllAvailabilityRequest>,
) -> AppResult<Json<AppResponse<usize>>> {
    user.require_staff()?;

    let repo = MenuItemRepository::new(state.db.clone());
    let touched = repo
        .set_all_availability(request.available)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    state.dispatcher.dispatch(OrderNotice::MenuUpdated).await;
    Ok(ok(touched))
}

/// Remove a menu item
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    user.require_staff()?;

    let repo = MenuItemRepository::new(state.db.clone());
    let removed = repo
        .delete(&id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if !removed {
        return Err(AppError::not_found(format!("Menu item {} not found", id)));
    }

    state
        .dispatcher
        .dispatch(OrderNotice::ItemRemoved { item_id: id })
        .await;
    Ok(ok(()))
}
