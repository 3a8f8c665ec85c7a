use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::dto::ShoppingListEntry;
use super::services::{required_ingredients, shopping_list};
use crate::{error::ApiError, planner::dto::DateWindow, state::AppState};

pub fn shopping_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/shopping-list", get(get_shopping_list))
        .route("/users/:user_id/required-ingredients", get(get_required_ingredients))
}

#[instrument(skip(state))]
pub async fn get_shopping_list(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ShoppingListEntry>>, ApiError> {
    state.require_user(user_id).await?;

    let today = OffsetDateTime::now_utc().date();
    let list = shopping_list(&state, user_id, today).await?;
    info!(user_id, entries = list.len(), "shopping list served");
    Ok(Json(list))
}

/// Both bounds optional; no bound means no limit on that side.
#[instrument(skip(state))]
pub async fn get_required_ingredients(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(window): Query<DateWindow>,
) -> Result<Json<BTreeMap<i64, f64>>, ApiError> {
    window.validate()?;
    state.require_user(user_id).await?;

    let required = required_ingredients(&state, user_id, window.from, window.to).await?;
    Ok(Json(required))
}
