use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument};

use super::dto::DateWindow;
use super::picker::RandomPicker;
use super::services::{ensure_weekly_plan, week_window};
use crate::{error::ApiError, state::AppState, store::Meal};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/plan", post(plan_week))
        .route("/users/:user_id/meals", get(list_meals))
}

/// POST /users/:user_id/plan
#[instrument(skip(state))]
pub async fn plan_week(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    state.require_user(user_id).await?;

    let _guard = state.plan_locks.acquire(user_id).await;
    let today = OffsetDateTime::now_utc().date();
    let mut picker = RandomPicker::from_config(state.config.planner.seed);

    let meals = ensure_weekly_plan(&state, &mut picker, user_id, today)
        .await
        .map_err(|e| {
            error!(error = %e, user_id, "plan_week failed");
            e
        })?;

    info!(user_id, meals = meals.len(), "weekly plan ready");
    Ok(Json(meals))
}

/// GET /users/:user_id/meals?from&to (defaults to the current week)
#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(window): Query<DateWindow>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    window.validate()?;
    state.require_user(user_id).await?;

    let (from, to) = window.or(week_window(OffsetDateTime::now_utc().date()));
    let meals = state
        .meals
        .list_meals_by_user(user_id, Some(from), Some(to))
        .await?;
    Ok(Json(meals))
}
