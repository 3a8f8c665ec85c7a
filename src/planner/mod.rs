pub(crate) mod dto;
pub mod handlers;
pub mod picker;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use services::{week_window, PlanError};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::plan_routes())
}
