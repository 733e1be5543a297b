use axum::{routing::get, Router};
use crate::handlers::dashboard::get_dashboard_data;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/today-sales", get(get_dashboard_data))
}
