pub mod products;
pub mod purchases;
pub mod bills;
pub mod dashboard;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(purchases::routes())
        .merge(bills::routes())
        .merge(dashboard::routes())
}
