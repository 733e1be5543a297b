use axum::{
    routing::{get, put},
    Router,
};
use crate::handlers::purchase::{
    add_purchase, get_purchases, filter_purchases, update_purchase, delete_purchase,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(get_purchases).post(add_purchase))
        .route("/purchases/filter", get(filter_purchases))
        .route("/purchases/{id}", put(update_purchase).delete(delete_purchase))
}
