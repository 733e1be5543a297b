use axum::{
    routing::{get, put},
    Router,
};
use crate::handlers::product::{get_products, create_product, update_product, delete_product};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
}
