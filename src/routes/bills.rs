use axum::{
    routing::{get, post, delete},
    Router,
};
use crate::handlers::bill::{add_bill, get_bills, filter_bills, delete_bill, send_bill_email};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bills", get(get_bills).post(add_bill))
        .route("/bills/filter", get(filter_bills))
        .route("/bills/send-email", post(send_bill_email))
        .route("/bills/{id}", delete(delete_bill))
}
