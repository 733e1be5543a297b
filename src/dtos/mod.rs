pub mod product;
pub mod purchase;
pub mod bill;
pub mod dashboard;

use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
