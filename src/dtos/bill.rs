use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub bill_no: String,
    pub customer_name: Option<String>,
    pub items: Vec<BillLineRequest>,
}

/// Client-side `total`/`grandTotal` figures are display hints only and are
/// dropped during deserialization; the server recomputes every total.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineRequest {
    pub product: i64,
    pub qty: i32,
    pub price: f64,
    #[serde(default)]
    pub gst: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBillEmailRequest {
    pub bill_id: i64,
    pub recipient_email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    pub id: i64,
    pub bill_no: String,
    pub customer_name: Option<String>,
    pub date: DateTime<Utc>,
    pub grand_total: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<BillLineResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineResponse {
    pub id: i64,
    pub product: i64,
    pub product_name: String,
    pub qty: i32,
    pub price: f64,
    pub gst: f64,
    pub total: f64,
}
