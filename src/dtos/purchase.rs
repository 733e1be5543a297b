use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, NaiveDate};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub supplier_name: String,
    pub invoice_number: String,
    pub purchase_date: NaiveDate,
    /// Header-level default applied to lines that carry no rate of their own.
    pub gst_percent: Option<f64>,
    pub products: Vec<PurchaseLineRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLineRequest {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    pub gst_percent: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchaseRequest {
    pub supplier_name: Option<String>,
    pub invoice_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub gst_percent: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub id: i64,
    pub supplier_name: String,
    pub invoice_number: String,
    pub purchase_date: DateTime<Utc>,
    pub gst_percent: f64,
    pub total_amount: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub products: Vec<PurchaseLineResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLineResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub flavour: Option<String>,
    pub pack_size: Option<String>,
    pub quantity: i32,
    pub unit_price: f64,
    pub gst_percent: f64,
    pub total_amount: f64,
}

#[derive(Serialize)]
pub struct AddPurchaseResponse {
    pub message: String,
    pub purchase: PurchaseResponse,
}
