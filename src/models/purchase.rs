use sqlx::FromRow;
use chrono::{DateTime, Utc};

#[derive(Debug, FromRow)]
pub struct Purchase {
    pub id: i64,
    pub supplier_name: String,
    pub invoice_number: String,
    pub purchase_date: DateTime<Utc>,
    pub gst_percent: f64,
    pub total_amount: f64,
    pub created_at: Option<DateTime<Utc>>,
}

// Line row joined with the product's display fields.
#[derive(Debug, FromRow)]
pub struct PurchaseItem {
    pub id: i64,
    pub purchase_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub flavour: Option<String>,
    pub pack_size: Option<String>,
    pub quantity: i32,
    pub unit_price: f64,
    pub gst_percent: f64,
    pub total_amount: f64,
}
