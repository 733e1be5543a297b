use sqlx::FromRow;
use chrono::{DateTime, Utc};

#[derive(Debug, FromRow)]
pub struct Bill {
    pub id: i64,
    pub bill_no: String,
    pub customer_name: Option<String>,
    pub bill_date: DateTime<Utc>,
    pub grand_total: f64,
    pub created_at: Option<DateTime<Utc>>,
}

// Line row joined with the product's display name.
#[derive(Debug, FromRow)]
pub struct BillItem {
    pub id: i64,
    pub bill_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub qty: i32,
    pub price: f64,
    pub gst: f64,
    pub total: f64,
}
