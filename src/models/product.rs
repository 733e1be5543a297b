use sqlx::FromRow;
use chrono::{DateTime, Utc};

#[derive(Debug, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub flavour: Option<String>,
    pub pack_size: Option<String>,
    pub count: i32,
    pub mrp: Option<f64>,
    pub sales_price: Option<f64>,
    pub gst_percent: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}
