// src/dtos/product.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    pub flavour: Option<String>,
    pub pack_size: Option<String>,
    #[serde(default)]
    pub count: i32,
    pub mrp: Option<f64>,
    pub sales_price: Option<f64>,
    pub gst_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub flavour: Option<String>,
    pub pack_size: Option<String>,
    pub count: Option<i32>,
    pub mrp: Option<f64>,
    pub sales_price: Option<f64>,
    pub gst_percent: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_name: String,
    pub flavour: Option<String>,
    pub pack_size: Option<String>,
    pub count: i32,
    pub mrp: Option<f64>,
    pub sales_price: Option<f64>,
    pub gst_percent: Option<f64>,
    pub created_at: Option<String>,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name,
            flavour: product.flavour,
            pack_size: product.pack_size,
            count: product.count,
            mrp: product.mrp,
            sales_price: product.sales_price,
            gst_percent: product.gst_percent,
            created_at: product.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}
