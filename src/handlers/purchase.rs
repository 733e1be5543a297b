// src/handlers/purchase.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::Row;
use std::collections::HashMap;

use crate::dtos::purchase::{
    AddPurchaseResponse, CreatePurchaseRequest, PurchaseLineRequest, PurchaseLineResponse,
    PurchaseResponse, UpdatePurchaseRequest,
};
use crate::dtos::MessageResponse;
use crate::error::AppError;
use crate::handlers::day_range;
use crate::models::purchase::{Purchase, PurchaseItem};
use crate::state::AppState;
use tracing::instrument;

const PURCHASE_COLUMNS: &str = "id, supplier_name, invoice_number, purchase_date,
                gst_percent::FLOAT8  AS gst_percent,
                total_amount::FLOAT8 AS total_amount,
                created_at";

const PURCHASE_ITEM_COLUMNS: &str = "pi.id, pi.purchase_id, pi.product_id,
                p.product_name, p.flavour, p.pack_size,
                pi.quantity,
                pi.unit_price::FLOAT8   AS unit_price,
                pi.gst_percent::FLOAT8  AS gst_percent,
                pi.total_amount::FLOAT8 AS total_amount";

/// Line total including GST: quantity x unit price, plus the line's own GST
/// rate or the header default when the line carries none.
pub fn purchase_line_total(quantity: i32, unit_price: f64, line_gst: Option<f64>, header_gst: f64) -> f64 {
    let line_total = quantity as f64 * unit_price;
    let gst = line_total * line_gst.unwrap_or(header_gst) / 100.0;
    line_total + gst
}

/// Per-line totals and the overall total, recomputed from quantities and
/// prices. Client-supplied figures never enter this calculation.
pub fn purchase_totals(lines: &[PurchaseLineRequest], header_gst: f64) -> (Vec<f64>, f64) {
    let line_totals: Vec<f64> = lines
        .iter()
        .map(|l| purchase_line_total(l.quantity, l.unit_price, l.gst_percent, header_gst))
        .collect();
    let total_amount = line_totals.iter().sum();
    (line_totals, total_amount)
}

#[derive(Debug, Deserialize)]
pub struct PurchaseFilterParams {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

// POST /purchases - Record a supplier purchase and increment stock
pub async fn add_purchase(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreatePurchaseRequest>,
) -> Result<Json<AddPurchaseResponse>, AppError> {
    if req.supplier_name.trim().is_empty() {
        return Err(AppError::validation("Supplier name is required"));
    }
    if req.invoice_number.trim().is_empty() {
        return Err(AppError::validation("Invoice number is required"));
    }
    if req.products.is_empty() {
        return Err(AppError::validation("Purchase must contain at least one product"));
    }
    for line in &req.products {
        if line.quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than 0"));
        }
        if line.unit_price < 0.0 {
            return Err(AppError::validation("Unit price cannot be negative"));
        }
    }

    let header_gst = req.gst_percent.unwrap_or(0.0);
    let (line_totals, total_amount) = purchase_totals(&req.products, header_gst);
    let (purchase_start, _) = day_range(req.purchase_date, req.purchase_date);

    // All stock increments and the purchase record commit or roll back as one.
    let mut tx = db_pool.begin().await?;

    let purchase = sqlx::query_as::<_, Purchase>(&format!(
        "INSERT INTO purchases (supplier_name, invoice_number, purchase_date, gst_percent, total_amount)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {PURCHASE_COLUMNS}"
    ))
    .bind(req.supplier_name.trim())
    .bind(req.invoice_number.trim())
    .bind(purchase_start)
    .bind(header_gst)
    .bind(total_amount)
    .fetch_one(&mut *tx)
    .await?;

    let mut line_responses = Vec::with_capacity(req.products.len());

    for (line, line_total) in req.products.iter().zip(line_totals) {
        let product = sqlx::query(
            "UPDATE products SET count = count + $1, updated_at = NOW()
             WHERE id = $2
             RETURNING product_name, flavour, pack_size",
        )
        .bind(line.quantity)
        .bind(line.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

        let item_id: i64 = sqlx::query(
            "INSERT INTO purchase_items (purchase_id, product_id, quantity, unit_price, gst_percent, total_amount)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(purchase.id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.gst_percent.unwrap_or(header_gst))
        .bind(line_total)
        .fetch_one(&mut *tx)
        .await?
        .get("id");

        line_responses.push(PurchaseLineResponse {
            id: item_id,
            product_id: line.product_id,
            product_name: product.get("product_name"),
            flavour: product.get("flavour"),
            pack_size: product.get("pack_size"),
            quantity: line.quantity,
            unit_price: line.unit_price,
            gst_percent: line.gst_percent.unwrap_or(header_gst),
            total_amount: line_total,
        });
    }

    tx.commit().await?;

    Ok(Json(AddPurchaseResponse {
        message: "Purchase Added & Stock Updated".to_string(),
        purchase: PurchaseResponse {
            id: purchase.id,
            supplier_name: purchase.supplier_name,
            invoice_number: purchase.invoice_number,
            purchase_date: purchase.purchase_date,
            gst_percent: purchase.gst_percent,
            total_amount: purchase.total_amount,
            created_at: purchase.created_at,
            products: line_responses,
        },
    }))
}

// GET /purchases - List all purchases, newest first
#[instrument(skip(state))]
pub async fn get_purchases(
    State(state): State<AppState>,
) -> Result<Json<Vec<PurchaseResponse>>, AppError> {
    let purchases = sqlx::query_as::<_, Purchase>(&format!(
        "SELECT {PURCHASE_COLUMNS} FROM purchases ORDER BY created_at DESC"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    assemble_purchases(&state.db_pool, purchases).await.map(Json)
}

// GET /purchases/filter?startDate&endDate - Inclusive date-range query
#[instrument(skip(state))]
pub async fn filter_purchases(
    State(state): State<AppState>,
    Query(params): Query<PurchaseFilterParams>,
) -> Result<Json<Vec<PurchaseResponse>>, AppError> {
    let (start, end) = day_range(params.start_date, params.end_date);

    let purchases = sqlx::query_as::<_, Purchase>(&format!(
        "SELECT {PURCHASE_COLUMNS} FROM purchases
         WHERE purchase_date >= $1 AND purchase_date <= $2
         ORDER BY purchase_date DESC"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(&state.db_pool)
    .await?;

    assemble_purchases(&state.db_pool, purchases).await.map(Json)
}

// PUT /purchases/:id - Update header fields; line items and stock stay as recorded
#[instrument(skip(state, payload), fields(id))]
pub async fn update_purchase(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePurchaseRequest>,
) -> Result<Json<PurchaseResponse>, AppError> {
    let purchase_start = payload
        .purchase_date
        .map(|d| day_range(d, d).0);

    let purchase = sqlx::query_as::<_, Purchase>(&format!(
        "UPDATE purchases SET
         supplier_name  = COALESCE($1, supplier_name),
         invoice_number = COALESCE($2, invoice_number),
         purchase_date  = COALESCE($3, purchase_date),
         gst_percent    = COALESCE($4, gst_percent)
         WHERE id = $5
         RETURNING {PURCHASE_COLUMNS}"
    ))
    .bind(payload.supplier_name)
    .bind(payload.invoice_number)
    .bind(purchase_start)
    .bind(payload.gst_percent)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Purchase not found"))?;

    let mut assembled = assemble_purchases(&state.db_pool, vec![purchase]).await?;
    Ok(Json(assembled.remove(0)))
}

// DELETE /purchases/:id - Remove the record; stock adjustments are not reverted
#[instrument(skip(state), fields(id))]
pub async fn delete_purchase(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Purchase not found"));
    }

    Ok(Json(MessageResponse {
        message: "Deleted Successfully".to_string(),
    }))
}

// Attach line items, with product display fields resolved, to purchase headers.
async fn assemble_purchases(
    db_pool: &sqlx::PgPool,
    purchases: Vec<Purchase>,
) -> Result<Vec<PurchaseResponse>, AppError> {
    let ids: Vec<i64> = purchases.iter().map(|p| p.id).collect();

    let items = sqlx::query_as::<_, PurchaseItem>(&format!(
        "SELECT {PURCHASE_ITEM_COLUMNS}
         FROM purchase_items pi
         JOIN products p ON pi.product_id = p.id
         WHERE pi.purchase_id = ANY($1)
         ORDER BY pi.id"
    ))
    .bind(&ids)
    .fetch_all(db_pool)
    .await?;

    let mut by_purchase: HashMap<i64, Vec<PurchaseLineResponse>> = HashMap::new();
    for item in items {
        by_purchase.entry(item.purchase_id).or_default().push(PurchaseLineResponse {
            id: item.id,
            product_id: item.product_id,
            product_name: item.product_name,
            flavour: item.flavour,
            pack_size: item.pack_size,
            quantity: item.quantity,
            unit_price: item.unit_price,
            gst_percent: item.gst_percent,
            total_amount: item.total_amount,
        });
    }

    Ok(purchases
        .into_iter()
        .map(|p| PurchaseResponse {
            products: by_purchase.remove(&p.id).unwrap_or_default(),
            id: p.id,
            supplier_name: p.supplier_name,
            invoice_number: p.invoice_number,
            purchase_date: p.purchase_date,
            gst_percent: p.gst_percent,
            total_amount: p.total_amount,
            created_at: p.created_at,
        })
        .collect())
}
