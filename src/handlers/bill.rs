// src/handlers/bill.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::dtos::bill::{
    BillLineRequest, BillLineResponse, BillResponse, CreateBillRequest, SendBillEmailRequest,
};
use crate::dtos::MessageResponse;
use crate::error::AppError;
use crate::handlers::day_range;
use crate::mailer::{self, MailConfig};
use crate::models::bill::{Bill, BillItem};
use crate::state::AppState;
use tracing::instrument;

const BILL_COLUMNS: &str = "id, bill_no, customer_name, bill_date,
                grand_total::FLOAT8 AS grand_total,
                created_at";

const BILL_ITEM_COLUMNS: &str = "bi.id, bi.bill_id, bi.product_id,
                p.product_name,
                bi.qty,
                bi.price::FLOAT8 AS price,
                bi.gst::FLOAT8   AS gst,
                bi.total::FLOAT8 AS total";

/// Line total including GST: qty x price plus the line's GST percentage.
pub fn bill_line_total(qty: i32, price: f64, gst: f64) -> f64 {
    let line_total = qty as f64 * price;
    line_total + line_total * gst / 100.0
}

/// Grand total recomputed from the lines; the client's figure is ignored.
pub fn bill_grand_total(lines: &[BillLineRequest]) -> f64 {
    lines
        .iter()
        .map(|l| bill_line_total(l.qty, l.price, l.gst))
        .sum()
}

/// Rejection message for the stock gate, reporting available vs. required.
pub fn insufficient_stock_message(product_name: &str, available: i32, required: i32) -> String {
    format!(
        "Not enough stock for {}. Available: {}, Required: {}",
        product_name, available, required
    )
}

#[derive(Debug, Deserialize)]
pub struct BillFilterParams {
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}

// POST /bills - Record a sale and decrement stock
pub async fn add_bill(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<BillResponse>), AppError> {
    if req.bill_no.trim().is_empty() {
        return Err(AppError::validation("Bill number is required"));
    }
    if req.items.is_empty() {
        return Err(AppError::validation("Bill must contain at least one item"));
    }
    for item in &req.items {
        if item.qty <= 0 {
            return Err(AppError::validation("Quantity must be greater than 0"));
        }
        if item.price < 0.0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
    }

    let mut tx = db_pool.begin().await?;

    // Validation pass over every line before any stock moves. FOR UPDATE
    // locks the product rows so a concurrent bill for the same product
    // waits here instead of validating against a stale count.
    let mut product_names = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let product = sqlx::query(
            "SELECT product_name, count FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(item.product)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

        let name: String = product.get("product_name");
        let count: i32 = product.get("count");
        if count < item.qty {
            return Err(AppError::validation(&insufficient_stock_message(
                &name, count, item.qty,
            )));
        }
        product_names.push(name);
    }

    // Mutation pass. Zero rows affected means the count moved since
    // validation; the error aborts the transaction and rolls back any
    // earlier decrements.
    for item in &req.items {
        let result = sqlx::query(
            "UPDATE products SET count = count - $1, updated_at = NOW()
             WHERE id = $2 AND count >= $1",
        )
        .bind(item.qty)
        .bind(item.product)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::validation("Stock changed while billing, please retry"));
        }
    }

    let grand_total = bill_grand_total(&req.items);

    let bill = sqlx::query_as::<_, Bill>(&format!(
        "INSERT INTO bills (bill_no, customer_name, grand_total)
         VALUES ($1, $2, $3)
         RETURNING {BILL_COLUMNS}"
    ))
    .bind(req.bill_no.trim())
    .bind(&req.customer_name)
    .bind(grand_total)
    .fetch_one(&mut *tx)
    .await?;

    let mut line_responses = Vec::with_capacity(req.items.len());
    for (item, product_name) in req.items.iter().zip(product_names) {
        let total = bill_line_total(item.qty, item.price, item.gst);
        let item_id: i64 = sqlx::query(
            "INSERT INTO bill_items (bill_id, product_id, qty, price, gst, total)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(bill.id)
        .bind(item.product)
        .bind(item.qty)
        .bind(item.price)
        .bind(item.gst)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?
        .get("id");

        line_responses.push(BillLineResponse {
            id: item_id,
            product: item.product,
            product_name,
            qty: item.qty,
            price: item.price,
            gst: item.gst,
            total,
        });
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(BillResponse {
            id: bill.id,
            bill_no: bill.bill_no,
            customer_name: bill.customer_name,
            date: bill.bill_date,
            grand_total: bill.grand_total,
            created_at: bill.created_at,
            items: line_responses,
        }),
    ))
}

// GET /bills - List all bills, newest first
#[instrument(skip(state))]
pub async fn get_bills(State(state): State<AppState>) -> Result<Json<Vec<BillResponse>>, AppError> {
    let bills = sqlx::query_as::<_, Bill>(&format!(
        "SELECT {BILL_COLUMNS} FROM bills ORDER BY bill_date DESC"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    assemble_bills(&state.db_pool, bills).await.map(Json)
}

// GET /bills/filter?startDate&endDate - Inclusive range; without both
// parameters every bill is returned.
#[instrument(skip(state))]
pub async fn filter_bills(
    State(state): State<AppState>,
    Query(params): Query<BillFilterParams>,
) -> Result<Json<Vec<BillResponse>>, AppError> {
    let bills = match (params.start_date, params.end_date) {
        (Some(start_date), Some(end_date)) => {
            let (start, end) = day_range(start_date, end_date);
            sqlx::query_as::<_, Bill>(&format!(
                "SELECT {BILL_COLUMNS} FROM bills
                 WHERE bill_date >= $1 AND bill_date <= $2
                 ORDER BY bill_date DESC"
            ))
            .bind(start)
            .bind(end)
            .fetch_all(&state.db_pool)
            .await?
        }
        _ => {
            sqlx::query_as::<_, Bill>(&format!(
                "SELECT {BILL_COLUMNS} FROM bills ORDER BY bill_date DESC"
            ))
            .fetch_all(&state.db_pool)
            .await?
        }
    };

    assemble_bills(&state.db_pool, bills).await.map(Json)
}

// DELETE /bills/:id - Restore stock for every line, then remove the bill
pub async fn delete_bill(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db_pool.begin().await?;

    let exists = sqlx::query("SELECT id FROM bills WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AppError::not_found("Bill not found"));
    }

    let items = sqlx::query("SELECT product_id, qty FROM bill_items WHERE bill_id = $1")
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

    // Give each line's quantity back before the record goes away.
    for item in items {
        let product_id: i64 = item.get("product_id");
        let qty: i32 = item.get("qty");
        sqlx::query(
            "UPDATE products SET count = count + $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(qty)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("DELETE FROM bills WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Json(MessageResponse {
        message: "Bill deleted and stock restored".to_string(),
    }))
}

// POST /bills/send-email - Render the invoice and dispatch it via SMTP
pub async fn send_bill_email(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<SendBillEmailRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let bill = fetch_bill_by_id(&db_pool, req.bill_id).await?;

    let config = MailConfig::from_env()?;
    mailer::send_invoice(&config, &req.recipient_email, &bill).await?;

    Ok(Json(MessageResponse {
        message: "Invoice email sent successfully!".to_string(),
    }))
}

// Helper to fetch one bill with resolved product names.
pub async fn fetch_bill_by_id(db_pool: &PgPool, id: i64) -> Result<BillResponse, AppError> {
    let bill = sqlx::query_as::<_, Bill>(&format!(
        "SELECT {BILL_COLUMNS} FROM bills WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Bill not found"))?;

    let mut assembled = assemble_bills(db_pool, vec![bill]).await?;
    Ok(assembled.remove(0))
}

// Attach line items, with product names resolved, to bill headers.
async fn assemble_bills(db_pool: &PgPool, bills: Vec<Bill>) -> Result<Vec<BillResponse>, AppError> {
    let ids: Vec<i64> = bills.iter().map(|b| b.id).collect();

    let items = sqlx::query_as::<_, BillItem>(&format!(
        "SELECT {BILL_ITEM_COLUMNS}
         FROM bill_items bi
         JOIN products p ON bi.product_id = p.id
         WHERE bi.bill_id = ANY($1)
         ORDER BY bi.id"
    ))
    .bind(&ids)
    .fetch_all(db_pool)
    .await?;

    let mut by_bill: HashMap<i64, Vec<BillLineResponse>> = HashMap::new();
    for item in items {
        by_bill.entry(item.bill_id).or_default().push(BillLineResponse {
            id: item.id,
            product: item.product_id,
            product_name: item.product_name,
            qty: item.qty,
            price: item.price,
            gst: item.gst,
            total: item.total,
        });
    }

    Ok(bills
        .into_iter()
        .map(|b| BillResponse {
            items: by_bill.remove(&b.id).unwrap_or_default(),
            id: b.id,
            bill_no: b.bill_no,
            customer_name: b.customer_name,
            date: b.bill_date,
            grand_total: b.grand_total,
            created_at: b.created_at,
        })
        .collect())
}
