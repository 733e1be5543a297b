// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::Error as SqlxError;
use crate::dtos::product::{CreateProductRequest, UpdateProductRequest, ProductResponse};
use crate::dtos::MessageResponse;
use crate::models::product::Product;
use crate::state::AppState;
use crate::error::AppError;
use tracing::{error, instrument};

const PRODUCT_COLUMNS: &str = "id, product_name, flavour, pack_size, count,
                mrp::FLOAT8         AS mrp,
                sales_price::FLOAT8 AS sales_price,
                gst_percent::FLOAT8 AS gst_percent,
                created_at";

fn map_referenced_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_name"
    ))
        .fetch_all(&state.db_pool)
        .await {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    if payload.product_name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if payload.count < 0 {
        return Err(AppError::validation("Count cannot be negative"));
    }

    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (product_name, flavour, pack_size, count, mrp, sales_price, gst_percent)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.product_name.trim())
    .bind(&payload.flavour)
    .bind(&payload.pack_size)
    .bind(payload.count)
    .bind(payload.mrp)
    .bind(payload.sales_price)
    .bind(payload.gst_percent)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/:id - Update product
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    if let Some(count) = payload.count {
        if count < 0 {
            return Err(AppError::validation("Count cannot be negative"));
        }
    }

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET
         product_name = COALESCE($1, product_name),
         flavour      = COALESCE($2, flavour),
         pack_size    = COALESCE($3, pack_size),
         count        = COALESCE($4, count),
         mrp          = COALESCE($5, mrp),
         sales_price  = COALESCE($6, sales_price),
         gst_percent  = COALESCE($7, gst_percent),
         updated_at   = NOW()
         WHERE id = $8
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.product_name)
    .bind(payload.flavour)
    .bind(payload.pack_size)
    .bind(payload.count)
    .bind(payload.mrp)
    .bind(payload.sales_price)
    .bind(payload.gst_percent)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await
        .map_err(|e| map_referenced_violation(e, "Product is referenced by existing purchases or bills"))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(MessageResponse {
        message: "Deleted Successfully".to_string(),
    }))
}
