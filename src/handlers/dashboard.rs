// src/handlers/dashboard.rs
use axum::{extract::State, Json};
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use sqlx::Row;
use std::collections::HashMap;

use crate::dtos::dashboard::DashboardSummary;
use crate::error::AppError;
use crate::state::AppState;
use tracing::instrument;

/// One bill reduced to what the dashboard needs.
pub struct BillSales {
    pub bill_date: DateTime<Utc>,
    pub grand_total: f64,
    pub gst_amount: f64,
}

/// GST carried by one bill: the sum over its lines of total x gst / 100.
pub fn bill_gst_amount(items: &[(f64, f64)]) -> f64 {
    items.iter().map(|(total, gst)| total * gst / 100.0).sum()
}

/// Sales figures over today / trailing-7-day / calendar-month windows,
/// against an explicit `now` so the boundaries are deterministic under test.
/// The GST figure deliberately spans all bills regardless of date.
pub fn summarize_sales(bills: &[BillSales], now: DateTime<Utc>) -> DashboardSummary {
    let today_start = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));
    let week_start = today_start - Duration::days(6);
    let month_start = today_start - Duration::days(now.date_naive().day0() as i64);

    let mut summary = DashboardSummary {
        today_sales: 0.0,
        week_sales: 0.0,
        month_sales: 0.0,
        total_gst: 0.0,
    };

    for bill in bills {
        summary.total_gst += bill.gst_amount;

        if bill.bill_date >= today_start {
            summary.today_sales += bill.grand_total;
        }
        if bill.bill_date >= week_start {
            summary.week_sales += bill.grand_total;
        }
        if bill.bill_date >= month_start {
            summary.month_sales += bill.grand_total;
        }
    }

    summary
}

// GET /dashboard/today-sales - Aggregate sales and GST in one pass
#[instrument(skip(state))]
pub async fn get_dashboard_data(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let bill_rows = sqlx::query(
        "SELECT id, bill_date, grand_total::FLOAT8 AS grand_total FROM bills",
    )
    .fetch_all(&state.db_pool)
    .await?;

    let item_rows = sqlx::query(
        "SELECT bill_id, total::FLOAT8 AS total, gst::FLOAT8 AS gst FROM bill_items",
    )
    .fetch_all(&state.db_pool)
    .await?;

    let mut items_by_bill: HashMap<i64, Vec<(f64, f64)>> = HashMap::new();
    for row in item_rows {
        items_by_bill
            .entry(row.get("bill_id"))
            .or_default()
            .push((row.get("total"), row.get("gst")));
    }

    let bills: Vec<BillSales> = bill_rows
        .into_iter()
        .map(|row| {
            let id: i64 = row.get("id");
            BillSales {
                bill_date: row.get("bill_date"),
                grand_total: row.get("grand_total"),
                gst_amount: bill_gst_amount(
                    items_by_bill.get(&id).map(Vec::as_slice).unwrap_or(&[]),
                ),
            }
        })
        .collect();

    Ok(Json(summarize_sales(&bills, Utc::now())))
}
