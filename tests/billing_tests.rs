//! Billing flow tests
//!
//! Covers the server-side billing arithmetic and the stock gate:
//! - line totals and grand-total recomputation (client figures are ignored)
//! - the insufficient-stock rejection message
//! - invoice HTML rendering

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use retailx_backend::dtos::bill::{BillLineRequest, BillLineResponse, BillResponse};
use retailx_backend::handlers::bill::{
    bill_grand_total, bill_line_total, insufficient_stock_message,
};
use retailx_backend::mailer::render_invoice_html;

fn item(qty: i32, price: f64, gst: f64) -> BillLineRequest {
    BillLineRequest {
        product: 1,
        qty,
        price,
        gst,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_line_total_applies_gst() {
        // 10 x 40.0 = 400, + 5% GST = 420
        assert_eq!(bill_line_total(10, 40.0, 5.0), 420.0);
    }

    #[test]
    fn test_line_total_without_gst() {
        assert_eq!(bill_line_total(3, 15.0, 0.0), 45.0);
    }

    #[test]
    fn test_grand_total_is_sum_of_line_totals() {
        let items = vec![
            item(10, 40.0, 5.0), // 420
            item(2, 50.0, 0.0),  // 100
        ];
        assert_eq!(bill_grand_total(&items), 520.0);
    }

    #[test]
    fn test_grand_total_of_empty_bill_is_zero() {
        assert_eq!(bill_grand_total(&[]), 0.0);
    }

    #[test]
    fn test_insufficient_stock_message_reports_both_quantities() {
        // Cola at 40 on hand cannot cover a 45-unit line
        assert_eq!(
            insufficient_stock_message("Cola", 40, 45),
            "Not enough stock for Cola. Available: 40, Required: 45"
        );
    }

    #[test]
    fn test_invoice_html_contains_bill_fields() {
        let bill = BillResponse {
            id: 7,
            bill_no: "B-1042".to_string(),
            customer_name: Some("Asha Stores".to_string()),
            date: Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap(),
            grand_total: 520.0,
            created_at: None,
            items: vec![
                BillLineResponse {
                    id: 1,
                    product: 3,
                    product_name: "Cola".to_string(),
                    qty: 10,
                    price: 40.0,
                    gst: 5.0,
                    total: 420.0,
                },
                BillLineResponse {
                    id: 2,
                    product: 4,
                    product_name: "Chips".to_string(),
                    qty: 2,
                    price: 50.0,
                    gst: 0.0,
                    total: 100.0,
                },
            ],
        };

        let html = render_invoice_html(&bill);

        assert!(html.contains("<b>Bill No:</b> B-1042"));
        assert!(html.contains("<b>Customer:</b> Asha Stores"));
        assert!(html.contains("<b>Date:</b> 15/03/2024"));
        assert!(html.contains("<td>Cola</td>"));
        assert!(html.contains("<td>&#8377; 40.00</td>"));
        assert!(html.contains("<td>5%</td>"));
        assert!(html.contains("<td>Chips</td>"));
        assert!(html.contains("Grand Total: &#8377; 520.00"));
    }

    #[test]
    fn test_invoice_html_for_walk_in_customer() {
        let bill = BillResponse {
            id: 8,
            bill_no: "B-1043".to_string(),
            customer_name: None,
            date: Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0).unwrap(),
            grand_total: 45.0,
            created_at: None,
            items: vec![],
        };

        let html = render_invoice_html(&bill);
        assert!(html.contains("<b>Customer:</b> -"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// The recomputed grand total always equals the sum of the
        /// recomputed line totals, whatever the client claimed.
        #[test]
        fn grand_total_matches_line_sum(
            lines in prop::collection::vec((1..200i32, 0.0..5_000.0f64, 0.0..28.0f64), 1..12),
        ) {
            let items: Vec<BillLineRequest> = lines
                .iter()
                .map(|&(qty, price, gst)| item(qty, price, gst))
                .collect();

            let sum: f64 = items
                .iter()
                .map(|i| bill_line_total(i.qty, i.price, i.gst))
                .sum();
            prop_assert!((bill_grand_total(&items) - sum).abs() < 1e-6);
        }

        /// The stock gate message always carries the exact numbers it was
        /// given, in the Available/Required order.
        #[test]
        fn stock_message_reports_exact_counts(available in 0..10_000i32, extra in 1..1_000i32) {
            let required = available + extra;
            let msg = insufficient_stock_message("Item", available, required);
            prop_assert!(msg.contains(&format!("Available: {}", available)), "message missing available count");
            prop_assert!(msg.contains(&format!("Required: {}", required)), "message missing required count");
        }
    }
}
