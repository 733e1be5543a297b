//! Dashboard aggregation tests
//!
//! Covers the sales windows against a fixed clock:
//! - today / trailing-7-day / calendar-month boundaries
//! - the lifetime-cumulative GST figure
//! - inclusive date-range bounds used by the history filters

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use retailx_backend::handlers::dashboard::{bill_gst_amount, summarize_sales, BillSales};
use retailx_backend::handlers::day_range;

fn bill(date: DateTime<Utc>, grand_total: f64, gst_amount: f64) -> BillSales {
    BillSales {
        bill_date: date,
        grand_total,
        gst_amount,
    }
}

#[cfg(test)]
mod window_tests {
    use super::*;

    // Mid-month noon so the week window stays inside March.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_windows_split_today_week_and_older_bills() {
        let bills = vec![
            bill(now() - Duration::hours(2), 100.0, 10.0), // today
            bill(now() - Duration::days(3), 200.0, 20.0),  // this week
            bill(now() - Duration::days(40), 300.0, 30.0), // February 4th
        ];

        let summary = summarize_sales(&bills, now());

        assert_eq!(summary.today_sales, 100.0);
        assert_eq!(summary.week_sales, 300.0);
        assert_eq!(summary.month_sales, 300.0);
        assert_eq!(summary.total_gst, 60.0);
    }

    #[test]
    fn test_today_window_starts_at_midnight() {
        let late_yesterday = Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 0).unwrap();
        let early_today = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();

        let summary = summarize_sales(
            &[bill(late_yesterday, 50.0, 0.0), bill(early_today, 75.0, 0.0)],
            now(),
        );

        assert_eq!(summary.today_sales, 75.0);
        assert_eq!(summary.week_sales, 125.0);
    }

    #[test]
    fn test_week_window_is_seven_days_start_of_day_aligned() {
        // Six days back at midnight is the earliest instant still counted.
        let window_edge = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        let just_outside = Utc.with_ymd_and_hms(2024, 3, 8, 23, 59, 59).unwrap();

        let summary = summarize_sales(
            &[bill(window_edge, 40.0, 0.0), bill(just_outside, 60.0, 0.0)],
            now(),
        );

        assert_eq!(summary.week_sales, 40.0);
        assert_eq!(summary.month_sales, 100.0);
    }

    #[test]
    fn test_month_window_starts_on_the_first() {
        let first_of_month = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end_of_february = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();

        let summary = summarize_sales(
            &[bill(first_of_month, 500.0, 0.0), bill(end_of_february, 900.0, 0.0)],
            now(),
        );

        assert_eq!(summary.month_sales, 500.0);
        assert_eq!(summary.week_sales, 0.0);
        assert_eq!(summary.today_sales, 0.0);
    }

    #[test]
    fn test_gst_total_ignores_every_window() {
        let bills = vec![
            bill(now() - Duration::days(400), 1000.0, 120.0),
            bill(now() - Duration::days(40), 300.0, 30.0),
            bill(now(), 100.0, 10.0),
        ];

        let summary = summarize_sales(&bills, now());

        assert_eq!(summary.today_sales, 100.0);
        assert_eq!(summary.total_gst, 160.0);
    }

    #[test]
    fn test_empty_bills_yield_zero_summary() {
        let summary = summarize_sales(&[], now());
        assert_eq!(summary.today_sales, 0.0);
        assert_eq!(summary.week_sales, 0.0);
        assert_eq!(summary.month_sales, 0.0);
        assert_eq!(summary.total_gst, 0.0);
    }
}

#[cfg(test)]
mod gst_tests {
    use super::*;

    #[test]
    fn test_bill_gst_amount_from_line_totals() {
        // 5% of 420 plus 12% of 100
        let gst = bill_gst_amount(&[(420.0, 5.0), (100.0, 12.0)]);
        assert!((gst - 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_bill_without_items_carries_no_gst() {
        assert_eq!(bill_gst_amount(&[]), 0.0);
    }
}

#[cfg(test)]
mod range_tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_day_range_spans_whole_days_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let (from, to) = day_range(start, end);

        assert_eq!(from, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(to.hour(), 23);
        assert_eq!(to.minute(), 59);
        assert_eq!(to.second(), 59);
        assert_eq!(to.timestamp_subsec_millis(), 999);
        assert_eq!(to.date_naive(), end);
    }

    #[test]
    fn test_single_day_range_covers_that_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let (from, to) = day_range(day, day);

        let morning_sale = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        let closing_sale = Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap();

        assert!(morning_sale >= from && morning_sale <= to);
        assert!(closing_sale >= from && closing_sale <= to);
        assert!(next_day > to);
    }
}
