pub mod product;
pub mod purchase;
pub mod bill;
pub mod dashboard;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Bounds for an inclusive calendar-date range: midnight at the start date
/// through 23:59:59.999 on the end date.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_dt = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap();
    let end_dt = Utc.from_utc_datetime(&end.and_time(end_of_day));
    (start_dt, end_dt)
}
