use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today_sales: f64,
    pub week_sales: f64,
    pub month_sales: f64,
    #[serde(rename = "totalGST")]
    pub total_gst: f64,
}
