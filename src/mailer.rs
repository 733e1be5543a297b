// src/mailer.rs
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::dtos::bill::BillResponse;
use crate::error::AppError;

pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let username = std::env::var("EMAIL_USER")
            .map_err(|_| AppError::mail("EMAIL_USER is not set"))?;
        let password = std::env::var("EMAIL_PASS")
            .map_err(|_| AppError::mail("EMAIL_PASS is not set"))?;
        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(465);

        Ok(Self {
            smtp_host,
            smtp_port,
            username,
            password,
        })
    }
}

/// Fixed HTML invoice: header fields, one table row per line item, grand
/// total. Matches what the billing front end prints.
pub fn render_invoice_html(bill: &BillResponse) -> String {
    let mut rows = String::new();
    for item in &bill.items {
        rows.push_str(&format!(
            "<tr>\
             <td>{}</td>\
             <td>{}</td>\
             <td>&#8377; {:.2}</td>\
             <td>{}%</td>\
             <td>&#8377; {:.2}</td>\
             </tr>",
            item.product_name, item.qty, item.price, item.gst, item.total
        ));
    }

    format!(
        r#"<h2 style="text-align:center;">Invoice</h2>
<p><b>Bill No:</b> {bill_no}</p>
<p><b>Customer:</b> {customer}</p>
<p><b>Date:</b> {date}</p>
<table border="1" cellpadding="6" cellspacing="0" width="100%" style="border-collapse: collapse; text-align:center;">
  <thead style="background-color:#f2f2f2;">
    <tr>
      <th>Product</th>
      <th>Quantity</th>
      <th>Price</th>
      <th>GST %</th>
      <th>Total</th>
    </tr>
  </thead>
  <tbody>{rows}</tbody>
</table>
<h3 style="text-align:right; margin-top:10px;">Grand Total: &#8377; {grand_total:.2}</h3>"#,
        bill_no = bill.bill_no,
        customer = bill.customer_name.as_deref().unwrap_or("-"),
        date = bill.date.format("%d/%m/%Y"),
        rows = rows,
        grand_total = bill.grand_total,
    )
}

pub async fn send_invoice(
    config: &MailConfig,
    recipient: &str,
    bill: &BillResponse,
) -> Result<(), AppError> {
    let from: Mailbox = config
        .username
        .parse()
        .map_err(|_| AppError::mail("Invalid sender address"))?;
    let to: Mailbox = recipient
        .parse()
        .map_err(|_| AppError::validation("Invalid recipient email address"))?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(format!("Invoice for Bill No: {}", bill.bill_no))
        .header(ContentType::TEXT_HTML)
        .body(render_invoice_html(bill))
        .map_err(|e| AppError::mail(&format!("Failed to build message: {}", e)))?;

    let creds = Credentials::new(config.username.clone(), config.password.clone());

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        .map_err(|e| AppError::mail(&format!("Failed to create SMTP relay: {}", e)))?
        .port(config.smtp_port)
        .credentials(creds)
        .build();

    transport
        .send(message)
        .await
        .map_err(|e| AppError::mail(&format!("Failed to send email: {}", e)))?;

    tracing::info!(to = %recipient, bill_no = %bill.bill_no, "Invoice email sent");

    Ok(())
}
