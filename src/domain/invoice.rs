use super::checkout::Customer;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const PAYMENT_METHOD: &str = "Credit/Debit Card";
const PAYMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything needed to turn a draft invoice into a paid one.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFinalization {
    pub invoice_id: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub card_brand: String,
    pub customer: Customer,
    pub paid_at: DateTime<Utc>,
}

impl InvoiceFinalization {
    /// Free-text notes attached to the invoice: payment source plus shipping block.
    pub fn notes(&self) -> String {
        let c = &self.customer;
        let field = |value: &Option<String>| value.as_deref().unwrap_or("").to_string();
        let name = format!("{} {}", field(&c.first_name), field(&c.last_name));

        format!(
            "Paid online via Mastercard ({})\n\n\
             Shipping Information:\n\
             - Name: {}\n\
             - Governorate: {}\n\
             - District: {}\n\
             - City: {}\n\
             - Email: {}\n\
             - Phone: {}",
            self.card_brand,
            name.trim(),
            field(&c.governorate),
            field(&c.district),
            field(&c.city),
            field(&c.email),
            field(&c.phone),
        )
    }

    /// Request body for the invoicing platform's invoice update endpoint.
    pub fn to_request(&self) -> InvoiceUpdateRequest {
        InvoiceUpdateRequest {
            invoice: InvoiceFields {
                draft: false,
                notes: self.notes(),
            },
            payment: vec![InvoicePayment {
                payment_method: PAYMENT_METHOD,
                amount: self.amount,
                transaction_id: self.invoice_id.clone(),
                date: self.paid_at.format(PAYMENT_DATE_FORMAT).to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceUpdateRequest {
    #[serde(rename = "Invoice")]
    pub invoice: InvoiceFields,
    #[serde(rename = "Payment")]
    pub payment: Vec<InvoicePayment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceFields {
    pub draft: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoicePayment {
    pub payment_method: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_id: String,
    pub date: String,
}
