use super::checkout::{CheckoutSession, Customer, SessionRequest};
use super::invoice::InvoiceFinalization;
use super::order::OrderStatusResponse;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Hosted-checkout payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate_checkout(&self, request: &SessionRequest) -> Result<CheckoutSession>;
    async fn retrieve_order(&self, order_id: &str) -> Result<OrderStatusResponse>;
}

/// Invoicing platform holding the draft invoices the gateway orders pay for.
#[async_trait]
pub trait InvoicingPlatform: Send + Sync {
    /// True when the invoice has already been finalized, so it must not be paid twice.
    async fn invoice_already_finalized(&self, invoice_id: &str) -> Result<bool>;
    async fn mark_invoice_paid(&self, finalization: &InvoiceFinalization) -> Result<()>;
}

/// Short-lived customer details keyed by gateway order id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Customer>>;
    async fn set(&self, key: &str, customer: Customer, ttl: Duration) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type InvoicingPlatformBox = Box<dyn InvoicingPlatform>;
pub type SessionStoreBox = Box<dyn SessionStore>;

pub type SessionStoreFactory = Box<dyn Fn() -> SessionStoreBox + Send + Sync>;
