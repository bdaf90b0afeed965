use crate::domain::checkout::{CheckoutRequest, CheckoutSession, MerchantProfile, SessionRequest};
use crate::domain::classification::{ClassificationResult, classify};
use crate::domain::invoice::InvoiceFinalization;
use crate::domain::order::OrderStatusResponse;
use crate::domain::ports::{InvoicingPlatformBox, PaymentGatewayBox, SessionStoreBox};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Policy knobs for the relay.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub merchant: MerchantProfile,
    /// How long checkout customer details are kept for the later invoice update.
    pub session_ttl: Duration,
    /// Card fee added to the amount charged at the gateway, in percent.
    pub surcharge_percent: Option<Decimal>,
}

/// What happened to the invoice during a verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceUpdate {
    Finalized,
    AlreadyFinalized,
    /// The payment was not successful, so the invoice was left untouched.
    Skipped,
    Failed(String),
}

/// Result of verifying one order, including where to send the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub order_id: String,
    /// `None` when the order could not be retrieved from the gateway.
    pub classification: Option<ClassificationResult>,
    pub invoice: InvoiceUpdate,
    pub redirect_url: String,
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        self.classification
            .as_ref()
            .is_some_and(ClassificationResult::is_success)
    }
}

/// Bridges the hosted-checkout gateway and the invoicing platform.
///
/// `CheckoutRelay` owns its collaborators as trait objects, so tests and the
/// CLI can plug in any gateway, invoicing platform, or session store.
pub struct CheckoutRelay {
    gateway: PaymentGatewayBox,
    invoicing: InvoicingPlatformBox,
    sessions: SessionStoreBox,
    settings: RelaySettings,
}

impl CheckoutRelay {
    /// Creates a new `CheckoutRelay` instance.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The payment gateway that hosts the checkout.
    /// * `invoicing` - The platform holding the draft invoices.
    /// * `sessions` - Short-lived store for customer details between checkout and verification.
    /// * `settings` - Merchant profile and checkout policy.
    pub fn new(
        gateway: PaymentGatewayBox,
        invoicing: InvoicingPlatformBox,
        sessions: SessionStoreBox,
        settings: RelaySettings,
    ) -> Self {
        Self {
            gateway,
            invoicing,
            sessions,
            settings,
        }
    }

    /// Opens a hosted checkout session for a draft invoice.
    ///
    /// The customer profile is cached under the draft id until the session TTL
    /// elapses so the invoice notes can be filled in after payment.
    pub async fn initiate_checkout(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        request.validate()?;
        let session_request =
            SessionRequest::build(&request, &self.settings.merchant, self.settings.surcharge_percent)?;
        let order_id = session_request.order_id().to_string();

        if let Some(customer) = request.customer.clone() {
            self.sessions
                .set(&order_id, customer, self.settings.session_ttl)
                .await?;
        }

        tracing::info!(
            order_id = %order_id,
            amount = %session_request.order.amount,
            currency = %session_request.order.currency,
            "initiating checkout"
        );

        match self.gateway.initiate_checkout(&session_request).await {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "gateway rejected checkout session");
                if let Err(store_err) = self.sessions.delete(&order_id).await {
                    tracing::warn!(order_id = %order_id, error = %store_err, "failed to evict cached customer");
                }
                Err(e)
            }
        }
    }

    /// Verifies an order with the gateway and settles its invoice when paid.
    ///
    /// Never fails: a gateway error counts as an unsuccessful payment, and an
    /// invoicing error is reported in [`VerificationOutcome::invoice`].
    pub async fn verify_order(&self, order_id: &str) -> VerificationOutcome {
        let order = match self.gateway.retrieve_order(order_id).await {
            Ok(order) => order,
            Err(e) => {
                tracing::error!(order_id, error = %e, "failed to retrieve order");
                return self.outcome(order_id, None, InvoiceUpdate::Skipped);
            }
        };

        let classification = classify(&order);
        tracing::info!(
            order_id,
            result = ?classification.result,
            status = ?classification.status,
            gateway_code = %classification.gateway_code,
            acquirer_message = %classification.acquirer_message,
            "order classified"
        );

        let invoice = if classification.is_success() {
            self.finalize_invoice(order_id, &order).await
        } else {
            InvoiceUpdate::Skipped
        };

        self.outcome(order_id, Some(classification), invoice)
    }

    async fn finalize_invoice(&self, order_id: &str, order: &OrderStatusResponse) -> InvoiceUpdate {
        match self.invoicing.invoice_already_finalized(order_id).await {
            Ok(true) => {
                tracing::info!(order_id, "invoice already finalized, skipping");
                return InvoiceUpdate::AlreadyFinalized;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(order_id, error = %e, "could not check invoice state");
                return InvoiceUpdate::Failed(e.to_string());
            }
        }

        let Some(amount) = order.amount else {
            tracing::error!(order_id, "gateway order carries no amount");
            return InvoiceUpdate::Failed("gateway order carries no amount".to_string());
        };

        let cached = match self.sessions.get(order_id).await {
            Ok(customer) => customer,
            Err(e) => {
                tracing::warn!(order_id, error = %e, "session store lookup failed");
                None
            }
        };
        let customer = cached
            .or_else(|| order.customer.clone())
            .unwrap_or_default();

        let finalization = InvoiceFinalization {
            invoice_id: order_id.to_string(),
            amount,
            currency: order.currency.clone(),
            card_brand: order.card_brand().to_string(),
            customer,
            paid_at: chrono::Utc::now(),
        };

        match self.invoicing.mark_invoice_paid(&finalization).await {
            Ok(()) => {
                if let Err(e) = self.sessions.delete(order_id).await {
                    tracing::warn!(order_id, error = %e, "failed to evict cached customer");
                }
                tracing::info!(order_id, amount = %amount, "invoice finalized");
                InvoiceUpdate::Finalized
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "failed to finalize invoice");
                InvoiceUpdate::Failed(e.to_string())
            }
        }
    }

    fn outcome(
        &self,
        order_id: &str,
        classification: Option<ClassificationResult>,
        invoice: InvoiceUpdate,
    ) -> VerificationOutcome {
        let paid = classification
            .as_ref()
            .is_some_and(ClassificationResult::is_success);
        let redirect_url = if paid {
            self.settings.merchant.thank_you_url(order_id)
        } else {
            self.settings.merchant.error_url(order_id)
        };

        VerificationOutcome {
            order_id: order_id.to_string(),
            classification,
            invoice,
            redirect_url,
        }
    }
}
