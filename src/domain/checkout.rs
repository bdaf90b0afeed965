use crate::error::{RelayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const API_OPERATION: &str = "INITIATE_CHECKOUT";
pub const CHECKOUT_MODE: &str = "WEBSITE";
pub const INTERACTION_OPERATION: &str = "PURCHASE";
pub const LOCALE: &str = "en_US";
pub const RETRY_ATTEMPT_COUNT: u8 = 2;
const HIDE: &str = "HIDE";

/// Customer profile captured at checkout and reused on the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, alias = "mobilePhone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governorate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Body accepted by the relay to start a hosted checkout.
///
/// The invoicing draft id doubles as the gateway order id so the two systems
/// can be matched up on verification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub amount: Decimal,
    pub currency: String,
    pub draft_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

impl CheckoutRequest {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(RelayError::ValidationError(
                "Amount must be positive".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(RelayError::ValidationError(
                "Currency is required".to_string(),
            ));
        }
        if self.draft_id.trim().is_empty() {
            return Err(RelayError::ValidationError(
                "Draft id is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Merchant branding and the storefront the customer returns to.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantProfile {
    pub name: String,
    pub logo_url: Option<String>,
    pub site_url: String,
}

impl MerchantProfile {
    pub fn thank_you_url(&self, order_id: &str) -> String {
        format!(
            "{}/client/contents/thankyou?order_id={}",
            self.site_url.trim_end_matches('/'),
            order_id
        )
    }

    pub fn error_url(&self, order_id: &str) -> String {
        format!(
            "{}/client/contents/error?order_id={}",
            self.site_url.trim_end_matches('/'),
            order_id
        )
    }
}

/// `INITIATE_CHECKOUT` body sent to the gateway's session endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub api_operation: &'static str,
    pub checkout_mode: &'static str,
    pub interaction: Interaction,
    pub order: SessionOrder,
    pub customer: GatewayCustomer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub operation: &'static str,
    pub locale: &'static str,
    pub merchant: InteractionMerchant,
    pub display_control: DisplayControl,
    pub return_url: String,
    pub redirect_merchant_url: String,
    pub retry_attempt_count: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionMerchant {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayControl {
    pub billing_address: &'static str,
    pub customer_email: &'static str,
    pub shipping: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOrder {
    pub id: String,
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
}

/// The subset of customer fields the gateway accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayCustomer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: String,
}

impl From<&Customer> for GatewayCustomer {
    fn from(customer: &Customer) -> Self {
        Self {
            email: customer.email.clone().unwrap_or_default(),
            first_name: customer.first_name.clone().unwrap_or_default(),
            last_name: customer.last_name.clone().unwrap_or_default(),
            mobile_phone: customer.phone.clone().unwrap_or_default(),
        }
    }
}

impl SessionRequest {
    /// Builds the gateway body for `request`.
    ///
    /// When `surcharge_percent` is set, the charged amount is raised by that
    /// percentage and rounded to two decimal places. A negative percent or an
    /// amount that overflows once surcharged is a `ValidationError`.
    pub fn build(
        request: &CheckoutRequest,
        merchant: &MerchantProfile,
        surcharge_percent: Option<Decimal>,
    ) -> Result<Self> {
        let order_id = request.draft_id.trim().to_string();
        let amount = match surcharge_percent {
            Some(percent) => surcharged(request.amount, percent)?,
            None => request.amount,
        };
        let description = request
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("Draft Order #{} - {}", order_id, merchant.name));

        Ok(Self {
            api_operation: API_OPERATION,
            checkout_mode: CHECKOUT_MODE,
            interaction: Interaction {
                operation: INTERACTION_OPERATION,
                locale: LOCALE,
                merchant: InteractionMerchant {
                    name: merchant.name.clone(),
                    logo: merchant.logo_url.clone(),
                    url: merchant.site_url.clone(),
                },
                display_control: DisplayControl {
                    billing_address: HIDE,
                    customer_email: HIDE,
                    shipping: HIDE,
                },
                return_url: merchant.thank_you_url(&order_id),
                redirect_merchant_url: merchant.error_url(&order_id),
                retry_attempt_count: RETRY_ATTEMPT_COUNT,
            },
            customer: request
                .customer
                .as_ref()
                .map(GatewayCustomer::from)
                .unwrap_or_default(),
            order: SessionOrder {
                id: order_id,
                amount,
                currency: request.currency.trim().to_uppercase(),
                description,
            },
        })
    }

    pub fn order_id(&self) -> &str {
        &self.order.id
    }
}

fn surcharged(amount: Decimal, percent: Decimal) -> Result<Decimal> {
    if percent < Decimal::ZERO {
        return Err(RelayError::ValidationError(format!(
            "Card surcharge must not be negative, got {}%",
            percent
        )));
    }
    Decimal::ONE_HUNDRED
        .checked_add(percent)
        .and_then(|factor| amount.checked_mul(factor))
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(|charged| charged.round_dp(2))
        .ok_or_else(|| {
            RelayError::ValidationError("Amount is too large to apply the card surcharge".to_string())
        })
}

/// Gateway reply to `INITIATE_CHECKOUT`; the session id seeds the hosted page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_indicator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
