use super::checkout::Customer;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback shown on invoices when the gateway does not report a card brand.
pub const DEFAULT_CARD_BRAND: &str = "Card";

/// Snapshot of an order as returned by the gateway's "retrieve order" endpoint.
///
/// The gateway payload is loosely typed: every field may be missing, and the
/// `transaction` history may be empty or contain event types this crate does not
/// know about. Missing (or `null`) values deserialize to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_of_funds: Option<SourceOfFunds>,
    /// Chronological list of gateway-side events for this order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub transaction: Vec<TransactionRecord>,
}

impl OrderStatusResponse {
    /// Card brand for display: order-level source of funds first, then the most
    /// recent transaction that carries one.
    pub fn card_brand(&self) -> &str {
        self.source_of_funds
            .as_ref()
            .and_then(SourceOfFunds::card_brand)
            .or_else(|| {
                self.transaction.iter().rev().find_map(|tx| {
                    tx.source_of_funds
                        .as_ref()
                        .and_then(SourceOfFunds::card_brand)
                })
            })
            .unwrap_or(DEFAULT_CARD_BRAND)
    }
}

/// One gateway-side event (authorization, capture, payment attempt, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: GatewayResponse,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transaction: TransactionDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_of_funds: Option<SourceOfFunds>,
}

impl TransactionRecord {
    pub fn transaction_type(&self) -> Option<&str> {
        self.transaction.r#type.as_deref()
    }

    pub fn gateway_code(&self) -> Option<&str> {
        self.response.gateway_code.as_deref()
    }

    pub fn acquirer_message(&self) -> Option<&str> {
        self.response.acquirer_message.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquirer_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOfFunds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided: Option<ProvidedFunds>,
}

impl SourceOfFunds {
    fn card_brand(&self) -> Option<&str> {
        self.provided
            .as_ref()?
            .card
            .as_ref()?
            .brand
            .as_deref()
            .filter(|brand| !brand.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvidedFunds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
}

/// Display-only card metadata; the number is already masked by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
