use super::order::{OrderStatusResponse, TransactionRecord};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_GATEWAY_CODE: &str = "UNKNOWN";
pub const NO_ACQUIRER_MESSAGE: &str = "No message";

/// Transaction types that represent an actual movement of money.
pub const MONEY_MOVING_TYPES: [&str; 3] = ["PAYMENT", "AUTHORIZATION", "CAPTURE"];

/// Gateway codes that, together with a per-transaction `SUCCESS`, mean the customer paid.
pub const SUCCESS_CODES: [&str; 3] = ["APPROVED", "APPROVED_AUTO", "APPROVED_PENDING_SETTLEMENT"];

/// Gateway codes that always classify as a failure.
pub const FAIL_CODES: [&str; 14] = [
    "DECLINED",
    "DECLINED_AVS",
    "DECLINED_CSC",
    "DECLINED_AVS_CSC",
    "EXPIRED_CARD",
    "TIMED_OUT",
    "UNSPECIFIED_FAILURE",
    "ACQUIRER_SYSTEM_ERROR",
    "AUTHENTICATION_FAILED",
    "INSUFFICIENT_FUNDS",
    "BLOCKED",
    "CANCELLED",
    "FAILED",
    "ERROR",
];

/// Known gateway failure signals searched for anywhere in an order's history.
///
/// A pattern matches any gateway code containing it, so `DECLINED` also
/// catches `DECLINED_AVS`, `DECLINED_CSC`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePattern {
    Declined,
    ExpiredCard,
    TimedOut,
    UnspecifiedFailure,
    AcquirerSystemError,
}

impl FailurePattern {
    pub const ALL: [FailurePattern; 5] = [
        FailurePattern::Declined,
        FailurePattern::ExpiredCard,
        FailurePattern::TimedOut,
        FailurePattern::UnspecifiedFailure,
        FailurePattern::AcquirerSystemError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePattern::Declined => "DECLINED",
            FailurePattern::ExpiredCard => "EXPIRED_CARD",
            FailurePattern::TimedOut => "TIMED_OUT",
            FailurePattern::UnspecifiedFailure => "UNSPECIFIED_FAILURE",
            FailurePattern::AcquirerSystemError => "ACQUIRER_SYSTEM_ERROR",
        }
    }

    /// Returns the first pattern contained in `gateway_code`, ignoring case.
    pub fn detect(gateway_code: &str) -> Option<FailurePattern> {
        let code = gateway_code.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|pattern| code.contains(pattern.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeResult {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Captured,
    Authorized,
    Failed,
}

/// Normalized verdict for one order snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub result: OutcomeResult,
    pub status: OrderStatus,
    /// Uppercased gateway code of the selected transaction.
    pub gateway_code: String,
    pub acquirer_message: String,
    /// The record the verdict was derived from, kept for audit logs.
    pub selected_transaction: TransactionRecord,
}

impl ClassificationResult {
    pub fn is_success(&self) -> bool {
        self.result == OutcomeResult::Success
    }
}

/// Classifies a gateway order snapshot as paid or not.
///
/// Fails closed: the result is `SUCCESS` only when the selected transaction
/// reports `SUCCESS` with an approval code and no failure signal exists in the
/// whole transaction history.
pub fn classify(order: &OrderStatusResponse) -> ClassificationResult {
    let selected = select_transaction(&order.transaction)
        .cloned()
        .unwrap_or_default();

    let gateway_code = selected
        .gateway_code()
        .map(str::to_uppercase)
        .unwrap_or_else(|| UNKNOWN_GATEWAY_CODE.to_string());
    let acquirer_message = selected
        .acquirer_message()
        .unwrap_or(NO_ACQUIRER_MESSAGE)
        .to_string();
    let tx_result = selected
        .result
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_else(|| UNKNOWN_GATEWAY_CODE.to_string());

    let mut result = OutcomeResult::Failure;
    let mut status = OrderStatus::Failed;

    if tx_result == "SUCCESS" && SUCCESS_CODES.contains(&gateway_code.as_str()) {
        result = OutcomeResult::Success;
        status = OrderStatus::Captured;
    }

    // Failure evidence always wins over a prior success determination.
    if FAIL_CODES.contains(&gateway_code.as_str()) || tx_result == "FAILURE" {
        result = OutcomeResult::Failure;
        status = OrderStatus::Failed;
    }

    ClassificationResult {
        result,
        status,
        gateway_code,
        acquirer_message,
        selected_transaction: selected,
    }
}

/// Picks the record that best represents the customer-facing outcome.
///
/// The most recent failure signal anywhere in the history takes priority;
/// otherwise the most recent money-moving record, falling back to the most
/// recent record of any type.
pub fn select_transaction(history: &[TransactionRecord]) -> Option<&TransactionRecord> {
    let failure_override = history.iter().rev().find(|tx| {
        tx.gateway_code()
            .and_then(FailurePattern::detect)
            .is_some()
    });

    failure_override.or_else(|| {
        history
            .iter()
            .rev()
            .find(|tx| is_money_moving(tx))
            .or_else(|| history.last())
    })
}

fn is_money_moving(tx: &TransactionRecord) -> bool {
    tx.transaction_type().is_some_and(|kind| {
        MONEY_MOVING_TYPES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(kind))
    })
}
