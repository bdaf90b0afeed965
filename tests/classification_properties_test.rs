mod common;

use checkout_relay::domain::classification::{
    FAIL_CODES, NO_ACQUIRER_MESSAGE, OrderStatus, OutcomeResult, UNKNOWN_GATEWAY_CODE, classify,
};
use common::{order, transaction};

#[test]
fn test_empty_history_fails_with_defaults() {
    let result = classify(&order("1", vec![]));

    assert_eq!(result.result, OutcomeResult::Failure);
    assert_eq!(result.status, OrderStatus::Failed);
    assert_eq!(result.gateway_code, UNKNOWN_GATEWAY_CODE);
    assert_eq!(result.acquirer_message, NO_ACQUIRER_MESSAGE);
}

#[test]
fn test_single_approval_is_captured() {
    let result = classify(&order("1", vec![transaction("PAYMENT", "SUCCESS", "APPROVED")]));

    assert_eq!(result.result, OutcomeResult::Success);
    assert_eq!(result.status, OrderStatus::Captured);
}

#[test]
fn test_failure_anywhere_in_history_wins() {
    let decline_last = order(
        "1",
        vec![
            transaction("AUTHORIZATION", "SUCCESS", "APPROVED"),
            transaction("PAYMENT", "FAILURE", "DECLINED"),
        ],
    );
    let decline_first = order(
        "2",
        vec![
            transaction("PAYMENT", "FAILURE", "EXPIRED_CARD"),
            transaction("VERIFICATION", "SUCCESS", "APPROVED"),
            transaction("CAPTURE", "SUCCESS", "APPROVED"),
        ],
    );

    for snapshot in [decline_last, decline_first] {
        let result = classify(&snapshot);
        assert_eq!(result.result, OutcomeResult::Failure);
        assert_eq!(result.status, OrderStatus::Failed);
    }
}

#[test]
fn test_every_fail_code_fails_even_with_success_result() {
    for code in FAIL_CODES {
        let result = classify(&order("1", vec![transaction("PAYMENT", "SUCCESS", code)]));
        assert_eq!(result.result, OutcomeResult::Failure, "code {code}");
        assert_eq!(result.gateway_code, code);
    }
}

#[test]
fn test_timed_out_alone_fails() {
    let result = classify(&order("1", vec![transaction("PAYMENT", "PENDING", "TIMED_OUT")]));

    assert_eq!(result.result, OutcomeResult::Failure);
    assert_eq!(result.status, OrderStatus::Failed);
}

#[test]
fn test_lowercase_codes_classify_like_uppercase() {
    let lower = classify(&order("1", vec![transaction("PAYMENT", "SUCCESS", "approved")]));
    let upper = classify(&order("1", vec![transaction("PAYMENT", "SUCCESS", "APPROVED")]));

    assert_eq!(lower, upper);
}

#[test]
fn test_money_moving_record_is_selected() {
    let result = classify(&order(
        "1",
        vec![
            transaction("VERIFICATION", "SUCCESS", "BASIC_VERIFICATION_SUCCESSFUL"),
            transaction("PAYMENT", "SUCCESS", "APPROVED"),
        ],
    ));

    assert_eq!(result.selected_transaction.transaction_type(), Some("PAYMENT"));
    assert_eq!(result.result, OutcomeResult::Success);
}

#[test]
fn test_classification_is_repeatable() {
    let snapshot = order(
        "1",
        vec![
            transaction("AUTHORIZATION", "SUCCESS", "APPROVED"),
            transaction("CAPTURE", "SUCCESS", "APPROVED_PENDING_SETTLEMENT"),
        ],
    );

    let first = classify(&snapshot);
    let second = classify(&snapshot);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
