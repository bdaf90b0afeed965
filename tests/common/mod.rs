#![allow(dead_code)]

use checkout_relay::application::relay::{CheckoutRelay, DEFAULT_SESSION_TTL, RelaySettings};
use checkout_relay::domain::checkout::MerchantProfile;
use checkout_relay::domain::order::OrderStatusResponse;
use checkout_relay::infrastructure::daftra::{DaftraClient, DaftraConfig};
use checkout_relay::infrastructure::in_memory::InMemorySessionStore;
use checkout_relay::infrastructure::mpgs::{MpgsConfig, MpgsGateway};
use serde_json::{Value, json};
use std::time::Duration;

pub const MERCHANT_ID: &str = "TESTMERCHANT";
pub const API_PASSWORD: &str = "gateway-secret";
pub const DAFTRA_API_KEY: &str = "daftra-key";
pub const SITE_URL: &str = "https://shop.example.com";

pub fn transaction(kind: &str, result: &str, gateway_code: &str) -> Value {
    json!({
        "result": result,
        "response": {"gatewayCode": gateway_code},
        "transaction": {"type": kind}
    })
}

pub fn order_json(id: &str, transactions: Vec<Value>) -> Value {
    json!({
        "id": id,
        "amount": 120.0,
        "currency": "USD",
        "transaction": transactions
    })
}

pub fn order(id: &str, transactions: Vec<Value>) -> OrderStatusResponse {
    serde_json::from_value(order_json(id, transactions)).unwrap()
}

pub fn approved_order_json(id: &str) -> Value {
    order_json(id, vec![transaction("PAYMENT", "SUCCESS", "APPROVED")])
}

pub fn gateway_path(suffix: &str) -> String {
    format!("/api/rest/version/100/merchant/{}/{}", MERCHANT_ID, suffix)
}

pub fn mpgs_gateway(uri: &str) -> MpgsGateway {
    MpgsGateway::new(MpgsConfig {
        host: format!("{}/", uri),
        merchant_id: MERCHANT_ID.to_string(),
        api_password: API_PASSWORD.to_string(),
        api_version: 100,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

pub fn daftra_client(uri: &str) -> DaftraClient {
    DaftraClient::new(DaftraConfig {
        domain: uri.to_string(),
        api_key: DAFTRA_API_KEY.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

pub fn settings() -> RelaySettings {
    RelaySettings {
        merchant: MerchantProfile {
            name: "Example Store".to_string(),
            logo_url: None,
            site_url: SITE_URL.to_string(),
        },
        session_ttl: DEFAULT_SESSION_TTL,
        surcharge_percent: None,
    }
}

pub fn relay(gateway_uri: &str, daftra_uri: &str, sessions: InMemorySessionStore) -> CheckoutRelay {
    CheckoutRelay::new(
        Box::new(mpgs_gateway(gateway_uri)),
        Box::new(daftra_client(daftra_uri)),
        Box::new(sessions),
        settings(),
    )
}
