use crate::domain::checkout::CheckoutRequest;
use crate::domain::order::OrderStatusResponse;
use crate::error::Result;
use serde::Deserialize;
use std::io::Read;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<OrderStatusResponse>),
    One(Box<OrderStatusResponse>),
}

/// Reads gateway payloads and checkout requests from a JSON source.
///
/// Wraps any `Read` (file, stdin, byte slice) and decodes the whole document.
pub struct JsonReader<R: Read> {
    source: R,
}

impl<R: Read> JsonReader<R> {
    /// Creates a new `JsonReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Decodes either a single order snapshot or an array of them.
    pub fn orders(self) -> Result<Vec<OrderStatusResponse>> {
        let parsed: OneOrMany = serde_json::from_reader(self.source)?;
        Ok(match parsed {
            OneOrMany::Many(orders) => orders,
            OneOrMany::One(order) => vec![*order],
        })
    }

    pub fn checkout_request(self) -> Result<CheckoutRequest> {
        Ok(serde_json::from_reader(self.source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_single_order() {
        let data = r#"{"id": "1", "transaction": [{"result": "SUCCESS"}]}"#;
        let orders = JsonReader::new(data.as_bytes()).orders().unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id.as_deref(), Some("1"));
    }

    #[test]
    fn test_reader_order_array() {
        let data = r#"[{"id": "1"}, {"id": "2", "transaction": []}]"#;
        let orders = JsonReader::new(data.as_bytes()).orders().unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_reader_malformed_document() {
        let result = JsonReader::new("{not json".as_bytes()).orders();
        assert!(matches!(result, Err(RelayError::JsonError(_))));
    }

    #[test]
    fn test_reader_checkout_request() {
        let data = r#"{"amount": "19.99", "currency": "USD", "draftId": "77",
                       "customer": {"firstName": "Lea", "phone": "+961"}}"#;
        let request = JsonReader::new(data.as_bytes()).checkout_request().unwrap();

        assert_eq!(request.amount, dec!(19.99));
        assert_eq!(request.draft_id, "77");
        assert_eq!(request.customer.unwrap().phone.as_deref(), Some("+961"));
    }
}
