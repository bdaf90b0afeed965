//! Domain types and the capabilities the relay depends on.
//!
//! `classification` holds the only real decision in the crate: turning a
//! gateway order snapshot into a paid/not-paid verdict. Everything else here
//! describes the payloads exchanged with the gateway and the invoicing platform.

pub mod checkout;
pub mod classification;
pub mod invoice;
pub mod order;
pub mod ports;
