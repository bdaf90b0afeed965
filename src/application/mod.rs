//! Application layer orchestrating the checkout workflow.
//!
//! This module defines the `CheckoutRelay`, which opens hosted checkout sessions
//! and, once the customer returns, verifies the order with the gateway and
//! settles the matching invoice exactly once.

pub mod relay;
