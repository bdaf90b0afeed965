//! Adapters implementing the domain ports: HTTP clients for the gateway and the
//! invoicing platform, plus in-memory and file-backed session stores.

pub mod daftra;
pub mod file_store;
pub mod in_memory;
pub mod mpgs;
