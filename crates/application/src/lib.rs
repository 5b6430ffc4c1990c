//! Tubegate Application Layer
//!
//! Ports implemented by the infrastructure crate, the identity pool and the
//! search dispatch use cases.
pub mod ports;
pub mod services;
pub mod use_cases;
