//! Application layer containing the checkout orchestration.
//!
//! This module defines the `ExpressCheckoutPlugin`, the entry point the host
//! framework calls for each financial transaction. Every operation is a
//! sequential chain of gateway calls whose responses are classified into an
//! [`outcome::Outcome`].

mod capture;
mod checkout;
mod classify;
pub mod outcome;
pub mod plugin;
mod refund;

pub use capture::complete_type;
pub use refund::refund_options;
