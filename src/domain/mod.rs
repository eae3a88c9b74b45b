//! Domain model of the Express Checkout flow: the framework records the
//! plugin mutates, the gateway envelope it classifies and the port it calls.

pub mod amount;
pub mod extended_data;
pub mod payment;
pub mod ports;
pub mod response;
pub mod status;
pub mod transaction;
