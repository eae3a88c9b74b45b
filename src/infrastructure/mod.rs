//! Gateway client implementations.

pub mod scripted;
