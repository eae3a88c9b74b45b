//! Gateway status codes as closed enums.
//!
//! Every enum keeps the raw value of codes it does not know in an `Other`
//! variant so callers can report it; none of them default to success.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pending reason for a payment that is authorized but not yet captured.
pub const PENDING_REASON_AUTHORIZATION: &str = "authorization";

/// What the buyer has done with the checkout session (`CHECKOUTSTATUS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStatus {
    NotInitiated,
    InProgress,
    Failed,
    Completed,
    Other(String),
}

impl From<&str> for CheckoutStatus {
    fn from(value: &str) -> Self {
        match value {
            "PaymentActionNotInitiated" => Self::NotInitiated,
            "PaymentActionInProgress" => Self::InProgress,
            "PaymentActionFailed" => Self::Failed,
            "PaymentActionCompleted" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }
}

/// `PAYERSTATUS` of the buyer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayerStatus {
    Verified,
    Unverified,
    Other(String),
}

impl From<&str> for PayerStatus {
    fn from(value: &str) -> Self {
        match value {
            "verified" => Self::Verified,
            "unverified" => Self::Unverified,
            other => Self::Other(other.to_string()),
        }
    }
}

/// `PAYMENTSTATUS` of a payment, capture or authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Completed,
    Pending,
    Expired,
    Denied,
    Failed,
    Voided,
    Refunded,
    Other(String),
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "Completed" => Self::Completed,
            "Pending" => Self::Pending,
            "Expired" => Self::Expired,
            "Denied" => Self::Denied,
            "Failed" => Self::Failed,
            "Voided" => Self::Voided,
            "Refunded" => Self::Refunded,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("Completed"),
            Self::Pending => f.write_str("Pending"),
            Self::Expired => f.write_str("Expired"),
            Self::Denied => f.write_str("Denied"),
            Self::Failed => f.write_str("Failed"),
            Self::Voided => f.write_str("Voided"),
            Self::Refunded => f.write_str("Refunded"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// `REFUNDSTATUS` of a refund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundStatus {
    Instant,
    Delayed,
    Other(String),
}

impl From<&str> for RefundStatus {
    fn from(value: &str) -> Self {
        match value {
            "instant" => Self::Instant,
            "delayed" => Self::Delayed,
            other => Self::Other(other.to_string()),
        }
    }
}

/// How the gateway should treat the funds of a checkout payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentAction {
    /// Reserve funds for a later capture.
    Authorization,
    /// Reserve and settle in one step.
    Sale,
}

impl PaymentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorization => "Authorization",
            Self::Sale => "Sale",
        }
    }
}

/// Whether a capture closes the authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompleteType {
    Complete,
    NotComplete,
}

impl CompleteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::NotComplete => "NotComplete",
        }
    }
}
