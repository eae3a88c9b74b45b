use super::amount::Amount;
use crate::error::{PluginError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// NVP field names read from gateway responses.
pub mod fields {
    pub const ACK: &str = "ACK";
    pub const ERROR_CODE: &str = "L_ERRORCODE0";
    pub const TOKEN: &str = "TOKEN";
    pub const CHECKOUT_STATUS: &str = "CHECKOUTSTATUS";
    pub const PAYER_STATUS: &str = "PAYERSTATUS";
    pub const PAYER_ID: &str = "PAYERID";
    pub const PAYMENT_INFO_STATUS: &str = "PAYMENTINFO_0_PAYMENTSTATUS";
    pub const PAYMENT_INFO_PENDING_REASON: &str = "PAYMENTINFO_0_PENDINGREASON";
    pub const PAYMENT_INFO_TRANSACTION_ID: &str = "PAYMENTINFO_0_TRANSACTIONID";
    pub const PAYMENT_INFO_AMOUNT: &str = "PAYMENTINFO_0_AMT";
    pub const PAYMENT_STATUS: &str = "PAYMENTSTATUS";
    pub const PENDING_REASON: &str = "PENDINGREASON";
    pub const TRANSACTION_ID: &str = "TRANSACTIONID";
    pub const AUTHORIZATION_ID: &str = "AUTHORIZATIONID";
    pub const AMOUNT: &str = "AMT";
    pub const REFUND_STATUS: &str = "REFUNDSTATUS";
    pub const REFUND_TRANSACTION_ID: &str = "REFUNDTRANSACTIONID";
    pub const NET_REFUND_AMOUNT: &str = "NETREFUNDAMT";
    pub const GROSS_REFUND_AMOUNT: &str = "GROSSREFUNDAMT";
}

/// The envelope every gateway call returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub success: bool,
    #[serde(default)]
    pub body: BTreeMap<String, String>,
}

impl GatewayResponse {
    /// Builds a response whose success flag is derived from its `ACK` field.
    pub fn from_fields<K, V>(body: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let body: BTreeMap<String, String> = body
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let success = matches!(
            body.get(fields::ACK).map(String::as_str),
            Some("Success") | Some("SuccessWithWarning")
        );
        Self { success, body }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.body.get(field).map(String::as_str)
    }

    /// A field the caller cannot continue without.
    pub fn require(&self, field: &'static str) -> Result<&str> {
        self.get(field).ok_or(PluginError::MissingField(field))
    }

    pub fn amount(&self, field: &'static str) -> Result<Amount> {
        self.require(field)?.parse()
    }
}

impl fmt::Display for GatewayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .body
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{{success={}, {}}}", self.success, pairs.join(", "))
    }
}
