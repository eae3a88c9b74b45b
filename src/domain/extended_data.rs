use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form gateway parameters keyed by their NVP field name.
pub type RequestOptions = BTreeMap<String, String>;

/// Scratch space carried by a transaction across the two checkout phases.
///
/// The serialized keys are the ones the host framework persists, so a
/// transaction saved before the buyer redirect resumes with the same data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedData {
    #[serde(rename = "express_checkout_token", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "paypal_payer_id", skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(rename = "checkout_params", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub checkout_options: RequestOptions,
}

impl ExtendedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn with_checkout_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.checkout_options.insert(key.into(), value.into());
        self
    }

    /// Return URL override, ignoring empty values.
    pub fn return_url(&self) -> Option<&str> {
        self.return_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Cancel URL override, ignoring empty values.
    pub fn cancel_url(&self) -> Option<&str> {
        self.cancel_url.as_deref().filter(|url| !url.is_empty())
    }
}
