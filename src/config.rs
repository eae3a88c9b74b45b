use crate::domain::extended_data::ExtendedData;
use serde::Deserialize;

/// Defaults applied when a transaction carries no URL override.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

impl PluginConfig {
    pub fn new(return_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            return_url: Some(return_url.into()),
            cancel_url: Some(cancel_url.into()),
        }
    }

    /// Layers `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: PluginConfig) -> Self {
        Self {
            return_url: other.return_url.or(self.return_url),
            cancel_url: other.cancel_url.or(self.cancel_url),
        }
    }

    pub fn resolve_return_url<'a>(&'a self, data: &'a ExtendedData) -> Option<&'a str> {
        data.return_url()
            .or_else(|| self.return_url.as_deref().filter(|url| !url.is_empty()))
    }

    pub fn resolve_cancel_url<'a>(&'a self, data: &'a ExtendedData) -> Option<&'a str> {
        data.cancel_url()
            .or_else(|| self.cancel_url.as_deref().filter(|url| !url.is_empty()))
    }
}
