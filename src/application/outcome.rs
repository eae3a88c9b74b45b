use serde::Serialize;

/// Result of one plugin operation as seen by the host framework.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The gateway processed the transaction.
    Success,
    /// Accepted by the gateway but not final yet.
    Pending { reason: Option<String> },
    /// The buyer must visit `redirect_url` before the operation is re-invoked.
    ActionRequired { redirect_url: String },
    /// Not retried by the plugin.
    Failed(FinancialFailure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The gateway rejected the call.
    Gateway,
    /// The gateway accepted the call but reported an unusable status.
    Status,
    /// The plugin is missing configuration needed to build the call.
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialFailure {
    pub kind: FailureKind,
    pub message: String,
}
