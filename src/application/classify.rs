//! Turns gateway envelopes and statuses into outcomes.
//!
//! Steps of an operation return [`Step`]; any non-success outcome travels up
//! through `?` as a [`Halt`] and is unpacked once by [`finish`].

use super::outcome::{FailureKind, FinancialFailure, Outcome};
use crate::domain::response::{GatewayResponse, fields};
use crate::domain::transaction::{
    FinancialTransaction, REASON_CODE_ACTION_REQUIRED, REASON_CODE_SUCCESS, RESPONSE_CODE_FAILED,
    RESPONSE_CODE_PENDING,
};
use crate::error::{PluginError, Result};
use tracing::{info, warn};

const UNKNOWN_ACK: &str = "Failure";
const UNKNOWN_ERROR_CODE: &str = "unknown";

#[derive(Debug)]
pub(crate) enum Halt {
    Outcome(Outcome),
    Error(PluginError),
}

impl From<PluginError> for Halt {
    fn from(err: PluginError) -> Self {
        Halt::Error(err)
    }
}

pub(crate) type Step<T> = std::result::Result<T, Halt>;

pub(crate) fn finish(step: Step<()>) -> Result<Outcome> {
    match step {
        Ok(()) => Ok(Outcome::Success),
        Err(Halt::Outcome(outcome)) => Ok(outcome),
        Err(Halt::Error(err)) => Err(err),
    }
}

/// Stops the operation unless the gateway acknowledged the call.
pub(crate) fn ensure_success(
    response: &GatewayResponse,
    tx: &mut FinancialTransaction,
) -> Step<()> {
    if response.is_success() {
        return Ok(());
    }

    tx.set_codes(
        response.get(fields::ACK).unwrap_or(UNKNOWN_ACK),
        response.get(fields::ERROR_CODE).unwrap_or(UNKNOWN_ERROR_CODE),
    );
    warn!(
        response_code = tx.response_code.as_deref(),
        reason_code = tx.reason_code.as_deref(),
        "gateway rejected the call"
    );

    Err(failed(
        FailureKind::Gateway,
        format!("Gateway response was not successful: {}", response),
    ))
}

/// Hard failure driven by a status the flow cannot accept.
pub(crate) fn fail_status(
    tx: &mut FinancialTransaction,
    reason_code: impl Into<String>,
    message: impl Into<String>,
) -> Halt {
    tx.set_codes(RESPONSE_CODE_FAILED, reason_code);
    let message = message.into();
    warn!(reason_code = tx.reason_code.as_deref(), "{}", message);
    failed(FailureKind::Status, message)
}

pub(crate) fn fail_configuration(
    tx: &mut FinancialTransaction,
    reason_code: impl Into<String>,
    message: impl Into<String>,
) -> Halt {
    tx.set_codes(RESPONSE_CODE_FAILED, reason_code);
    failed(FailureKind::Configuration, message.into())
}

pub(crate) fn pending(tx: &mut FinancialTransaction, reason: Option<&str>) -> Halt {
    tx.set_codes(RESPONSE_CODE_PENDING, reason.unwrap_or(REASON_CODE_SUCCESS));
    info!(reason, "payment is pending");
    Halt::Outcome(Outcome::Pending {
        reason: reason.map(str::to_string),
    })
}

pub(crate) fn action_required(tx: &mut FinancialTransaction, redirect_url: String) -> Halt {
    tx.set_codes(RESPONSE_CODE_PENDING, REASON_CODE_ACTION_REQUIRED);
    info!(%redirect_url, "buyer action required");
    Halt::Outcome(Outcome::ActionRequired { redirect_url })
}

fn failed(kind: FailureKind, message: String) -> Halt {
    Halt::Outcome(Outcome::Failed(FinancialFailure { kind, message }))
}
