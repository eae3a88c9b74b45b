use super::classify::{Step, ensure_success, fail_status, finish, pending};
use super::outcome::Outcome;
use super::plugin::ExpressCheckoutPlugin;
use crate::domain::amount::Amount;
use crate::domain::extended_data::RequestOptions;
use crate::domain::payment::Payment;
use crate::domain::ports::params;
use crate::domain::response::{GatewayResponse, fields};
use crate::domain::status::{CompleteType, PaymentStatus};
use crate::domain::transaction::FinancialTransaction;
use crate::error::{PluginError, Result};
use tracing::{info, warn};

/// A capture that settles the whole approved amount closes the authorization.
pub fn complete_type(requested: &Amount, approved: &Amount) -> CompleteType {
    if requested.matches(approved) {
        CompleteType::Complete
    } else {
        CompleteType::NotComplete
    }
}

fn payment_status(response: &GatewayResponse) -> PaymentStatus {
    PaymentStatus::from(response.get(fields::PAYMENT_STATUS).unwrap_or_default())
}

fn currency_options(currency: &str) -> RequestOptions {
    let mut options = RequestOptions::new();
    options.insert(params::CURRENCY_CODE.to_string(), currency.to_string());
    options
}

impl ExpressCheckoutPlugin {
    /// Captures funds reserved by the payment's approve transaction.
    pub async fn deposit(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Result<Outcome> {
        info!(amount = %tx.requested_amount, "depositing approved payment");
        finish(self.capture_and_confirm(tx, payment).await)
    }

    async fn capture_and_confirm(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Step<()> {
        let transaction_id = self.capture_with_reauthorization(tx, payment).await?;

        let details = self.client.get_transaction_details(&transaction_id).await?;
        ensure_success(&details, tx)?;

        match payment_status(&details) {
            PaymentStatus::Completed => {}
            PaymentStatus::Pending => {
                return Err(pending(tx, details.get(fields::PENDING_REASON)));
            }
            status => {
                let message = format!("PaymentStatus is not completed: {}", status);
                return Err(fail_status(tx, status.to_string(), message));
            }
        }

        let reference = details.require(fields::TRANSACTION_ID)?.to_string();
        let amount = details.amount(fields::AMOUNT)?;
        tx.settle(reference, amount);
        Ok(())
    }

    /// Captures the authorization and returns the captured transaction id.
    ///
    /// An expired authorization is re-authorized and captured once more;
    /// a second expiry fails the deposit.
    async fn capture_with_reauthorization(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Step<String> {
        let approve = payment
            .approve_transaction()
            .ok_or(PluginError::MissingTransaction("approve"))?;
        let authorization_id = approve
            .reference_number
            .clone()
            .ok_or(PluginError::MissingReference("approve"))?;
        let complete_type = complete_type(&tx.requested_amount, &payment.approved_amount);

        let capture = self
            .capture(tx, &authorization_id, complete_type, &payment.currency)
            .await?;
        if payment_status(&capture) != PaymentStatus::Expired {
            return Ok(capture.require(fields::TRANSACTION_ID)?.to_string());
        }

        warn!(%authorization_id, "authorization expired, reauthorizing");
        let reauthorization = self
            .client
            .do_reauthorization(
                &authorization_id,
                tx.requested_amount,
                complete_type,
                currency_options(&payment.currency),
            )
            .await?;
        ensure_success(&reauthorization, tx)?;

        let status = payment_status(&reauthorization);
        // The expired capture id is never looked up after a failed reauthorization.
        if status != PaymentStatus::Completed {
            let message = format!("Reauthorization is not completed: {}", status);
            return Err(fail_status(tx, status.to_string(), message));
        }

        let authorization_id = reauthorization.require(fields::AUTHORIZATION_ID)?.to_string();
        info!(%authorization_id, "reauthorized, capturing again");
        let capture = self
            .capture(tx, &authorization_id, complete_type, &payment.currency)
            .await?;
        if payment_status(&capture) == PaymentStatus::Expired {
            return Err(fail_status(
                tx,
                PaymentStatus::Expired.to_string(),
                "Authorization expired again after reauthorization",
            ));
        }

        Ok(capture.require(fields::TRANSACTION_ID)?.to_string())
    }

    async fn capture(
        &self,
        tx: &mut FinancialTransaction,
        authorization_id: &str,
        complete_type: CompleteType,
        currency: &str,
    ) -> Step<GatewayResponse> {
        let response = self
            .client
            .do_capture(
                authorization_id,
                tx.requested_amount,
                complete_type,
                currency_options(currency),
            )
            .await?;
        ensure_success(&response, tx)?;
        Ok(response)
    }
}
