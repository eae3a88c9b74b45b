use super::classify::{
    Step, action_required, ensure_success, fail_configuration, fail_status, finish, pending,
};
use super::outcome::Outcome;
use super::plugin::ExpressCheckoutPlugin;
use crate::domain::extended_data::RequestOptions;
use crate::domain::payment::Payment;
use crate::domain::ports::params;
use crate::domain::response::fields;
use crate::domain::status::{
    CheckoutStatus, PENDING_REASON_AUTHORIZATION, PayerStatus, PaymentAction, PaymentStatus,
};
use crate::domain::transaction::FinancialTransaction;
use crate::error::Result;
use tracing::{debug, info};

impl ExpressCheckoutPlugin {
    /// Reserves the requested amount on the buyer's account.
    pub async fn approve(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Result<Outcome> {
        info!(amount = %tx.requested_amount, "approving checkout payment");
        finish(
            self.complete_checkout(tx, payment, PaymentAction::Authorization)
                .await,
        )
    }

    /// Reserves and settles the requested amount in one gateway payment.
    pub async fn approve_and_deposit(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Result<Outcome> {
        info!(amount = %tx.requested_amount, "approving and depositing checkout payment");
        finish(self.complete_checkout(tx, payment, PaymentAction::Sale).await)
    }

    async fn complete_checkout(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
        action: PaymentAction,
    ) -> Step<()> {
        let token = self.obtain_token(tx, payment, action).await?;

        let details = self.client.get_express_checkout_details(&token).await?;
        ensure_success(&details, tx)?;

        let checkout_status =
            CheckoutStatus::from(details.get(fields::CHECKOUT_STATUS).unwrap_or_default());
        let payer_status =
            PayerStatus::from(details.get(fields::PAYER_STATUS).unwrap_or_default());
        debug!(?checkout_status, ?payer_status, "checkout details received");

        match checkout_status {
            CheckoutStatus::Failed => {
                return Err(fail_status(tx, "PaymentActionFailed", "PaymentAction failed."));
            }
            CheckoutStatus::Completed => {}
            CheckoutStatus::NotInitiated if payer_status == PayerStatus::Verified => {}
            _ => {
                let redirect_url = self.client.authenticate_token_url(&token);
                return Err(action_required(tx, redirect_url));
            }
        }

        let payer_id = details.require(fields::PAYER_ID)?.to_string();
        tx.extended_data.payer_id = Some(payer_id.clone());

        let mut options = RequestOptions::new();
        options.insert(params::PAYMENT_CURRENCY_CODE.to_string(), payment.currency.clone());

        let response = self
            .client
            .do_express_checkout_payment(&token, tx.requested_amount, action, &payer_id, options)
            .await?;
        ensure_success(&response, tx)?;

        match PaymentStatus::from(response.get(fields::PAYMENT_INFO_STATUS).unwrap_or_default()) {
            PaymentStatus::Completed => {}
            PaymentStatus::Pending => {
                // An authorization waits for a separate deposit.
                let reason = response.get(fields::PAYMENT_INFO_PENDING_REASON);
                if reason != Some(PENDING_REASON_AUTHORIZATION) {
                    tx.reference_number = response
                        .get(fields::PAYMENT_INFO_TRANSACTION_ID)
                        .map(str::to_string);
                    return Err(pending(tx, reason));
                }
            }
            status => {
                let message = format!("PaymentStatus is not completed: {}", status);
                return Err(fail_status(tx, status.to_string(), message));
            }
        }

        let transaction_id = response
            .require(fields::PAYMENT_INFO_TRANSACTION_ID)?
            .to_string();
        let amount = response.amount(fields::PAYMENT_INFO_AMOUNT)?;

        if action == PaymentAction::Authorization {
            tx.extended_data.authorization_id = Some(transaction_id.clone());
        }
        tx.settle(transaction_id, amount);
        info!(reference = tx.reference_number.as_deref(), %amount, "checkout payment completed");
        Ok(())
    }

    /// Returns the stored checkout token, or registers a new checkout and
    /// sends the buyer to authorize it.
    async fn obtain_token(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
        action: PaymentAction,
    ) -> Step<String> {
        if let Some(token) = &tx.extended_data.token {
            debug!(%token, "reusing checkout token");
            return Ok(token.clone());
        }

        let mut options = tx.extended_data.checkout_options.clone();
        options.insert(params::PAYMENT_ACTION.to_string(), action.as_str().to_string());
        options.insert(params::PAYMENT_CURRENCY_CODE.to_string(), payment.currency.clone());

        let Some(return_url) = self.config.resolve_return_url(&tx.extended_data) else {
            return Err(fail_configuration(tx, "MissingReturnUrl", "You must configure a return url."));
        };
        let return_url = return_url.to_string();
        let Some(cancel_url) = self.config.resolve_cancel_url(&tx.extended_data) else {
            return Err(fail_configuration(tx, "MissingCancelUrl", "You must configure a cancel url."));
        };
        let cancel_url = cancel_url.to_string();

        let response = self
            .client
            .set_express_checkout(tx.requested_amount, &return_url, &cancel_url, options)
            .await?;
        ensure_success(&response, tx)?;

        let token = response.require(fields::TOKEN)?.to_string();
        info!(%token, "registered checkout token");
        let redirect_url = self.client.authenticate_token_url(&token);
        tx.extended_data.token = Some(token);

        Err(action_required(tx, redirect_url))
    }
}
