use super::classify::{Step, ensure_success, finish, pending};
use super::outcome::Outcome;
use super::plugin::ExpressCheckoutPlugin;
use crate::domain::amount::Amount;
use crate::domain::extended_data::RequestOptions;
use crate::domain::payment::Payment;
use crate::domain::ports::params;
use crate::domain::response::fields;
use crate::domain::status::RefundStatus;
use crate::domain::transaction::FinancialTransaction;
use crate::error::{PluginError, Result};
use tracing::{info, warn};

/// Parameters for refunding `requested` out of a payment that processed
/// `processed`. A full refund sends none.
pub fn refund_options(requested: &Amount, processed: Option<&Amount>, currency: &str) -> RequestOptions {
    let mut options = RequestOptions::new();
    if processed.is_some_and(|processed| processed.matches(requested)) {
        return options;
    }

    options.insert(params::REFUND_TYPE.to_string(), params::REFUND_TYPE_PARTIAL.to_string());
    options.insert(params::AMOUNT.to_string(), requested.to_gateway_format());
    options.insert(params::CURRENCY_CODE.to_string(), currency.to_string());
    options
}

impl ExpressCheckoutPlugin {
    /// Refunds against the authorization of the payment.
    pub async fn credit(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Result<Outcome> {
        info!(amount = %tx.requested_amount, "crediting payment");
        finish(self.refund_authorization(tx, payment).await)
    }

    /// Refunds a settled deposit.
    pub async fn reverse_deposit(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Result<Outcome> {
        info!(amount = %tx.requested_amount, "reversing deposit");
        finish(self.refund_deposit(tx, payment).await)
    }

    /// Voids the payment's authorization.
    pub async fn reverse_approval(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Result<Outcome> {
        info!("reversing approval");
        finish(self.void_authorization(tx, payment).await)
    }

    async fn refund_authorization(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Step<()> {
        let approve = payment
            .approve_transaction()
            .ok_or(PluginError::MissingTransaction("approve"))?;
        let authorization_id = tx
            .extended_data
            .authorization_id
            .clone()
            .or_else(|| approve.extended_data.authorization_id.clone())
            .or_else(|| approve.reference_number.clone())
            .ok_or(PluginError::MissingReference("approve"))?;

        let options = refund_options(
            &tx.requested_amount,
            approve.processed_amount.as_ref(),
            &payment.currency,
        );
        let response = self
            .client
            .refund_transaction(&authorization_id, options)
            .await?;
        ensure_success(&response, tx)?;

        let reference = response.require(fields::REFUND_TRANSACTION_ID)?.to_string();
        let amount = response.amount(fields::NET_REFUND_AMOUNT)?;
        tx.settle(reference, amount);
        Ok(())
    }

    async fn refund_deposit(&self, tx: &mut FinancialTransaction, payment: &Payment) -> Step<()> {
        let transaction_id = payment
            .deposit_transactions()
            .next()
            .ok_or(PluginError::MissingTransaction("deposit"))?
            .reference_number
            .clone()
            .ok_or(PluginError::MissingReference("deposit"))?;

        let response = self
            .client
            .refund_transaction(&transaction_id, RequestOptions::new())
            .await?;
        ensure_success(&response, tx)?;

        match RefundStatus::from(response.get(fields::REFUND_STATUS).unwrap_or_default()) {
            RefundStatus::Instant => {}
            RefundStatus::Delayed => {
                return Err(pending(tx, response.get(fields::PENDING_REASON)));
            }
            RefundStatus::Other(status) => {
                warn!(%status, "unrecognized refund status, treating refund as completed");
            }
        }

        let reference = response.require(fields::REFUND_TRANSACTION_ID)?.to_string();
        let amount = response.amount(fields::GROSS_REFUND_AMOUNT)?;
        tx.settle(reference, amount);
        Ok(())
    }

    async fn void_authorization(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Step<()> {
        let authorization_id = payment
            .approve_transaction()
            .ok_or(PluginError::MissingTransaction("approve"))?
            .reference_number
            .clone()
            .ok_or(PluginError::MissingReference("approve"))?;

        let response = self.client.do_void(&authorization_id).await?;
        ensure_success(&response, tx)?;

        // Voids settle nothing, so the whole request counts as processed.
        let reference = response.require(fields::AUTHORIZATION_ID)?.to_string();
        let amount = tx.requested_amount;
        tx.settle(reference, amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_partial_refund_options() {
        let options = refund_options(
            &Amount::new(dec!(40)),
            Some(&Amount::new(dec!(100.00))),
            "USD",
        );

        assert_eq!(options.get("REFUNDTYPE").map(String::as_str), Some("Partial"));
        assert_eq!(options.get("AMT").map(String::as_str), Some("40.00"));
        assert_eq!(options.get("CURRENCYCODE").map(String::as_str), Some("USD"));
    }

    #[test]
    fn test_full_refund_has_no_options() {
        let options = refund_options(
            &Amount::new(dec!(100)),
            Some(&Amount::new(dec!(100.00))),
            "USD",
        );
        assert!(options.is_empty());
    }

    #[test]
    fn test_unknown_processed_amount_refunds_partially() {
        let options = refund_options(&Amount::new(dec!(100)), None, "USD");
        assert_eq!(options.get("REFUNDTYPE").map(String::as_str), Some("Partial"));
    }
}
