use super::outcome::Outcome;
use crate::config::PluginConfig;
use crate::domain::payment::Payment;
use crate::domain::ports::ExpressCheckoutClientBox;
use crate::domain::transaction::{FinancialTransaction, TransactionType};
use crate::error::Result;

/// Payment system name the host framework routes to this plugin.
pub const PAYMENT_SYSTEM_NAME: &str = "paypal_express_checkout";

/// Maps the framework's financial operations onto Express Checkout calls.
///
/// The plugin holds no per-transaction state: every operation reads and
/// mutates only the transaction and payment it is handed, so one instance can
/// serve concurrent transactions.
pub struct ExpressCheckoutPlugin {
    pub(crate) client: ExpressCheckoutClientBox,
    pub(crate) config: PluginConfig,
}

impl ExpressCheckoutPlugin {
    /// Creates a new plugin.
    ///
    /// # Arguments
    ///
    /// * `client` - Transport to the gateway.
    /// * `config` - Default return and cancel URLs.
    pub fn new(client: ExpressCheckoutClientBox, config: PluginConfig) -> Self {
        Self { client, config }
    }

    pub fn processes(&self, payment_system_name: &str) -> bool {
        payment_system_name == PAYMENT_SYSTEM_NAME
    }

    pub fn is_independent_credit_supported(&self) -> bool {
        false
    }

    /// Runs the operation matching the transaction's type.
    pub async fn execute(
        &self,
        tx: &mut FinancialTransaction,
        payment: &Payment,
    ) -> Result<Outcome> {
        match tx.r#type {
            TransactionType::Approve => self.approve(tx, payment).await,
            TransactionType::ApproveAndDeposit => self.approve_and_deposit(tx, payment).await,
            TransactionType::Deposit => self.deposit(tx, payment).await,
            TransactionType::Credit => self.credit(tx, payment).await,
            TransactionType::ReverseApproval => self.reverse_approval(tx, payment).await,
            TransactionType::ReverseDeposit => self.reverse_deposit(tx, payment).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scripted::ScriptedClient;

    fn plugin() -> ExpressCheckoutPlugin {
        ExpressCheckoutPlugin::new(Box::new(ScriptedClient::new()), PluginConfig::default())
    }

    #[test]
    fn test_processes_only_express_checkout() {
        let plugin = plugin();
        assert!(plugin.processes("paypal_express_checkout"));
        assert!(!plugin.processes("paypal_direct_payment"));
        assert!(!plugin.processes(""));
    }

    #[test]
    fn test_independent_credit_not_supported() {
        assert!(!plugin().is_independent_credit_supported());
    }

    #[tokio::test]
    async fn test_plugin_is_shareable_across_tasks() {
        let plugin = std::sync::Arc::new(plugin());
        let handle = tokio::spawn({
            let plugin = plugin.clone();
            async move { plugin.processes(PAYMENT_SYSTEM_NAME) }
        });
        assert!(handle.await.unwrap());
    }
}
