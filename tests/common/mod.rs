use express_checkout::application::plugin::ExpressCheckoutPlugin;
use express_checkout::config::PluginConfig;
use express_checkout::domain::amount::Amount;
use express_checkout::domain::payment::Payment;
use express_checkout::domain::response::GatewayResponse;
use express_checkout::domain::transaction::{FinancialTransaction, TransactionType};
use express_checkout::infrastructure::scripted::ScriptedClient;
use rust_decimal::Decimal;

pub const RETURN_URL: &str = "https://shop.example/checkout/return";
pub const CANCEL_URL: &str = "https://shop.example/checkout/cancel";

/// An acknowledged response carrying `fields`.
pub fn ok(fields: &[(&str, &str)]) -> GatewayResponse {
    GatewayResponse::from_fields(
        std::iter::once(("ACK", "Success")).chain(fields.iter().copied()),
    )
}

/// A rejected response with the given error code.
#[allow(dead_code)]
pub fn rejected(error_code: &str) -> GatewayResponse {
    GatewayResponse::from_fields([
        ("ACK", "Failure"),
        ("L_ERRORCODE0", error_code),
        ("L_SHORTMESSAGE0", "Transaction refused"),
    ])
}

pub fn plugin(client: &ScriptedClient) -> ExpressCheckoutPlugin {
    ExpressCheckoutPlugin::new(
        Box::new(client.clone()),
        PluginConfig::new(RETURN_URL, CANCEL_URL),
    )
}

pub fn transaction(r#type: TransactionType, amount: Decimal) -> FinancialTransaction {
    FinancialTransaction::new(r#type, Amount::new(amount))
}

/// A payment whose approval `reference` reserved and processed `approved`.
pub fn approved_payment(reference: &str, approved: Decimal) -> Payment {
    let mut approve = transaction(TransactionType::Approve, approved);
    approve.settle(reference, Amount::new(approved));
    Payment::new("USD", Amount::new(approved)).with_transaction(approve)
}
