use super::amount::Amount;
use super::extended_data::RequestOptions;
use super::response::GatewayResponse;
use super::status::{CompleteType, PaymentAction};
use crate::error::Result;
use async_trait::async_trait;

/// NVP field names the plugin sets on requests.
pub mod params {
    pub const PAYMENT_ACTION: &str = "PAYMENTREQUEST_0_PAYMENTACTION";
    pub const PAYMENT_CURRENCY_CODE: &str = "PAYMENTREQUEST_0_CURRENCYCODE";
    pub const CURRENCY_CODE: &str = "CURRENCYCODE";
    pub const REFUND_TYPE: &str = "REFUNDTYPE";
    pub const AMOUNT: &str = "AMT";

    pub const REFUND_TYPE_PARTIAL: &str = "Partial";
}

/// Transport to the Express Checkout NVP API.
///
/// Implementations serialize the request, perform the call and hand back the
/// parsed envelope. A gateway-side failure is a successful call returning a
/// response with `success == false`; `Err` is reserved for transport faults.
#[async_trait]
pub trait ExpressCheckoutClient: Send + Sync {
    async fn set_express_checkout(
        &self,
        amount: Amount,
        return_url: &str,
        cancel_url: &str,
        options: RequestOptions,
    ) -> Result<GatewayResponse>;

    async fn get_express_checkout_details(&self, token: &str) -> Result<GatewayResponse>;

    async fn do_express_checkout_payment(
        &self,
        token: &str,
        amount: Amount,
        action: PaymentAction,
        payer_id: &str,
        options: RequestOptions,
    ) -> Result<GatewayResponse>;

    async fn do_capture(
        &self,
        authorization_id: &str,
        amount: Amount,
        complete_type: CompleteType,
        options: RequestOptions,
    ) -> Result<GatewayResponse>;

    async fn do_reauthorization(
        &self,
        authorization_id: &str,
        amount: Amount,
        complete_type: CompleteType,
        options: RequestOptions,
    ) -> Result<GatewayResponse>;

    async fn get_transaction_details(&self, transaction_id: &str) -> Result<GatewayResponse>;

    async fn refund_transaction(
        &self,
        transaction_id: &str,
        options: RequestOptions,
    ) -> Result<GatewayResponse>;

    async fn do_void(&self, authorization_id: &str) -> Result<GatewayResponse>;

    /// Page where the buyer authorizes the checkout token.
    fn authenticate_token_url(&self, token: &str) -> String;
}

pub type ExpressCheckoutClientBox = Box<dyn ExpressCheckoutClient>;
