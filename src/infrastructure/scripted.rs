use crate::domain::amount::Amount;
use crate::domain::extended_data::RequestOptions;
use crate::domain::ports::ExpressCheckoutClient;
use crate::domain::response::GatewayResponse;
use crate::domain::status::{CompleteType, PaymentAction};
use crate::error::{PluginError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use urlencoding::encode;

const LIVE_HOST: &str = "www.paypal.com";
const SANDBOX_HOST: &str = "www.sandbox.paypal.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    SetExpressCheckout,
    GetExpressCheckoutDetails,
    DoExpressCheckoutPayment,
    DoCapture,
    DoReauthorization,
    GetTransactionDetails,
    RefundTransaction,
    DoVoid,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SetExpressCheckout => "SetExpressCheckout",
            Self::GetExpressCheckoutDetails => "GetExpressCheckoutDetails",
            Self::DoExpressCheckoutPayment => "DoExpressCheckoutPayment",
            Self::DoCapture => "DoCapture",
            Self::DoReauthorization => "DoReauthorization",
            Self::GetTransactionDetails => "GetTransactionDetails",
            Self::RefundTransaction => "RefundTransaction",
            Self::DoVoid => "DoVoid",
        };
        f.write_str(name)
    }
}

/// A call the plugin made, with its arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum GatewayRequest {
    SetExpressCheckout {
        amount: Amount,
        return_url: String,
        cancel_url: String,
        options: RequestOptions,
    },
    GetExpressCheckoutDetails {
        token: String,
    },
    DoExpressCheckoutPayment {
        token: String,
        amount: Amount,
        action: PaymentAction,
        payer_id: String,
        options: RequestOptions,
    },
    DoCapture {
        authorization_id: String,
        amount: Amount,
        complete_type: CompleteType,
        options: RequestOptions,
    },
    DoReauthorization {
        authorization_id: String,
        amount: Amount,
        complete_type: CompleteType,
        options: RequestOptions,
    },
    GetTransactionDetails {
        transaction_id: String,
    },
    RefundTransaction {
        transaction_id: String,
        options: RequestOptions,
    },
    DoVoid {
        authorization_id: String,
    },
}

impl GatewayRequest {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::SetExpressCheckout { .. } => CallKind::SetExpressCheckout,
            Self::GetExpressCheckoutDetails { .. } => CallKind::GetExpressCheckoutDetails,
            Self::DoExpressCheckoutPayment { .. } => CallKind::DoExpressCheckoutPayment,
            Self::DoCapture { .. } => CallKind::DoCapture,
            Self::DoReauthorization { .. } => CallKind::DoReauthorization,
            Self::GetTransactionDetails { .. } => CallKind::GetTransactionDetails,
            Self::RefundTransaction { .. } => CallKind::RefundTransaction,
            Self::DoVoid { .. } => CallKind::DoVoid,
        }
    }
}

/// An in-memory gateway that replays queued responses.
///
/// Responses are queued per call kind and handed out in order. Every request
/// is recorded so callers can inspect what the plugin sent. Clones share the
/// same script and log through `Arc<RwLock<..>>`.
#[derive(Default, Clone)]
pub struct ScriptedClient {
    responses: Arc<RwLock<HashMap<CallKind, VecDeque<GatewayResponse>>>>,
    requests: Arc<RwLock<Vec<GatewayRequest>>>,
    sandbox: bool,
}

impl ScriptedClient {
    /// Creates a client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client that will answer with `script`, in order per call kind.
    pub fn from_script(script: impl IntoIterator<Item = (CallKind, GatewayResponse)>) -> Self {
        let mut responses: HashMap<CallKind, VecDeque<GatewayResponse>> = HashMap::new();
        for (kind, response) in script {
            responses.entry(kind).or_default().push_back(response);
        }
        Self {
            responses: Arc::new(RwLock::new(responses)),
            ..Self::default()
        }
    }

    /// Builds redirect URLs against the sandbox host.
    pub fn sandbox(mut self) -> Self {
        self.sandbox = true;
        self
    }

    pub async fn push(&self, kind: CallKind, response: GatewayResponse) {
        let mut responses = self.responses.write().await;
        responses.entry(kind).or_default().push_back(response);
    }

    pub async fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.read().await.clone()
    }

    pub async fn count(&self, kind: CallKind) -> usize {
        let requests = self.requests.read().await;
        requests.iter().filter(|r| r.kind() == kind).count()
    }

    async fn respond(&self, request: GatewayRequest) -> Result<GatewayResponse> {
        let kind = request.kind();
        self.requests.write().await.push(request);

        let mut responses = self.responses.write().await;
        responses
            .get_mut(&kind)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| PluginError::TransportError(format!("no scripted response for {}", kind)))
    }
}

#[async_trait]
impl ExpressCheckoutClient for ScriptedClient {
    async fn set_express_checkout(
        &self,
        amount: Amount,
        return_url: &str,
        cancel_url: &str,
        options: RequestOptions,
    ) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::SetExpressCheckout {
            amount,
            return_url: return_url.to_string(),
            cancel_url: cancel_url.to_string(),
            options,
        })
        .await
    }

    async fn get_express_checkout_details(&self, token: &str) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::GetExpressCheckoutDetails {
            token: token.to_string(),
        })
        .await
    }

    async fn do_express_checkout_payment(
        &self,
        token: &str,
        amount: Amount,
        action: PaymentAction,
        payer_id: &str,
        options: RequestOptions,
    ) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::DoExpressCheckoutPayment {
            token: token.to_string(),
            amount,
            action,
            payer_id: payer_id.to_string(),
            options,
        })
        .await
    }

    async fn do_capture(
        &self,
        authorization_id: &str,
        amount: Amount,
        complete_type: CompleteType,
        options: RequestOptions,
    ) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::DoCapture {
            authorization_id: authorization_id.to_string(),
            amount,
            complete_type,
            options,
        })
        .await
    }

    async fn do_reauthorization(
        &self,
        authorization_id: &str,
        amount: Amount,
        complete_type: CompleteType,
        options: RequestOptions,
    ) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::DoReauthorization {
            authorization_id: authorization_id.to_string(),
            amount,
            complete_type,
            options,
        })
        .await
    }

    async fn get_transaction_details(&self, transaction_id: &str) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::GetTransactionDetails {
            transaction_id: transaction_id.to_string(),
        })
        .await
    }

    async fn refund_transaction(
        &self,
        transaction_id: &str,
        options: RequestOptions,
    ) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::RefundTransaction {
            transaction_id: transaction_id.to_string(),
            options,
        })
        .await
    }

    async fn do_void(&self, authorization_id: &str) -> Result<GatewayResponse> {
        self.respond(GatewayRequest::DoVoid {
            authorization_id: authorization_id.to_string(),
        })
        .await
    }

    fn authenticate_token_url(&self, token: &str) -> String {
        let host = if self.sandbox { SANDBOX_HOST } else { LIVE_HOST };
        format!(
            "https://{}/cgi-bin/webscr?cmd=_express-checkout&token={}",
            host,
            encode(token)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_replays_responses_in_order() {
        let client = ScriptedClient::from_script([
            (
                CallKind::DoCapture,
                GatewayResponse::from_fields([("ACK", "Success"), ("TRANSACTIONID", "1")]),
            ),
            (
                CallKind::DoCapture,
                GatewayResponse::from_fields([("ACK", "Success"), ("TRANSACTIONID", "2")]),
            ),
        ]);
        let amount = Amount::new(dec!(1));

        let first = client
            .do_capture("A", amount, CompleteType::Complete, RequestOptions::new())
            .await
            .unwrap();
        let second = client
            .do_capture("A", amount, CompleteType::Complete, RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(first.get("TRANSACTIONID"), Some("1"));
        assert_eq!(second.get("TRANSACTIONID"), Some("2"));
        assert_eq!(client.count(CallKind::DoCapture).await, 2);
    }

    #[tokio::test]
    async fn test_exhausted_script_is_a_transport_error() {
        let client = ScriptedClient::new();
        let result = client.do_void("A").await;

        assert!(matches!(result, Err(PluginError::TransportError(_))));
        assert_eq!(client.count(CallKind::DoVoid).await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_script() {
        let client = ScriptedClient::new();
        let clone = client.clone();
        clone
            .push(CallKind::DoVoid, GatewayResponse::from_fields([("ACK", "Success")]))
            .await;

        assert!(client.do_void("A").await.unwrap().is_success());
        assert_eq!(clone.requests().await.len(), 1);
    }

    #[test]
    fn test_authenticate_token_url() {
        let live = ScriptedClient::new();
        let sandbox = ScriptedClient::new().sandbox();

        assert_eq!(
            live.authenticate_token_url("EC-123"),
            "https://www.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-123"
        );
        assert_eq!(
            sandbox.authenticate_token_url("EC 1/2"),
            "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC%201%2F2"
        );
    }
}
