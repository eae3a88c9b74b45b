use super::amount::Amount;
use super::extended_data::ExtendedData;
use serde::{Deserialize, Serialize};

pub const RESPONSE_CODE_SUCCESS: &str = "success";
pub const RESPONSE_CODE_PENDING: &str = "pending";
pub const RESPONSE_CODE_FAILED: &str = "Failed";
pub const REASON_CODE_SUCCESS: &str = "none";
pub const REASON_CODE_ACTION_REQUIRED: &str = "action_required";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Approve,
    ApproveAndDeposit,
    Deposit,
    Credit,
    ReverseApproval,
    ReverseDeposit,
}

impl TransactionType {
    /// Whether this transaction reserved funds on the buyer's account.
    pub fn is_approval(&self) -> bool {
        matches!(self, Self::Approve | Self::ApproveAndDeposit)
    }

    /// Whether this transaction settled funds.
    pub fn is_deposit(&self) -> bool {
        matches!(self, Self::Deposit | Self::ApproveAndDeposit)
    }
}

/// One financial operation against a payment.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct FinancialTransaction {
    pub r#type: TransactionType,
    pub requested_amount: Amount,
    #[serde(default)]
    pub processed_amount: Option<Amount>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub extended_data: ExtendedData,
}

impl FinancialTransaction {
    pub fn new(r#type: TransactionType, requested_amount: Amount) -> Self {
        Self {
            r#type,
            requested_amount,
            processed_amount: None,
            reference_number: None,
            response_code: None,
            reason_code: None,
            extended_data: ExtendedData::default(),
        }
    }

    pub fn with_extended_data(mut self, extended_data: ExtendedData) -> Self {
        self.extended_data = extended_data;
        self
    }

    pub fn set_codes(&mut self, response_code: impl Into<String>, reason_code: impl Into<String>) {
        self.response_code = Some(response_code.into());
        self.reason_code = Some(reason_code.into());
    }

    /// Marks the transaction as processed by the gateway.
    pub fn settle(&mut self, reference_number: impl Into<String>, processed_amount: Amount) {
        self.reference_number = Some(reference_number.into());
        self.processed_amount = Some(processed_amount);
        self.set_codes(RESPONSE_CODE_SUCCESS, REASON_CODE_SUCCESS);
    }
}
