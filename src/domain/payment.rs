use super::amount::Amount;
use super::transaction::FinancialTransaction;
use serde::{Deserialize, Serialize};

/// The transactions that share one payment instruction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub currency: String,
    pub approved_amount: Amount,
    /// Prior transactions, oldest first.
    #[serde(default)]
    pub transactions: Vec<FinancialTransaction>,
}

impl Payment {
    pub fn new(currency: impl Into<String>, approved_amount: Amount) -> Self {
        Self {
            currency: currency.into(),
            approved_amount,
            transactions: Vec::new(),
        }
    }

    pub fn with_transaction(mut self, tx: FinancialTransaction) -> Self {
        self.transactions.push(tx);
        self
    }

    /// The latest transaction that reserved funds.
    pub fn approve_transaction(&self) -> Option<&FinancialTransaction> {
        self.transactions.iter().rev().find(|tx| tx.r#type.is_approval())
    }

    pub fn deposit_transactions(&self) -> impl Iterator<Item = &FinancialTransaction> {
        self.transactions.iter().filter(|tx| tx.r#type.is_deposit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionType;
    use rust_decimal_macros::dec;

    fn tx(r#type: TransactionType, reference: &str) -> FinancialTransaction {
        let mut tx = FinancialTransaction::new(r#type, Amount::new(dec!(10)));
        tx.reference_number = Some(reference.to_string());
        tx
    }

    #[test]
    fn test_approve_transaction_is_latest() {
        let payment = Payment::new("EUR", Amount::new(dec!(10)))
            .with_transaction(tx(TransactionType::Approve, "A-1"))
            .with_transaction(tx(TransactionType::Deposit, "D-1"))
            .with_transaction(tx(TransactionType::Approve, "A-2"));

        let approve = payment.approve_transaction().unwrap();
        assert_eq!(approve.reference_number.as_deref(), Some("A-2"));
    }

    #[test]
    fn test_deposit_transactions_in_order() {
        let payment = Payment::new("EUR", Amount::new(dec!(10)))
            .with_transaction(tx(TransactionType::Approve, "A-1"))
            .with_transaction(tx(TransactionType::Deposit, "D-1"))
            .with_transaction(tx(TransactionType::Deposit, "D-2"));

        let refs: Vec<_> = payment
            .deposit_transactions()
            .filter_map(|tx| tx.reference_number.as_deref())
            .collect();
        assert_eq!(refs, vec!["D-1", "D-2"]);
    }

    #[test]
    fn test_empty_payment() {
        let payment = Payment::new("EUR", Amount::ZERO);
        assert!(payment.approve_transaction().is_none());
        assert_eq!(payment.deposit_transactions().count(), 0);
    }
}
