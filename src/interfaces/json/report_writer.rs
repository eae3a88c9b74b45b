use crate::application::outcome::Outcome;
use crate::domain::transaction::FinancialTransaction;
use crate::error::Result;
use crate::infrastructure::scripted::GatewayRequest;
use serde::Serialize;
use std::io::Write;

/// What one operation did: its outcome, the updated transaction and the
/// gateway calls it made.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub outcome: &'a Outcome,
    pub transaction: &'a FinancialTransaction,
    pub requests: &'a [GatewayRequest],
}

pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_report(&mut self, report: &Report<'_>) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::Amount;
    use crate::domain::transaction::TransactionType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writes_tagged_outcome() {
        let mut tx = FinancialTransaction::new(TransactionType::Deposit, Amount::new(dec!(3.50)));
        tx.settle("TX-9", Amount::new(dec!(3.50)));
        let outcome = Outcome::Success;

        let mut buffer = Vec::new();
        ReportWriter::new(&mut buffer)
            .write_report(&Report {
                outcome: &outcome,
                transaction: &tx,
                requests: &[],
            })
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["outcome"]["outcome"], "success");
        assert_eq!(value["transaction"]["reference_number"], "TX-9");
        assert_eq!(value["transaction"]["processed_amount"], "3.50");
    }
}
