use crate::config::PluginConfig;
use crate::domain::payment::Payment;
use crate::domain::response::GatewayResponse;
use crate::domain::transaction::FinancialTransaction;
use crate::error::Result;
use crate::infrastructure::scripted::{CallKind, ScriptedClient};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;

/// One queued gateway answer.
#[derive(Debug, Deserialize)]
pub struct ScriptedResponse {
    pub call: CallKind,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// A transaction to run and the gateway answers to run it against.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub transaction: FinancialTransaction,
    pub payment: Payment,
    #[serde(default)]
    pub responses: Vec<ScriptedResponse>,
    #[serde(default)]
    pub config: PluginConfig,
}

impl Scenario {
    /// Splits the scenario into the client replaying its responses and the
    /// records the plugin operates on.
    pub fn into_parts(self) -> (ScriptedClient, FinancialTransaction, Payment, PluginConfig) {
        let client = ScriptedClient::from_script(
            self.responses
                .into_iter()
                .map(|r| (r.call, GatewayResponse::from_fields(r.fields))),
        );
        (client, self.transaction, self.payment, self.config)
    }
}

/// Reads a scenario from any `Read` source (e.g., File, Stdin).
pub struct ScenarioReader<R: Read> {
    source: R,
}

impl<R: Read> ScenarioReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<Scenario> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
