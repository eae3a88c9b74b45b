use clap::Parser;
use express_checkout::application::plugin::ExpressCheckoutPlugin;
use express_checkout::config::PluginConfig;
use express_checkout::interfaces::json::report_writer::{Report, ReportWriter};
use express_checkout::interfaces::json::scenario_reader::ScenarioReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario JSON file: transaction, payment and scripted gateway responses
    scenario: PathBuf,

    /// Default return URL, used when the transaction has no override
    #[arg(long, env = "EXPRESS_CHECKOUT_RETURN_URL")]
    return_url: Option<String>,

    /// Default cancel URL, used when the transaction has no override
    #[arg(long, env = "EXPRESS_CHECKOUT_CANCEL_URL")]
    cancel_url: Option<String>,

    /// Build buyer redirect URLs against the sandbox
    #[arg(long)]
    sandbox: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.scenario).into_diagnostic()?;
    let scenario = ScenarioReader::new(file).read().into_diagnostic()?;
    let (client, mut transaction, payment, file_config) = scenario.into_parts();
    let client = if cli.sandbox { client.sandbox() } else { client };

    // CLI flags override the scenario's config block
    let config = file_config.merge(PluginConfig {
        return_url: cli.return_url,
        cancel_url: cli.cancel_url,
    });

    let plugin = ExpressCheckoutPlugin::new(Box::new(client.clone()), config);
    let outcome = plugin
        .execute(&mut transaction, &payment)
        .await
        .into_diagnostic()?;

    let requests = client.requests().await;
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer
        .write_report(&Report {
            outcome: &outcome,
            transaction: &transaction,
            requests: &requests,
        })
        .into_diagnostic()?;

    Ok(())
}
