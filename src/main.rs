use checkout_relay::application::relay::CheckoutRelay;
use checkout_relay::config::RelayConfig;
use checkout_relay::domain::classification::classify;
use checkout_relay::domain::ports::SessionStoreBox;
use checkout_relay::infrastructure::daftra::DaftraClient;
use checkout_relay::infrastructure::file_store::FileSessionStore;
use checkout_relay::infrastructure::in_memory::InMemorySessionStore;
use checkout_relay::infrastructure::mpgs::MpgsGateway;
use checkout_relay::interfaces::json::reader::JsonReader;
use checkout_relay::interfaces::json::writer::JsonWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify gateway order snapshots read from a JSON file (or stdin)
    Classify {
        /// Order JSON file; reads stdin when omitted
        input: Option<PathBuf>,
    },
    /// Open a hosted checkout session for a draft invoice
    Initiate {
        /// Checkout request JSON file
        input: PathBuf,

        #[command(flatten)]
        config: RelayConfig,
    },
    /// Verify an order with the gateway and settle its invoice when paid
    Verify {
        /// Gateway order id (the invoicing draft id)
        order_id: String,

        #[command(flatten)]
        config: RelayConfig,
    },
}

fn build_relay(config: &RelayConfig) -> Result<CheckoutRelay> {
    let gateway = MpgsGateway::new(config.mpgs()).into_diagnostic()?;
    let invoicing = DaftraClient::new(config.daftra()).into_diagnostic()?;

    // A one-shot process needs the file store for `verify` to see what `initiate` cached.
    let sessions: SessionStoreBox = match &config.session_file {
        Some(path) => Box::new(FileSessionStore::open(path)),
        None => Box::new(InMemorySessionStore::new()),
    };

    Ok(CheckoutRelay::new(
        Box::new(gateway),
        Box::new(invoicing),
        sessions,
        config.settings(),
    ))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut writer = JsonWriter::new(stdout.lock());

    match cli.command {
        Command::Classify { input } => {
            let orders = match input {
                Some(path) => {
                    let file = File::open(path).into_diagnostic()?;
                    JsonReader::new(file).orders()
                }
                None => JsonReader::new(io::stdin().lock()).orders(),
            }
            .into_diagnostic()?;

            for order in &orders {
                writer.write(&classify(order)).into_diagnostic()?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Initiate { input, config } => {
            let file = File::open(input).into_diagnostic()?;
            let request = JsonReader::new(file).checkout_request().into_diagnostic()?;

            let relay = build_relay(&config)?;
            let session = relay.initiate_checkout(request).await.into_diagnostic()?;
            writer.write(&session).into_diagnostic()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { order_id, config } => {
            let relay = build_relay(&config)?;
            let outcome = relay.verify_order(&order_id).await;
            writer.write(&outcome).into_diagnostic()?;

            if outcome.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
