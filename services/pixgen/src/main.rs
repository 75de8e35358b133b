//! Pixgen entry point

use anyhow::{Context, Result};
use clap::Parser;
use pix_config::{load_config, PixConfig};
use pix_types::PayeeKeyKind;
use pixgen::{GenerateOptions, PaymentRequest};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate Pix copy-and-paste payment codes", long_about = None)]
struct Args {
    /// Configuration file path (defaults to config/pix.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment override loaded from environments/<name>.toml
    #[arg(short, long)]
    environment: Option<String>,

    /// Payee key type: cpf, cnpj, email, phone or random
    #[arg(long)]
    kind: Option<PayeeKeyKind>,

    /// Payee key value
    #[arg(long)]
    key: Option<String>,

    /// Merchant name (max 25 characters after sanitizing)
    #[arg(long)]
    name: Option<String>,

    /// Merchant city (max 15 characters after sanitizing)
    #[arg(long)]
    city: Option<String>,

    /// Fixed amount in BRL, e.g. 12.50
    #[arg(short, long)]
    amount: Option<String>,

    /// Description shown to the payer
    #[arg(short, long)]
    description: Option<String>,

    /// Reference label / transaction id
    #[arg(short, long)]
    reference: Option<String>,

    /// Mark the code as single-use
    #[arg(long)]
    dynamic: bool,

    /// JSON file with stored payment methods
    #[arg(long)]
    payment_methods: Option<PathBuf>,

    /// Charge with the stored payment method of this company
    #[arg(long)]
    company: Option<String>,

    /// Print payload, checksum and fields as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // Config first: its log level seeds the default filter
    let config = load_config(args.config.as_deref(), args.environment.as_deref());
    let log_level = config
        .as_ref()
        .map(|c| c.global.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize tracing; stdout is reserved for the payload
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!(
                    "pixgen={0},pix_codec={0},pix_types={0},pix_config={0},warn",
                    log_level
                ).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = config
        .context("Failed to load configuration")
        .and_then(|config| run(args, &config));

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args, config: &PixConfig) -> Result<()> {
    let options = GenerateOptions {
        kind: args.kind,
        key: args.key,
        name: args.name,
        city: args.city,
        amount: args.amount,
        description: args.description,
        reference: args.reference,
        dynamic: args.dynamic,
        payment_methods: args.payment_methods,
        company: args.company,
    };

    let payload = PaymentRequest::resolve(config, &options)?.encode()?;
    info!("Generated payload ({} characters)", payload.as_str().len());

    if args.json {
        let json = serde_json::to_string_pretty(&payload).context("Failed to serialize payload")?;
        println!("{}", json);
    } else {
        println!("{}", payload);
    }

    Ok(())
}
