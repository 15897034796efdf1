//! Business Rules - Command Line Entry Point
//!
//! Reads one JSON request from a file or stdin, runs the matching evaluator
//! and prints the JSON outcome.

use anyhow::{Context, Result};
use business_rules::{
    config::{AppConfig, LoggingConfig},
    flight::{BookingRequest, FlightBookingSystem},
    fraud::FraudDetector,
    Transaction,
};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "business-rules", about = "Evaluate fraud and booking rules")]
struct Cli {
    /// Configuration file (TOML); built-in defaults are used when it does not exist
    #[arg(long, global = true, default_value = "config/config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a transaction for fraud risk
    Fraud {
        /// JSON request file, stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Price a flight booking or cancellation
    Flight {
        /// JSON request file, stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

/// Input of the `fraud` subcommand
#[derive(Debug, Deserialize)]
struct FraudRequest {
    transaction: Transaction,
    #[serde(default)]
    previous: Vec<Transaction>,
    #[serde(default)]
    blacklist: HashSet<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)?;
    init_logging(&config.logging)?;
    info!(path = %cli.config.display(), "Configuration loaded");

    let output = match &cli.command {
        Command::Fraud { input } => run_fraud(&config, input.as_deref())?,
        Command::Flight { input } => run_flight(&config, input.as_deref())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&logging.level))
        .context("Invalid log level")?;

    // Logs go to stderr so stdout stays machine readable
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn run_fraud(config: &AppConfig, input: Option<&Path>) -> Result<serde_json::Value> {
    evaluate_fraud(config, &read_input(input)?)
}

fn evaluate_fraud(config: &AppConfig, body: &str) -> Result<serde_json::Value> {
    let request: FraudRequest = serde_json::from_str(body).context("Invalid fraud request")?;

    for tx in std::iter::once(&request.transaction).chain(&request.previous) {
        if let Err(e) = tx.validate() {
            warn!(error = %e, "Rejected transaction");
            return Err(e.into());
        }
    }

    let detector = FraudDetector::new(config.fraud.clone());
    let assessment = detector.assess(&request.transaction, &request.previous, &request.blacklist);
    let alert = assessment.to_alert(&request.transaction, &config.risk_levels);

    match &alert {
        Some(alert) => info!(
            alert_id = %alert.alert_id,
            risk_score = alert.risk_score,
            risk_level = ?alert.risk_level,
            triggered = ?alert.triggered_rules,
            "Fraud alert raised"
        ),
        None => info!(
            risk_score = assessment.result.risk_score,
            "Transaction evaluated (not flagged)"
        ),
    }

    Ok(json!({
        "result": assessment.result,
        "risk_level": assessment.risk_level(&config.risk_levels),
        "triggered_rules": assessment.triggered,
        "alert": alert,
    }))
}

fn run_flight(config: &AppConfig, input: Option<&Path>) -> Result<serde_json::Value> {
    price_flight(config, &read_input(input)?)
}

fn price_flight(config: &AppConfig, body: &str) -> Result<serde_json::Value> {
    let request: BookingRequest =
        serde_json::from_str(body).context("Invalid booking request")?;

    let system = FlightBookingSystem::new(config.flight.clone());
    let result = system.book_flight(&request).map_err(|e| {
        warn!(error = %e, "Rejected booking request");
        e
    })?;

    info!(
        confirmation = result.confirmation,
        total_price = %result.total_price,
        refund_amount = %result.refund_amount,
        "Booking priced"
    );

    Ok(serde_json::to_value(result)?)
}
