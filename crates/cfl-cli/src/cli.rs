use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cfl",
    about = "Carbon footprint ledger: hash-linked footprint records with threshold alerts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Build an in-memory ledger from values and report on it
    Simulate(SimulateArgs),
    /// Estimate a household footprint
    Calc(CalcArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub threshold: Option<i64>,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Footprint values, appended in order
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<i64>,
    #[arg(long, default_value_t = cfl_ledger::DEFAULT_THRESHOLD)]
    pub threshold: i64,
}

#[derive(Args)]
pub struct CalcArgs {
    #[arg(long, default_value = "0")]
    pub electric_bill: String,
    #[arg(long, default_value = "0")]
    pub gas_bill: String,
    #[arg(long, default_value = "0")]
    pub oil_bill: String,
    #[arg(long, default_value = "0")]
    pub car_mileage: String,
    #[arg(long, default_value = "0")]
    pub short_flights: String,
    #[arg(long, default_value = "0")]
    pub long_flights: String,
}
