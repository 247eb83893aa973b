use cfl_ledger::{
    ChainValidator, ChainView, CumulativeSeries, Ledger, ProjectionBuilder, ReplayEngine,
    ReplayResult, ValidationReport,
};
use cfl_server::{CalculatorForm, CflServer, FootprintEstimate, ServerConfig};
use colored::Colorize;
use serde::Serialize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Simulate(args) => cmd_simulate(args, cli.format),
        Command::Calc(args) => cmd_calc(args, cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(&args)?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        threshold = config.threshold,
        "starting carbon ledger server"
    );
    let server = CflServer::new(config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn server_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    Ok(config)
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    chain: ChainView,
    series: CumulativeSeries,
    validation: ValidationReport,
    replay: ReplayResult,
}

fn simulate(values: &[i64], threshold: i64) -> anyhow::Result<SimulationReport> {
    let mut ledger = Ledger::new()?;
    for &value in values {
        ledger.append_measurement(value)?;
    }
    Ok(SimulationReport {
        chain: ProjectionBuilder::chain_view(&ledger)?,
        series: CumulativeSeries::from_measurements(ledger.measurements(), threshold),
        validation: ChainValidator::validate(&ledger)?,
        replay: ReplayEngine::replay(&ledger)?,
    })
}

fn cmd_simulate(args: SimulateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = simulate(&args.values, args.threshold)?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({} records)", "Chain".bold(), report.chain.length);
    for entry in &report.chain.entries {
        println!(
            "  {} {}  {}  prev {}",
            format!("#{}", entry.index).yellow(),
            entry.digest.short_hex().dimmed(),
            entry.data,
            entry.previous_digest.short_hex().dimmed()
        );
    }

    let values: Vec<String> = report.series.values.iter().map(i64::to_string).collect();
    println!("{} [{}]", "Cumulative".bold(), values.join(", "));
    match &report.series.alert {
        Some(alert) => println!("{} {}", "!".red().bold(), alert.red()),
        None => println!(
            "{} Below critical point ({})",
            "✓".green(),
            report.series.threshold
        ),
    }

    if report.validation.is_valid() && report.replay.converged() {
        println!("{} Chain integrity verified", "✓".green().bold());
    } else {
        for violation in &report.validation.violations {
            println!(
                "{} #{} {}",
                "✗".red().bold(),
                violation.index,
                violation.description
            );
        }
    }
    Ok(())
}

fn cmd_calc(args: CalcArgs, format: OutputFormat) -> anyhow::Result<()> {
    let form = CalculatorForm {
        electric_bill: args.electric_bill,
        gas_bill: args.gas_bill,
        oil_bill: args.oil_bill,
        car_mileage: args.car_mileage,
        short_flights: args.short_flights,
        long_flights: args.long_flights,
    };
    let estimate = FootprintEstimate::from(form.parse()?);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
        OutputFormat::Text => println!(
            "Carbon footprint: {} lbs CO2/year",
            format!("{:.2}", estimate.total).green().bold()
        ),
    }
    Ok(())
}
