//! Project one repayment schedule from a JSON run spec
//!
//! Writes the per-month cashflows to CSV and prints a summary

use anyhow::Context;
use clap::Parser;
use log::info;
use repayment_system::{monthly_discount_factors, ProjectionEngine, RunSpec};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Project a single repayment schedule")]
struct Args {
    /// Run spec JSON (scenario plus optional config and terms)
    #[arg(long)]
    spec: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "schedule.csv")]
    output: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let start = Instant::now();
    let raw = fs::read_to_string(&args.spec)
        .with_context(|| format!("reading {}", args.spec.display()))?;
    let run = RunSpec::from_json(&raw)
        .with_context(|| format!("parsing {}", args.spec.display()))?;
    info!(
        "loaded run spec: balance {:.2}, {} salary years, {} RPI years",
        run.scenario.loan_outstanding,
        run.scenario.annual_salaries.len(),
        run.scenario.annual_rpis.len()
    );

    let engine = ProjectionEngine::new(run.terms.clone(), run.config.clone());
    let result = engine.project(&run.scenario)?;

    let factors = monthly_discount_factors(
        run.scenario.annual_rpis.clone(),
        &run.config.current_month,
        &run.terms,
    )?;
    let present_value = result.present_value(&factors)?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for row in result.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("wrote {} rows to {}", result.months(), args.output.display());

    println!("\nSchedule Summary:");
    println!("  Starting balance:  {:.2}", run.scenario.loan_outstanding);
    println!("  Months projected:  {}", result.months());
    println!("  Total repaid:      {:.2}", result.total_repaid());
    println!("  Total interest:    {:.2}", result.total_interest());
    println!("  Present value:     {:.2}", present_value);
    match result.months_to_clear() {
        Some(months) => println!("  Cleared after:     {} months", months),
        None => println!(
            "  Written off with:  {:.2} still outstanding",
            result.final_balance()
        ),
    }
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
