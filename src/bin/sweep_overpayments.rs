//! Compare repayment outcomes across flat monthly overpayment levels
//!
//! Projects the same scenario once per level, in parallel, and writes a
//! one-row-per-level comparison CSV

use anyhow::Context;
use clap::Parser;
use log::info;
use rayon::prelude::*;
use repayment_system::{
    monthly_discount_factors, ProjectionEngine, ProjectionError, RunSpec,
};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Sweep flat monthly overpayments against one scenario")]
struct Args {
    /// Run spec JSON (scenario plus optional config and terms)
    #[arg(long)]
    spec: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "sweep.csv")]
    output: PathBuf,

    /// Largest flat monthly overpayment to test
    #[arg(long, default_value_t = 500.0)]
    max_extra: f64,

    /// Step between overpayment levels
    #[arg(long, default_value_t = 25.0)]
    step: f64,
}

struct SweepRow {
    extra: f64,
    total_repaid: f64,
    total_interest: f64,
    months_to_clear: Option<u32>,
    present_value: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    anyhow::ensure!(args.step > 0.0, "step must be positive");

    let start = Instant::now();
    let raw = std::fs::read_to_string(&args.spec)
        .with_context(|| format!("reading {}", args.spec.display()))?;
    let run = RunSpec::from_json(&raw)
        .with_context(|| format!("parsing {}", args.spec.display()))?;

    let factors = monthly_discount_factors(
        run.scenario.annual_rpis.clone(),
        &run.config.current_month,
        &run.terms,
    )?;

    let count = (args.max_extra / args.step).floor() as usize;
    let levels: Vec<f64> = (0..=count).map(|i| i as f64 * args.step).collect();
    info!("sweeping {} overpayment levels in parallel", levels.len());

    let proj_start = Instant::now();
    let rows = levels
        .par_iter()
        .map(|&extra| -> Result<SweepRow, ProjectionError> {
            let mut config = run.config.clone();
            if extra > 0.0 {
                for month in 0..config.months_to_relief {
                    *config.discretionary_repayments.entry(month).or_insert(0.0) += extra;
                }
            }
            let engine = ProjectionEngine::new(run.terms.clone(), config);
            let result = engine.project(&run.scenario)?;
            let present_value = result.present_value(&factors)?;
            Ok(SweepRow {
                extra,
                total_repaid: result.total_repaid(),
                total_interest: result.total_interest(),
                months_to_clear: result.months_to_clear(),
                present_value,
            })
        })
        .collect::<Result<Vec<SweepRow>, ProjectionError>>()?;
    info!("projections complete in {:?}", proj_start.elapsed());

    let mut file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writeln!(
        file,
        "ExtraPerMonth,TotalRepaid,TotalInterest,MonthsToClear,PresentValue"
    )?;
    for row in &rows {
        writeln!(
            file,
            "{:.2},{:.2},{:.2},{},{:.2}",
            row.extra,
            row.total_repaid,
            row.total_interest,
            row.months_to_clear
                .map_or(String::new(), |months| months.to_string()),
            row.present_value,
        )?;
    }

    println!("\nSweep Summary:");
    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        println!(
            "  No overpayment:    repaid {:.2}, PV {:.2}",
            first.total_repaid, first.present_value
        );
        println!(
            "  Extra {:.2}/month: repaid {:.2}, PV {:.2}",
            last.extra, last.total_repaid, last.present_value
        );
    }
    println!("  {} rows written to {}", rows.len(), args.output.display());
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
