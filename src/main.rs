use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use transfer_tools::transfer::tools::run;
use transfer_tools::{Result, ToolError};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run_cli(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Analyze(args) => execute_analyze(args),
        Command::Combine(args) => execute_combine(args),
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    check_inputs(&[&args.as_plan, &args.bs_plan, &args.equivalencies])?;

    let output = run::analyze(
        &args.as_plan,
        &args.bs_plan,
        &args.equivalencies,
        args.sheet.as_deref(),
        &args.out_dir,
    )?;

    let summary = &output.report.summary;
    println!("\n=== Transfer Summary ===");
    println!("Total AS credits:   {}", summary.total_credits);
    println!("Matched credits:    {}", summary.matched_credits);
    println!("Lost credits:       {}", summary.lost_credits);
    println!("Loss score:         {} (0 = perfect)", summary.loss_score);
    if output.report.unmatched.is_empty() {
        println!("Every AS course has a match in the BS plan.");
    } else {
        println!("Unmatched AS courses: {}", output.report.unmatched.len());
        for course in &output.report.unmatched {
            println!("  {} ({} credits)", course.code, course.credits);
        }
    }
    for file in &output.files {
        println!("✓ Wrote {}", file.display());
    }
    Ok(())
}

fn execute_combine(args: CombineArgs) -> Result<()> {
    check_inputs(&[&args.as_plan, &args.bs_plan, &args.equivalencies])?;

    let output = run::combine(
        &args.as_plan,
        &args.bs_plan,
        &args.equivalencies,
        args.sheet.as_deref(),
        args.output.as_deref(),
    )?;

    println!("Combined plan rows: {}", output.plan.rows.len());
    println!("✓ Wrote {}", output.path.display());
    Ok(())
}

fn check_inputs(paths: &[&PathBuf]) -> Result<()> {
    for path in paths {
        if !path.exists() {
            return Err(ToolError::MissingInput((*path).clone()));
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Analyze AS to BS credit transfer and combine plans of study."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare one AS plan against one BS plan and report lost credits.
    Analyze(AnalyzeArgs),
    /// Merge one AS plan and one BS plan into a combined workbook.
    Combine(CombineArgs),
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// AS plan of study (.xlsx).
    #[arg(long)]
    as_plan: PathBuf,

    /// BS plan of study (.xlsx).
    #[arg(long)]
    bs_plan: PathBuf,

    /// Course equivalency workbook (.xlsx).
    #[arg(long)]
    equivalencies: PathBuf,

    /// Equivalency sheet name. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// Directory the CSV reports are written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(clap::Args)]
struct CombineArgs {
    /// AS plan of study (.xlsx).
    #[arg(long)]
    as_plan: PathBuf,

    /// BS plan of study (.xlsx).
    #[arg(long)]
    bs_plan: PathBuf,

    /// Course equivalency workbook (.xlsx).
    #[arg(long)]
    equivalencies: PathBuf,

    /// Equivalency sheet name. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// Output workbook path. Defaults to a name derived from the plan files.
    #[arg(long)]
    output: Option<PathBuf>,
}
