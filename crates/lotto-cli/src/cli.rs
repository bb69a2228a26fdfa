use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lotto",
    about = "Lotto Oracle: ensemble picks from mock models",
    version,
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
    /// Run the mock models and combine their picks
    Predict(PredictArgs),
    /// Draw a perturbation reading
    Perturb(SeedArgs),
    /// Show a simulated latest draw
    Draw(SeedArgs),
    /// Render the Markdown analysis report
    Report(ReportArgs),
    /// Show frequency statistics over a simulated draw history
    Analyze(SeedArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct SeedArgs {
    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct PredictArgs {
    #[arg(long)]
    pub seed: Option<u64>,
    /// Bias intensity in [0, 1]
    #[arg(long, requires_all = ["chaos", "harmony"], conflicts_with = "perturb")]
    pub intensity: Option<f64>,
    #[arg(long, requires = "intensity")]
    pub chaos: Option<f64>,
    #[arg(long, requires = "intensity")]
    pub harmony: Option<f64>,
    /// Bias the ensemble with a generated perturbation
    #[arg(long)]
    pub perturb: bool,
}

#[derive(Args)]
pub struct ReportArgs {
    #[arg(long, default_value = "24001")]
    pub period: String,
    #[arg(long, default_value = "23365")]
    pub last_period: String,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides the configured bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}
