use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adprofit")]
#[command(about = "Marketing profitability calculator with what-if scenarios", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute baseline and scenario-adjusted metrics
    Calc {
        /// Configuration file (defaults to searching for .adprofit.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Global estimate level; overrides the config's estimate_mode
        #[arg(short, long, value_enum)]
        estimate: Option<EstimateArg>,

        /// Activate a scenario by id (repeatable)
        #[arg(short, long = "activate", value_name = "ID")]
        activate: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Currency for money values
        #[arg(long, value_enum)]
        currency: Option<CurrencyArg>,

        /// Saved analytics runReport JSON to take organic sessions from
        #[arg(long = "sessions-report", value_name = "PATH")]
        sessions_report: Option<PathBuf>,

        /// Which imported sessions replace organic sessions
        #[arg(long = "sessions-target", value_enum, default_value = "total")]
        sessions_target: SessionsTarget,

        /// Print how each metric is computed
        #[arg(long)]
        explain: bool,

        /// Plain output (no colors, no emoji)
        #[arg(long)]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// List the scenario catalog
    Scenarios {
        /// Configuration file (defaults to searching for .adprofit.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Plain output (no colors, no emoji)
        #[arg(long)]
        plain: bool,

        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Split a saved analytics report into Meta, Google and other sessions
    Sessions {
        /// runReport response JSON
        #[arg(short, long)]
        report: PathBuf,

        /// GA4 property id, used in error messages
        #[arg(long = "property-id")]
        property_id: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Plain output (no colors, no emoji)
        #[arg(long)]
        plain: bool,

        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EstimateArg {
    Pessimistic,
    Realistic,
    Optimistic,
    /// Use each scenario's own level
    Individual,
}

impl From<EstimateArg> for crate::core::GlobalEstimateLevel {
    fn from(level: EstimateArg) -> Self {
        use crate::core::GlobalEstimateLevel as G;
        match level {
            EstimateArg::Pessimistic => G::Pessimistic,
            EstimateArg::Realistic => G::Realistic,
            EstimateArg::Optimistic => G::Optimistic,
            EstimateArg::Individual => G::Individual,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CurrencyArg {
    Usd,
    Eur,
    Pln,
}

impl From<CurrencyArg> for crate::formatting::Currency {
    fn from(currency: CurrencyArg) -> Self {
        use crate::formatting::Currency;
        match currency {
            CurrencyArg::Usd => Currency::Usd,
            CurrencyArg::Eur => Currency::Eur,
            CurrencyArg::Pln => Currency::Pln,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SessionsTarget {
    /// All sessions in the report
    Total,
    /// Sessions not attributed to Meta or Google Ads
    Other,
}

impl From<SessionsTarget> for crate::analytics::ImportTarget {
    fn from(target: SessionsTarget) -> Self {
        match target {
            SessionsTarget::Total => crate::analytics::ImportTarget::Total,
            SessionsTarget::Other => crate::analytics::ImportTarget::Other,
        }
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
