use adprofit::cli::{self, Cli, Commands};
use adprofit::commands::{self, CalcConfig, ScenariosConfig, SessionsConfig};
use anyhow::Result;
use clap::Parser;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Calc {
            config,
            estimate,
            activate,
            format,
            output,
            currency,
            sessions_report,
            sessions_target,
            explain,
            plain,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            commands::handle_calc(CalcConfig {
                config_path: config,
                estimate: estimate.map(Into::into),
                activate,
                format: format.map(Into::into),
                output,
                currency: currency.map(Into::into),
                sessions_report,
                sessions_target: sessions_target.into(),
                explain,
                formatting: cli::create_formatting_config(plain),
            })
        }
        Commands::Scenarios {
            config,
            format,
            plain,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            commands::handle_scenarios(ScenariosConfig {
                config_path: config,
                format: format.map(Into::into),
                formatting: cli::create_formatting_config(plain),
            })
        }
        Commands::Sessions {
            report,
            property_id,
            format,
            plain,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            commands::handle_sessions(SessionsConfig {
                report,
                property_id,
                format: format.into(),
                formatting: cli::create_formatting_config(plain),
            })
        }
        Commands::Init { force } => {
            cli::init_logging(0);
            commands::init_config(force)
        }
    }
}
