//! Setup and initialization functions for CLI
//!
//! Logging, terminal formatting and the `--explain` reference text.

use crate::formatting::{ColorMode, EmojiMode, FormattingConfig};

/// Map `-v` repetitions to a default log filter.
pub fn log_level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize env_logger once. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbosity: u8) {
    let env = env_logger::Env::default().default_filter_or(log_level_for(verbosity));
    // A second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

// Pure function to create formatting configuration
pub fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::new(ColorMode::Never, EmojiMode::Never)
    } else {
        FormattingConfig::from_env()
    }
}

/// Print explanation of metric definitions and formulas
pub fn print_metrics_explanation() {
    println!("\n=== adprofit Metrics Reference ===\n");

    println!("## Traffic\n");
    println!("  - Channel sessions: budget / CPC x (1 - bounce rate / 100); 0 when CPC <= 0");
    println!("  - Paid sessions: sum of the four channel sessions");
    println!("  - Total sessions: paid sessions + organic sessions");
    println!("  - Blended cost per session: ads budget / total sessions\n");

    println!("## First Purchases\n");
    println!("  - Prospecting purchases: channel sessions x channel conversion rate / 100");
    println!("  - Organic first purchases: organic sessions x first purchase CR / 100");
    println!("  - Revenue: first purchases x AOV; gross profit applies the first purchase margin\n");

    println!("## Repeat Purchases\n");
    println!("  - Remarketing purchases: channel sessions x channel conversion rate / 100");
    println!("  - Repeat from previous: first purchases x repeat purchase CR / 100");
    println!("  - Revenue: repeat purchases x repeat AOV; gross profit applies the repeat margin\n");

    println!("## Profitability\n");
    println!("  - Total marketing cost: ads budget + fixed marketing OPEX (incl. scenario costs)");
    println!("  - Marketing profit: total gross profit - total marketing cost");
    println!("  - Contribution margin: total gross profit - ads budget");
    println!("  - Blended AOV: total revenue / total purchases");
    println!("  - Blended conversion rate: total purchases / total sessions x 100\n");

    println!("## Scenarios\n");
    println!("  - Percentage impacts scale a field: value x (1 + modifier / 100)");
    println!("  - Absolute impacts set a field to the modifier");
    println!("  - Scenarios apply in catalog order; costs are added to OPEX");
    println!("  - ROI: contribution margin delta / scenario cost x 100\n");

    println!("Ratios with a zero denominator are reported as 0.\n");
}
