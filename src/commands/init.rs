use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# adprofit configuration

# USD, EUR or PLN
currency = "USD"

# pessimistic, realistic, optimistic, or individual (each scenario's own level)
estimate_mode = "realistic"

# Omitted inputs keep their defaults. Rates are percentages (1.5 = 1.5%).
[inputs]
meta_prospecting_budget = 3000
meta_prospecting_cpc = 1.0
meta_prospecting_bounce_rate = 40
meta_prospecting_conversion_rate = 1.5
meta_remarketing_budget = 2000
meta_remarketing_cpc = 0.6
meta_remarketing_bounce_rate = 25
meta_remarketing_conversion_rate = 4
google_prospecting_budget = 3000
google_prospecting_cpc = 1.5
google_prospecting_bounce_rate = 45
google_prospecting_conversion_rate = 2
google_remarketing_budget = 2000
google_remarketing_cpc = 0.9
google_remarketing_bounce_rate = 30
google_remarketing_conversion_rate = 5
organic_sessions = 15000
first_purchase_conversion_rate = 1.5
first_purchase_aov = 120
first_purchase_gross_margin = 60
repeat_purchase_conversion_rate = 20
repeat_purchase_aov = 80
repeat_purchase_gross_margin = 70
fixed_marketing_opex = 5000

[scenarios]
include_builtins = true
# Built-in ids: cro-project, seo-optimization, product-bundle,
# email-marketing, agency-ads
activate = []

# Per-scenario levels, used with estimate_mode = "individual"
[scenarios.levels]

# [[scenarios.custom]]
# id = "influencer"
# name = "Influencer campaign"
# description = "Sponsored posts with three creators"
# cost = 1200
# active = true
#
# [scenarios.custom.impact.organic_sessions]
# type = "percentage"
# value = { pessimistic = 2, realistic = 5, optimistic = 8 }

[output]
# terminal, json or markdown
default_format = "terminal"
plain = false
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_at(&PathBuf::from(CONFIG_FILE_NAME), force)
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", config_path.display());

    Ok(())
}
