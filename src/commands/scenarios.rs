use super::load_profit_config;
use crate::formatting::FormattingConfig;
use crate::io::{self, CatalogReport, OutputFormat};
use anyhow::Result;
use std::path::PathBuf;

pub struct ScenariosConfig {
    pub config_path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub formatting: FormattingConfig,
}

pub fn handle_scenarios(config: ScenariosConfig) -> Result<()> {
    let profit_config = load_profit_config(config.config_path.as_deref())?;
    let catalog = profit_config.build_catalog()?;
    log::debug!("Catalog has {} scenarios", catalog.len());

    let report = CatalogReport::new(
        catalog.to_vec(),
        profit_config.estimate_mode,
        profit_config.currency,
    );

    let format = config
        .format
        .or(profit_config.output.default_format)
        .unwrap_or_default();
    let formatting = if profit_config.output.plain {
        FormattingConfig::plain()
    } else {
        config.formatting
    };

    let mut writer = io::create_writer(format, io::open_output(None)?, formatting);
    writer.write_catalog(&report)
}
