use super::load_profit_config;
use super::sessions::read_session_report;
use crate::analytics::{apply_import, ImportTarget};
use crate::cli::print_metrics_explanation;
use crate::config::ProfitConfig;
use crate::core::{BusinessInputs, GlobalEstimateLevel};
use crate::engine::project;
use crate::formatting::{Currency, FormattingConfig};
use crate::io::{self, CalcReport, OutputFormat};
use crate::scenarios::ScenarioCatalog;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct CalcConfig {
    pub config_path: Option<PathBuf>,
    pub estimate: Option<GlobalEstimateLevel>,
    pub activate: Vec<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub currency: Option<Currency>,
    pub sessions_report: Option<PathBuf>,
    pub sessions_target: ImportTarget,
    pub explain: bool,
    pub formatting: FormattingConfig,
}

pub fn handle_calc(config: CalcConfig) -> Result<()> {
    let profit_config = load_profit_config(config.config_path.as_deref())?;
    let report = build_report(&config, &profit_config)?;

    let format = config
        .format
        .or(profit_config.output.default_format)
        .unwrap_or_default();
    let formatting = if profit_config.output.plain {
        FormattingConfig::plain()
    } else {
        config.formatting
    };

    let out = io::open_output(config.output.as_deref())?;
    let mut writer = io::create_writer(format, out, formatting);
    writer.write_report(&report)?;

    if let Some(path) = &config.output {
        log::info!("Report written to {}", path.display());
    }

    if config.explain {
        if format == OutputFormat::Terminal && config.output.is_none() {
            print_metrics_explanation();
        } else {
            log::warn!("--explain only applies to terminal output on stdout; ignoring");
        }
    }

    Ok(())
}

/// Resolve inputs, catalog and estimate mode from config plus flags, then
/// run the projection.
pub fn build_report(config: &CalcConfig, profit_config: &ProfitConfig) -> Result<CalcReport> {
    let catalog = activate_all(profit_config.build_catalog()?, &config.activate)?;
    let inputs = resolve_inputs(config, profit_config.inputs)?;
    let estimate_mode = config.estimate.unwrap_or(profit_config.estimate_mode);
    let currency = config.currency.unwrap_or(profit_config.currency);

    let active = catalog.active();
    log::debug!(
        "Running projection with {} active scenarios at {}",
        active.len(),
        estimate_mode
    );
    let projection = project(&inputs, &active, estimate_mode);

    Ok(CalcReport::new(
        inputs,
        &active,
        estimate_mode,
        currency,
        projection,
    ))
}

// Pure function: activate each id, failing on the first unknown one
fn activate_all(mut catalog: ScenarioCatalog, ids: &[String]) -> Result<ScenarioCatalog> {
    for id in ids {
        catalog
            .set_active(id, true)
            .with_context(|| format!("Cannot activate '{id}'"))?;
    }
    Ok(catalog)
}

fn resolve_inputs(config: &CalcConfig, inputs: BusinessInputs) -> Result<BusinessInputs> {
    match &config.sessions_report {
        Some(path) => {
            let breakdown = read_session_report(path, None)?;
            Ok(apply_import(&inputs, &breakdown, config.sessions_target))
        }
        None => Ok(inputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc_config() -> CalcConfig {
        CalcConfig {
            config_path: None,
            estimate: None,
            activate: Vec::new(),
            format: None,
            output: None,
            currency: None,
            sessions_report: None,
            sessions_target: ImportTarget::Total,
            explain: false,
            formatting: FormattingConfig::plain(),
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = calc_config();
        config.activate = vec!["seo-optimization".into()];
        config.estimate = Some(GlobalEstimateLevel::Optimistic);
        config.currency = Some(Currency::Pln);

        let report = build_report(&config, &ProfitConfig::default()).unwrap();

        assert_eq!(report.currency, Currency::Pln);
        assert_eq!(report.estimate_mode, GlobalEstimateLevel::Optimistic);
        assert_eq!(report.projection.scenario_cost, 2000.0);
        // +30% organic sessions at the optimistic level
        assert!((report.projection.scenario.organic_sessions - 19500.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_activation_is_an_error() {
        let mut config = calc_config();
        config.activate = vec!["nope".into()];

        let err = build_report(&config, &ProfitConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Cannot activate 'nope'"));
    }

    #[test]
    fn baseline_only_without_activations() {
        let report = build_report(&calc_config(), &ProfitConfig::default()).unwrap();
        assert!(report.active_scenarios.is_empty());
        assert_eq!(report.projection.base, report.projection.scenario);
        assert_eq!(report.projection.roi, 0.0);
    }
}
