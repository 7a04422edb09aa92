//! Loading `.adprofit.toml` from disk and turning it into a catalog and inputs.

use adprofit::config::{load_config_from, load_config_from_dir, CONFIG_FILE_NAME};
use adprofit::core::{Error, GlobalEstimateLevel};
use adprofit::engine::project;
use adprofit::formatting::Currency;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = indoc! {r#"
    currency = "EUR"
    estimate_mode = "pessimistic"

    [inputs]
    organic_sessions = 10000
    fixed_marketing_opex = 3000

    [scenarios]
    include_builtins = false
    activate = ["newsletter"]

    [[scenarios.custom]]
    id = "newsletter"
    name = "Weekly newsletter"
    description = "Weekly digest to past buyers"
    cost = 400

    [scenarios.custom.impact.repeat_purchase_conversion_rate]
    type = "percentage"
    value = { pessimistic = 10, realistic = 20, optimistic = 30 }
"#};

#[test]
fn test_explicit_config_drives_projection() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("profit.toml");
    fs::write(&path, CONFIG).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.currency, Currency::Eur);
    assert_eq!(config.estimate_mode, GlobalEstimateLevel::Pessimistic);

    let catalog = config.build_catalog().unwrap();
    assert_eq!(catalog.len(), 1);

    let projection = project(&config.inputs, &catalog.active(), config.estimate_mode);
    assert_eq!(projection.scenario_cost, 400.0);
    assert_eq!(projection.scenario.fixed_marketing_opex, 3400.0);
    assert!(
        (projection.scenario.repeat_purchase_conversion_rate
            - projection.base.repeat_purchase_conversion_rate)
            .abs()
            > 0.0
    );
}

#[test]
fn test_discovery_walks_up_from_nested_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
    let nested = temp.path().join("reports").join("2024").join("q1");
    fs::create_dir_all(&nested).unwrap();

    let config = load_config_from_dir(nested);
    assert_eq!(config.currency, Currency::Eur);
    assert_eq!(config.inputs.organic_sessions, 10000.0);
}

#[test]
fn test_explicit_invalid_config_reports_every_problem() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        indoc! {r#"
            [inputs]
            organic_sessions = nan

            [scenarios]
            activate = ["missing-one", "cro-project"]

            [scenarios.levels]
            missing-two = "optimistic"
        "#},
    )
    .unwrap();

    match load_config_from(&path) {
        Err(Error::Validation(errors)) => {
            assert_eq!(errors.len(), 3);
            assert!(errors[0].contains("organic_sessions"));
            assert!(errors[1].contains("missing-one"));
            assert!(errors[2].contains("missing-two"));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[test]
fn test_explicit_malformed_toml_is_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "currency = \"GBP\"\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains(".adprofit.toml"));
}
