//! Terminal formatting: color and emoji policy plus report value rendering.

pub mod currency;

pub use currency::{format_impact, format_number, format_percentage, Currency};

use crate::core::{EstimateLevel, FieldUnit, Impact, ImpactType, InputField};
use crate::engine::{MetricDelta, MetricUnit};
use colored::*;
use std::env;
use std::io::IsTerminal;

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

/// When to use emoji icons instead of ASCII markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,
    Always,
    Never,
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_emoji_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self::new(ColorMode::Auto, EmojiMode::Auto)
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    /// Honor `NO_COLOR`, `CLICOLOR=0` and `CLICOLOR_FORCE=1`, in that order.
    pub fn from_env() -> Self {
        let color = color_mode_from_env(
            env::var_os("NO_COLOR").is_some(),
            env::var("CLICOLOR").ok().as_deref(),
            env::var("CLICOLOR_FORCE").ok().as_deref(),
        );
        Self::new(color, EmojiMode::Auto)
    }

    /// ASCII-only report output without colors or emoji
    pub fn plain() -> Self {
        Self::new(ColorMode::Never, EmojiMode::Never)
    }
}

// Pure function: later variables win over earlier ones
fn color_mode_from_env(
    no_color: bool,
    clicolor: Option<&str>,
    clicolor_force: Option<&str>,
) -> ColorMode {
    let mut mode = ColorMode::Auto;
    if no_color || clicolor == Some("0") {
        mode = ColorMode::Never;
    }
    if clicolor_force == Some("1") {
        mode = ColorMode::Always;
    }
    mode
}

/// Styling used by the terminal report.
pub trait OutputFormatter {
    /// Favorable change
    fn success(&self, text: &str) -> String;
    /// Unfavorable change
    fn error(&self, text: &str) -> String;
    fn info(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn emoji(&self, emoji: &str, fallback: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.config.color.should_use_color() {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    fn info(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().bold())
    }

    fn emoji(&self, emoji: &str, fallback: &str) -> String {
        if self.config.emoji.should_use_emoji() {
            emoji.to_string()
        } else {
            fallback.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed())
    }
}

/// Formatter for `--plain` and non-terminal output: text passes through.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn info(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn emoji(&self, _emoji: &str, fallback: &str) -> String {
        fallback.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

// A TTY on stdout whose TERM is not `dumb`
fn detect_color_support() -> bool {
    let dumb = env::var("TERM").is_ok_and(|term| term == "dumb");
    !dumb && std::io::stdout().is_terminal()
}

fn detect_emoji_support() -> bool {
    detect_color_support()
}

/// Render a metric value in its unit.
pub fn format_value(value: f64, unit: MetricUnit, currency: Currency) -> String {
    match unit {
        MetricUnit::Currency => currency.format(value),
        MetricUnit::Count => format_number(value),
        MetricUnit::Percentage => format_percentage(value),
    }
}

/// One-line summary of an impact: `Organic Sessions: +10% / +20% / +30%`.
///
/// Values are listed pessimistic, realistic, optimistic; a missing level
/// shows as `-`. Absolute impacts render as `=value` in the field's unit.
pub fn describe_impact(field: InputField, impact: &Impact, currency: Currency) -> String {
    let values: Vec<String> = EstimateLevel::ALL
        .into_iter()
        .map(|level| match (impact.modifier(level), impact.kind) {
            (None, _) => "-".to_string(),
            (Some(value), ImpactType::Percentage) => format_impact(value),
            (Some(value), ImpactType::Absolute) => match field.meta().unit {
                FieldUnit::Currency => format!("={}", currency.format_with_decimals(value, 2)),
                FieldUnit::Percentage => format!("={value}%"),
                FieldUnit::Count => format!("={}", format_number(value)),
            },
        })
        .collect();

    format!("{}: {}", field.display_label(), values.join(" / "))
}

/// Signed delta text, or `None` when the change is too small to show.
pub fn format_delta(delta: &MetricDelta, currency: Currency) -> Option<String> {
    if !delta.is_significant() {
        return None;
    }
    let sign = if delta.delta > 0.0 { "+" } else { "" };
    let body = match delta.unit {
        MetricUnit::Currency => {
            let text = currency.format(delta.delta.abs());
            if delta.delta < 0.0 {
                format!("-{text}")
            } else {
                text
            }
        }
        MetricUnit::Count => format_number(delta.delta),
        MetricUnit::Percentage => format!("{:.2}pp", delta.delta),
    };
    Some(format!("{sign}{body}"))
}

/// Delta text painted green for improvements and red otherwise.
pub fn paint_delta(delta: &MetricDelta, currency: Currency, formatter: &dyn OutputFormatter) -> String {
    match format_delta(delta, currency) {
        Some(text) if delta.is_improvement() => formatter.success(&text),
        Some(text) => formatter.error(&text),
        None => String::new(),
    }
}
