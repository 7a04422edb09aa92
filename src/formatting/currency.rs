//! Number formatting for reports: currency, counts, percentages and deltas.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Pln,
}

impl Currency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "PLN" => Some(Self::Pln),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Pln => "PLN",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Pln => "zł",
        }
    }

    /// Whole-unit amount with thousands separators, e.g. `-$1,234`.
    pub fn format(self, value: f64) -> String {
        self.format_with_decimals(value, 0)
    }

    pub fn format_with_decimals(self, value: f64, decimals: usize) -> String {
        let sign = if value < 0.0 && round_to(value.abs(), decimals) > 0.0 {
            "-"
        } else {
            ""
        };
        let amount = group_thousands(value.abs(), decimals);
        match self {
            Self::Pln => format!("{sign}{amount} {}", self.symbol()),
            _ => format!("{sign}{}{amount}", self.symbol()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rounded count with thousands separators.
pub fn format_number(value: f64) -> String {
    let sign = if value.round() < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(value.abs(), 0))
}

/// Two-decimal percentage; non-finite values render as `0.00%`.
pub fn format_percentage(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.2}%")
}

/// Signed scenario impact, e.g. `+15%` or `-10%`.
pub fn format_impact(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value}%")
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// Pure function: format a non-negative value with `,` thousands separators
fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac)) => (int_part.to_string(), Some(frac.to_string())),
        None => (formatted.clone(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_formats_with_grouping() {
        assert_eq!(Currency::Usd.format(10144.0), "$10,144");
        assert_eq!(Currency::Eur.format(999.6), "€1,000");
        assert_eq!(Currency::Pln.format(1234567.0), "1,234,567 zł");
        assert_eq!(Currency::Usd.format(-2500.4), "-$2,500");
        assert_eq!(Currency::Usd.format(-0.2), "$0");
    }

    #[test]
    fn numbers_and_percentages() {
        assert_eq!(format_number(16800.4), "16,800");
        assert_eq!(format_number(-1500.0), "-1,500");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_percentage(1.5), "1.50%");
        assert_eq!(format_percentage(f64::NAN), "0.00%");
        assert_eq!(format_impact(15.0), "+15%");
        assert_eq!(format_impact(-10.0), "-10%");
        assert_eq!(format_impact(0.0), "0%");
    }

    #[test]
    fn currency_parse_is_case_insensitive() {
        assert_eq!(Currency::parse("eur"), Some(Currency::Eur));
        assert_eq!(Currency::parse("GBP"), None);
        let json = serde_json::to_string(&Currency::Pln).unwrap();
        assert_eq!(json, "\"PLN\"");
    }
}
