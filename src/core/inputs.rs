//! Business input record and field metadata.
//!
//! `BusinessInputs` is the flat record the calculator works on. Every field is
//! addressable through the [`InputField`] enum so scenario impacts can name the
//! metric they adjust without string lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Paid traffic channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    MetaProspecting,
    MetaRemarketing,
    GoogleProspecting,
    GoogleRemarketing,
}

/// Ad network a channel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Meta,
    Google,
}

/// Funnel stage a channel targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Funnel {
    /// Cold audiences, purchases count as first purchases
    Prospecting,
    /// Previously engaged users, purchases count as repeat purchases
    Remarketing,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::MetaProspecting,
        Channel::MetaRemarketing,
        Channel::GoogleProspecting,
        Channel::GoogleRemarketing,
    ];

    pub fn network(self) -> Network {
        match self {
            Self::MetaProspecting | Self::MetaRemarketing => Network::Meta,
            Self::GoogleProspecting | Self::GoogleRemarketing => Network::Google,
        }
    }

    pub fn funnel(self) -> Funnel {
        match self {
            Self::MetaProspecting | Self::GoogleProspecting => Funnel::Prospecting,
            Self::MetaRemarketing | Self::GoogleRemarketing => Funnel::Remarketing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MetaProspecting => "Meta Prospecting",
            Self::MetaRemarketing => "Meta Remarketing",
            Self::GoogleProspecting => "Google Prospecting",
            Self::GoogleRemarketing => "Google Remarketing",
        }
    }
}

/// The four inputs every paid channel carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelInputs {
    pub budget: f64,
    pub cost_per_click: f64,
    pub bounce_rate: f64,
    pub conversion_rate: f64,
}

/// Caller-owned calculator inputs.
///
/// Rates and margins are percentages, conventionally in `[0, 100]`. Values
/// outside that range are accepted: scenarios may push them negative and the
/// metrics engine is total over any finite input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessInputs {
    // Meta Ads - Prospecting
    pub meta_prospecting_budget: f64,
    pub meta_prospecting_cpc: f64,
    pub meta_prospecting_bounce_rate: f64,
    pub meta_prospecting_conversion_rate: f64,
    // Meta Ads - Remarketing
    pub meta_remarketing_budget: f64,
    pub meta_remarketing_cpc: f64,
    pub meta_remarketing_bounce_rate: f64,
    pub meta_remarketing_conversion_rate: f64,
    // Google Ads - Prospecting
    pub google_prospecting_budget: f64,
    pub google_prospecting_cpc: f64,
    pub google_prospecting_bounce_rate: f64,
    pub google_prospecting_conversion_rate: f64,
    // Google Ads - Remarketing
    pub google_remarketing_budget: f64,
    pub google_remarketing_cpc: f64,
    pub google_remarketing_bounce_rate: f64,
    pub google_remarketing_conversion_rate: f64,
    // Organic traffic and purchase economics
    pub organic_sessions: f64,
    /// First purchase conversion rate for organic traffic
    pub first_purchase_conversion_rate: f64,
    pub first_purchase_aov: f64,
    pub first_purchase_gross_margin: f64,
    /// Share of first-time buyers who come back for a repeat purchase
    pub repeat_purchase_conversion_rate: f64,
    pub repeat_purchase_aov: f64,
    pub repeat_purchase_gross_margin: f64,
    pub fixed_marketing_opex: f64,
}

impl Default for BusinessInputs {
    fn default() -> Self {
        Self {
            meta_prospecting_budget: 3000.0,
            meta_prospecting_cpc: 1.0,
            meta_prospecting_bounce_rate: 40.0,
            meta_prospecting_conversion_rate: 1.5,
            meta_remarketing_budget: 2000.0,
            meta_remarketing_cpc: 0.6,
            meta_remarketing_bounce_rate: 25.0,
            meta_remarketing_conversion_rate: 4.0,
            google_prospecting_budget: 3000.0,
            google_prospecting_cpc: 1.5,
            google_prospecting_bounce_rate: 45.0,
            google_prospecting_conversion_rate: 2.0,
            google_remarketing_budget: 2000.0,
            google_remarketing_cpc: 0.9,
            google_remarketing_bounce_rate: 30.0,
            google_remarketing_conversion_rate: 5.0,
            organic_sessions: 15000.0,
            first_purchase_conversion_rate: 1.5,
            first_purchase_aov: 120.0,
            first_purchase_gross_margin: 60.0,
            repeat_purchase_conversion_rate: 20.0,
            repeat_purchase_aov: 80.0,
            repeat_purchase_gross_margin: 70.0,
            fixed_marketing_opex: 5000.0,
        }
    }
}

impl BusinessInputs {
    /// All-zero record, the usual starting point for building inputs by hand.
    pub fn zeroed() -> Self {
        let mut inputs = Self::default();
        for field in InputField::ALL {
            inputs.set(field, 0.0);
        }
        inputs
    }

    pub fn get(&self, field: InputField) -> f64 {
        *self.slot(field)
    }

    pub fn set(&mut self, field: InputField, value: f64) {
        *self.slot_mut(field) = value;
    }

    /// Builder-style setter.
    pub fn with(mut self, field: InputField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn channel(&self, channel: Channel) -> ChannelInputs {
        let [budget, cpc, bounce, conversion] = InputField::for_channel(channel);
        ChannelInputs {
            budget: self.get(budget),
            cost_per_click: self.get(cpc),
            bounce_rate: self.get(bounce),
            conversion_rate: self.get(conversion),
        }
    }

    /// Fields whose value is NaN or infinite.
    pub fn non_finite_fields(&self) -> Vec<InputField> {
        InputField::ALL
            .into_iter()
            .filter(|field| !self.get(*field).is_finite())
            .collect()
    }

    fn slot(&self, field: InputField) -> &f64 {
        match field {
            InputField::MetaProspectingBudget => &self.meta_prospecting_budget,
            InputField::MetaProspectingCpc => &self.meta_prospecting_cpc,
            InputField::MetaProspectingBounceRate => &self.meta_prospecting_bounce_rate,
            InputField::MetaProspectingConversionRate => &self.meta_prospecting_conversion_rate,
            InputField::MetaRemarketingBudget => &self.meta_remarketing_budget,
            InputField::MetaRemarketingCpc => &self.meta_remarketing_cpc,
            InputField::MetaRemarketingBounceRate => &self.meta_remarketing_bounce_rate,
            InputField::MetaRemarketingConversionRate => &self.meta_remarketing_conversion_rate,
            InputField::GoogleProspectingBudget => &self.google_prospecting_budget,
            InputField::GoogleProspectingCpc => &self.google_prospecting_cpc,
            InputField::GoogleProspectingBounceRate => &self.google_prospecting_bounce_rate,
            InputField::GoogleProspectingConversionRate => {
                &self.google_prospecting_conversion_rate
            }
            InputField::GoogleRemarketingBudget => &self.google_remarketing_budget,
            InputField::GoogleRemarketingCpc => &self.google_remarketing_cpc,
            InputField::GoogleRemarketingBounceRate => &self.google_remarketing_bounce_rate,
            InputField::GoogleRemarketingConversionRate => {
                &self.google_remarketing_conversion_rate
            }
            InputField::OrganicSessions => &self.organic_sessions,
            InputField::FirstPurchaseConversionRate => &self.first_purchase_conversion_rate,
            InputField::FirstPurchaseAov => &self.first_purchase_aov,
            InputField::FirstPurchaseGrossMargin => &self.first_purchase_gross_margin,
            InputField::RepeatPurchaseConversionRate => &self.repeat_purchase_conversion_rate,
            InputField::RepeatPurchaseAov => &self.repeat_purchase_aov,
            InputField::RepeatPurchaseGrossMargin => &self.repeat_purchase_gross_margin,
            InputField::FixedMarketingOpex => &self.fixed_marketing_opex,
        }
    }

    fn slot_mut(&mut self, field: InputField) -> &mut f64 {
        match field {
            InputField::MetaProspectingBudget => &mut self.meta_prospecting_budget,
            InputField::MetaProspectingCpc => &mut self.meta_prospecting_cpc,
            InputField::MetaProspectingBounceRate => &mut self.meta_prospecting_bounce_rate,
            InputField::MetaProspectingConversionRate => {
                &mut self.meta_prospecting_conversion_rate
            }
            InputField::MetaRemarketingBudget => &mut self.meta_remarketing_budget,
            InputField::MetaRemarketingCpc => &mut self.meta_remarketing_cpc,
            InputField::MetaRemarketingBounceRate => &mut self.meta_remarketing_bounce_rate,
            InputField::MetaRemarketingConversionRate => {
                &mut self.meta_remarketing_conversion_rate
            }
            InputField::GoogleProspectingBudget => &mut self.google_prospecting_budget,
            InputField::GoogleProspectingCpc => &mut self.google_prospecting_cpc,
            InputField::GoogleProspectingBounceRate => &mut self.google_prospecting_bounce_rate,
            InputField::GoogleProspectingConversionRate => {
                &mut self.google_prospecting_conversion_rate
            }
            InputField::GoogleRemarketingBudget => &mut self.google_remarketing_budget,
            InputField::GoogleRemarketingCpc => &mut self.google_remarketing_cpc,
            InputField::GoogleRemarketingBounceRate => &mut self.google_remarketing_bounce_rate,
            InputField::GoogleRemarketingConversionRate => {
                &mut self.google_remarketing_conversion_rate
            }
            InputField::OrganicSessions => &mut self.organic_sessions,
            InputField::FirstPurchaseConversionRate => &mut self.first_purchase_conversion_rate,
            InputField::FirstPurchaseAov => &mut self.first_purchase_aov,
            InputField::FirstPurchaseGrossMargin => &mut self.first_purchase_gross_margin,
            InputField::RepeatPurchaseConversionRate => {
                &mut self.repeat_purchase_conversion_rate
            }
            InputField::RepeatPurchaseAov => &mut self.repeat_purchase_aov,
            InputField::RepeatPurchaseGrossMargin => &mut self.repeat_purchase_gross_margin,
            InputField::FixedMarketingOpex => &mut self.fixed_marketing_opex,
        }
    }
}

/// Names a single field of [`BusinessInputs`].
///
/// Serialized in snake_case so it matches the TOML/JSON key of the field it
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    MetaProspectingBudget,
    MetaProspectingCpc,
    MetaProspectingBounceRate,
    MetaProspectingConversionRate,
    MetaRemarketingBudget,
    MetaRemarketingCpc,
    MetaRemarketingBounceRate,
    MetaRemarketingConversionRate,
    GoogleProspectingBudget,
    GoogleProspectingCpc,
    GoogleProspectingBounceRate,
    GoogleProspectingConversionRate,
    GoogleRemarketingBudget,
    GoogleRemarketingCpc,
    GoogleRemarketingBounceRate,
    GoogleRemarketingConversionRate,
    OrganicSessions,
    FirstPurchaseConversionRate,
    FirstPurchaseAov,
    FirstPurchaseGrossMargin,
    RepeatPurchaseConversionRate,
    RepeatPurchaseAov,
    RepeatPurchaseGrossMargin,
    FixedMarketingOpex,
}

/// Input form section a field is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldGroup {
    MetaProspecting,
    MetaRemarketing,
    GoogleProspecting,
    GoogleRemarketing,
    GeneralOrganic,
    GeneralFirstPurchase,
    GeneralRepeatPurchase,
    GeneralOpex,
}

/// Display unit of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldUnit {
    Currency,
    Percentage,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub field: InputField,
    pub label: &'static str,
    pub group: FieldGroup,
    pub unit: FieldUnit,
}

impl InputField {
    pub const ALL: [InputField; 24] = [
        InputField::MetaProspectingBudget,
        InputField::MetaProspectingCpc,
        InputField::MetaProspectingBounceRate,
        InputField::MetaProspectingConversionRate,
        InputField::MetaRemarketingBudget,
        InputField::MetaRemarketingCpc,
        InputField::MetaRemarketingBounceRate,
        InputField::MetaRemarketingConversionRate,
        InputField::GoogleProspectingBudget,
        InputField::GoogleProspectingCpc,
        InputField::GoogleProspectingBounceRate,
        InputField::GoogleProspectingConversionRate,
        InputField::GoogleRemarketingBudget,
        InputField::GoogleRemarketingCpc,
        InputField::GoogleRemarketingBounceRate,
        InputField::GoogleRemarketingConversionRate,
        InputField::OrganicSessions,
        InputField::FirstPurchaseConversionRate,
        InputField::FirstPurchaseAov,
        InputField::FirstPurchaseGrossMargin,
        InputField::RepeatPurchaseConversionRate,
        InputField::RepeatPurchaseAov,
        InputField::RepeatPurchaseGrossMargin,
        InputField::FixedMarketingOpex,
    ];

    /// Budget, CPC, bounce rate and conversion rate fields of a channel, in that order.
    pub fn for_channel(channel: Channel) -> [InputField; 4] {
        match channel {
            Channel::MetaProspecting => [
                Self::MetaProspectingBudget,
                Self::MetaProspectingCpc,
                Self::MetaProspectingBounceRate,
                Self::MetaProspectingConversionRate,
            ],
            Channel::MetaRemarketing => [
                Self::MetaRemarketingBudget,
                Self::MetaRemarketingCpc,
                Self::MetaRemarketingBounceRate,
                Self::MetaRemarketingConversionRate,
            ],
            Channel::GoogleProspecting => [
                Self::GoogleProspectingBudget,
                Self::GoogleProspectingCpc,
                Self::GoogleProspectingBounceRate,
                Self::GoogleProspectingConversionRate,
            ],
            Channel::GoogleRemarketing => [
                Self::GoogleRemarketingBudget,
                Self::GoogleRemarketingCpc,
                Self::GoogleRemarketingBounceRate,
                Self::GoogleRemarketingConversionRate,
            ],
        }
    }

    /// Snake-case key, identical to the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Self::MetaProspectingBudget => "meta_prospecting_budget",
            Self::MetaProspectingCpc => "meta_prospecting_cpc",
            Self::MetaProspectingBounceRate => "meta_prospecting_bounce_rate",
            Self::MetaProspectingConversionRate => "meta_prospecting_conversion_rate",
            Self::MetaRemarketingBudget => "meta_remarketing_budget",
            Self::MetaRemarketingCpc => "meta_remarketing_cpc",
            Self::MetaRemarketingBounceRate => "meta_remarketing_bounce_rate",
            Self::MetaRemarketingConversionRate => "meta_remarketing_conversion_rate",
            Self::GoogleProspectingBudget => "google_prospecting_budget",
            Self::GoogleProspectingCpc => "google_prospecting_cpc",
            Self::GoogleProspectingBounceRate => "google_prospecting_bounce_rate",
            Self::GoogleProspectingConversionRate => "google_prospecting_conversion_rate",
            Self::GoogleRemarketingBudget => "google_remarketing_budget",
            Self::GoogleRemarketingCpc => "google_remarketing_cpc",
            Self::GoogleRemarketingBounceRate => "google_remarketing_bounce_rate",
            Self::GoogleRemarketingConversionRate => "google_remarketing_conversion_rate",
            Self::OrganicSessions => "organic_sessions",
            Self::FirstPurchaseConversionRate => "first_purchase_conversion_rate",
            Self::FirstPurchaseAov => "first_purchase_aov",
            Self::FirstPurchaseGrossMargin => "first_purchase_gross_margin",
            Self::RepeatPurchaseConversionRate => "repeat_purchase_conversion_rate",
            Self::RepeatPurchaseAov => "repeat_purchase_aov",
            Self::RepeatPurchaseGrossMargin => "repeat_purchase_gross_margin",
            Self::FixedMarketingOpex => "fixed_marketing_opex",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == s)
    }

    pub fn meta(self) -> FieldMeta {
        use FieldGroup as G;
        use FieldUnit as U;

        let (label, group, unit) = match self {
            Self::MetaProspectingBudget => ("Budget", G::MetaProspecting, U::Currency),
            Self::MetaProspectingCpc => ("CPC", G::MetaProspecting, U::Currency),
            Self::MetaProspectingBounceRate => ("Bounce Rate", G::MetaProspecting, U::Percentage),
            Self::MetaProspectingConversionRate => {
                ("Conversion Rate", G::MetaProspecting, U::Percentage)
            }
            Self::MetaRemarketingBudget => ("Budget", G::MetaRemarketing, U::Currency),
            Self::MetaRemarketingCpc => ("CPC", G::MetaRemarketing, U::Currency),
            Self::MetaRemarketingBounceRate => ("Bounce Rate", G::MetaRemarketing, U::Percentage),
            Self::MetaRemarketingConversionRate => {
                ("Conversion Rate", G::MetaRemarketing, U::Percentage)
            }
            Self::GoogleProspectingBudget => ("Budget", G::GoogleProspecting, U::Currency),
            Self::GoogleProspectingCpc => ("CPC", G::GoogleProspecting, U::Currency),
            Self::GoogleProspectingBounceRate => {
                ("Bounce Rate", G::GoogleProspecting, U::Percentage)
            }
            Self::GoogleProspectingConversionRate => {
                ("Conversion Rate", G::GoogleProspecting, U::Percentage)
            }
            Self::GoogleRemarketingBudget => ("Budget", G::GoogleRemarketing, U::Currency),
            Self::GoogleRemarketingCpc => ("CPC", G::GoogleRemarketing, U::Currency),
            Self::GoogleRemarketingBounceRate => {
                ("Bounce Rate", G::GoogleRemarketing, U::Percentage)
            }
            Self::GoogleRemarketingConversionRate => {
                ("Conversion Rate", G::GoogleRemarketing, U::Percentage)
            }
            Self::OrganicSessions => ("Organic Sessions", G::GeneralOrganic, U::Count),
            Self::FirstPurchaseConversionRate => (
                "Organic First Purchase CR",
                G::GeneralFirstPurchase,
                U::Percentage,
            ),
            Self::FirstPurchaseAov => ("AOV (First Purchase)", G::GeneralFirstPurchase, U::Currency),
            Self::FirstPurchaseGrossMargin => (
                "Gross Margin (First Purchase)",
                G::GeneralFirstPurchase,
                U::Percentage,
            ),
            Self::RepeatPurchaseConversionRate => {
                ("Repeat Purchase CR", G::GeneralRepeatPurchase, U::Percentage)
            }
            Self::RepeatPurchaseAov => {
                ("AOV (Repeat Purchase)", G::GeneralRepeatPurchase, U::Currency)
            }
            Self::RepeatPurchaseGrossMargin => (
                "Gross Margin (Repeat Purchase)",
                G::GeneralRepeatPurchase,
                U::Percentage,
            ),
            Self::FixedMarketingOpex => ("Fixed Marketing OPEX", G::GeneralOpex, U::Currency),
        };

        FieldMeta {
            field: self,
            label,
            group,
            unit,
        }
    }

    /// Label with the channel prefix for channel fields ("Meta Prospecting CPC").
    pub fn display_label(self) -> String {
        let meta = self.meta();
        match meta.group.channel() {
            Some(channel) => format!("{} {}", channel.label(), meta.label),
            None => meta.label.to_string(),
        }
    }

    pub fn is_percentage(self) -> bool {
        self.meta().unit == FieldUnit::Percentage
    }
}

impl FieldGroup {
    pub fn channel(self) -> Option<Channel> {
        match self {
            Self::MetaProspecting => Some(Channel::MetaProspecting),
            Self::MetaRemarketing => Some(Channel::MetaRemarketing),
            Self::GoogleProspecting => Some(Channel::GoogleProspecting),
            Self::GoogleRemarketing => Some(Channel::GoogleRemarketing),
            _ => None,
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_cover_every_field() {
        let mut inputs = BusinessInputs::zeroed();
        for (i, field) in InputField::ALL.into_iter().enumerate() {
            inputs.set(field, i as f64 + 1.0);
        }
        for (i, field) in InputField::ALL.into_iter().enumerate() {
            assert_eq!(inputs.get(field), i as f64 + 1.0, "{field}");
        }
    }

    #[test]
    fn key_round_trips_through_parse_and_serde() {
        for field in InputField::ALL {
            assert_eq!(InputField::parse(field.key()), Some(field));
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
        assert_eq!(InputField::parse("organicSessions"), None);
    }

    #[test]
    fn channel_view_reads_matching_fields() {
        let inputs = BusinessInputs::default();
        let google = inputs.channel(Channel::GoogleRemarketing);
        assert_eq!(google.budget, 2000.0);
        assert_eq!(google.cost_per_click, 0.9);
        assert_eq!(google.bounce_rate, 30.0);
        assert_eq!(google.conversion_rate, 5.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let inputs: BusinessInputs = toml::from_str("organic_sessions = 100.0").unwrap();
        assert_eq!(inputs.organic_sessions, 100.0);
        assert_eq!(inputs.first_purchase_aov, 120.0);
    }

    #[test]
    fn display_label_prefixes_channel() {
        assert_eq!(
            InputField::MetaProspectingCpc.display_label(),
            "Meta Prospecting CPC"
        );
        assert_eq!(InputField::OrganicSessions.display_label(), "Organic Sessions");
        assert!(InputField::RepeatPurchaseGrossMargin.is_percentage());
        assert!(!InputField::FixedMarketingOpex.is_percentage());
    }

    #[test]
    fn non_finite_fields_are_reported() {
        let inputs = BusinessInputs::zeroed()
            .with(InputField::OrganicSessions, f64::NAN)
            .with(InputField::FixedMarketingOpex, f64::INFINITY);
        assert_eq!(
            inputs.non_finite_fields(),
            vec![InputField::OrganicSessions, InputField::FixedMarketingOpex]
        );
    }
}
