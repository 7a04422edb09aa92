use serde::{Deserialize, Serialize};

use super::inputs::Channel;

/// Sessions delivered by each paid channel after bounces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelSessions {
    pub meta_prospecting: f64,
    pub meta_remarketing: f64,
    pub google_prospecting: f64,
    pub google_remarketing: f64,
}

impl ChannelSessions {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::MetaProspecting => self.meta_prospecting,
            Channel::MetaRemarketing => self.meta_remarketing,
            Channel::GoogleProspecting => self.google_prospecting,
            Channel::GoogleRemarketing => self.google_remarketing,
        }
    }

    pub(crate) fn set(&mut self, channel: Channel, sessions: f64) {
        match channel {
            Channel::MetaProspecting => self.meta_prospecting = sessions,
            Channel::MetaRemarketing => self.meta_remarketing = sessions,
            Channel::GoogleProspecting => self.google_prospecting = sessions,
            Channel::GoogleRemarketing => self.google_remarketing = sessions,
        }
    }

    pub fn total(&self) -> f64 {
        Channel::ALL.iter().map(|channel| self.get(*channel)).sum()
    }
}

/// Output of one metrics computation. A fresh value per call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsResult {
    // Traffic
    pub channel_sessions: ChannelSessions,
    pub paid_sessions: f64,
    pub organic_sessions: f64,
    pub total_sessions: f64,

    // Spend
    pub total_meta_budget: f64,
    pub total_google_budget: f64,
    pub total_ads_budget: f64,
    pub blended_cost_per_session: f64,
    /// Fixed OPEX as computed on, including scenario costs for adjusted inputs
    pub fixed_marketing_opex: f64,
    pub scenario_cost: f64,

    // First purchases
    pub prospecting_purchases: f64,
    pub organic_first_purchases: f64,
    pub first_purchases: f64,
    pub revenue_first_purchase: f64,
    pub gross_profit_first_purchase: f64,
    pub aov_first_purchase: f64,
    pub first_purchase_conversion_rate: f64,

    // Repeat purchases
    pub remarketing_purchases: f64,
    pub repeat_from_previous: f64,
    pub repeat_purchases: f64,
    pub revenue_repeat_purchase: f64,
    pub gross_profit_repeat_purchase: f64,
    pub aov_repeat_purchase: f64,
    pub repeat_purchase_conversion_rate: f64,

    // Roll-ups
    pub total_purchases: f64,
    pub total_revenue: f64,
    pub total_gross_profit: f64,
    pub total_marketing_cost: f64,
    pub marketing_profit: f64,
    pub contribution_margin: f64,
    pub blended_aov: f64,
    pub blended_conversion_rate: f64,
}

impl MetricsResult {
    /// Echo the scenario cost the inputs were adjusted with.
    pub fn with_scenario_cost(mut self, scenario_cost: f64) -> Self {
        self.scenario_cost = scenario_cost;
        self
    }
}
