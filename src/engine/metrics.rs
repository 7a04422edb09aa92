//! Metrics engine: derive traffic, purchases, revenue and profit from inputs.
//!
//! Total over finite numbers. Every ratio whose denominator can be zero or
//! negative resolves to 0 instead of NaN or infinity.

use crate::core::{BusinessInputs, Channel, ChannelInputs, ChannelSessions, Funnel, MetricsResult, Network};

/// Compute all metrics for `inputs`.
///
/// Remarketing purchases are counted as repeat purchases. This is a modeling
/// convention: the engine has no notion of customer identity.
pub fn compute_metrics(inputs: &BusinessInputs) -> MetricsResult {
    let channel_sessions = sessions_per_channel(inputs);
    let paid_sessions = channel_sessions.total();
    let organic_sessions = inputs.organic_sessions;
    let total_sessions = paid_sessions + organic_sessions;

    let total_meta_budget = network_budget(inputs, Network::Meta);
    let total_google_budget = network_budget(inputs, Network::Google);
    let total_ads_budget = total_meta_budget + total_google_budget;
    let blended_cost_per_session = safe_ratio(total_ads_budget, total_sessions);

    // First purchases: prospecting channels plus organic traffic
    let prospecting_purchases = funnel_purchases(inputs, &channel_sessions, Funnel::Prospecting);
    let organic_first_purchases =
        organic_sessions * percent(inputs.first_purchase_conversion_rate);
    let first_purchases = prospecting_purchases + organic_first_purchases;
    let revenue_first_purchase = first_purchases * inputs.first_purchase_aov;
    let gross_profit_first_purchase =
        revenue_first_purchase * percent(inputs.first_purchase_gross_margin);

    // Repeat purchases: remarketing channels plus returning first-time buyers
    let remarketing_purchases = funnel_purchases(inputs, &channel_sessions, Funnel::Remarketing);
    let repeat_from_previous = first_purchases * percent(inputs.repeat_purchase_conversion_rate);
    let repeat_purchases = remarketing_purchases + repeat_from_previous;
    let revenue_repeat_purchase = repeat_purchases * inputs.repeat_purchase_aov;
    let gross_profit_repeat_purchase =
        revenue_repeat_purchase * percent(inputs.repeat_purchase_gross_margin);

    let total_gross_profit = gross_profit_first_purchase + gross_profit_repeat_purchase;
    let total_marketing_cost = total_ads_budget + inputs.fixed_marketing_opex;
    let marketing_profit = total_gross_profit - total_marketing_cost;
    let contribution_margin = total_gross_profit - total_ads_budget;

    let total_purchases = first_purchases + repeat_purchases;
    let total_revenue = revenue_first_purchase + revenue_repeat_purchase;
    let blended_aov = safe_ratio(total_revenue, total_purchases);
    let blended_conversion_rate = safe_ratio(total_purchases, total_sessions) * 100.0;

    let first_purchase_audience = funnel_sessions(&channel_sessions, Funnel::Prospecting)
        + organic_sessions;
    let first_purchase_conversion_rate =
        safe_ratio(first_purchases, first_purchase_audience) * 100.0;

    // Only Meta remarketing traffic counts toward the repeat audience
    let repeat_purchase_audience = channel_sessions.meta_remarketing + first_purchases;
    let repeat_purchase_conversion_rate =
        safe_ratio(repeat_purchases, repeat_purchase_audience) * 100.0;

    MetricsResult {
        channel_sessions,
        paid_sessions,
        organic_sessions,
        total_sessions,
        total_meta_budget,
        total_google_budget,
        total_ads_budget,
        blended_cost_per_session,
        fixed_marketing_opex: inputs.fixed_marketing_opex,
        scenario_cost: 0.0,
        prospecting_purchases,
        organic_first_purchases,
        first_purchases,
        revenue_first_purchase,
        gross_profit_first_purchase,
        aov_first_purchase: inputs.first_purchase_aov,
        first_purchase_conversion_rate,
        remarketing_purchases,
        repeat_from_previous,
        repeat_purchases,
        revenue_repeat_purchase,
        gross_profit_repeat_purchase,
        aov_repeat_purchase: inputs.repeat_purchase_aov,
        repeat_purchase_conversion_rate,
        total_purchases,
        total_revenue,
        total_gross_profit,
        total_marketing_cost,
        marketing_profit,
        contribution_margin,
        blended_aov,
        blended_conversion_rate,
    }
}

/// Sessions a channel delivers after bounces.
///
/// Zero or negative CPC yields zero sessions rather than dividing.
pub fn channel_sessions(channel: &ChannelInputs) -> f64 {
    if channel.cost_per_click <= 0.0 {
        return 0.0;
    }
    let clicks = channel.budget / channel.cost_per_click;
    clicks * (1.0 - percent(channel.bounce_rate))
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn percent(value: f64) -> f64 {
    value / 100.0
}

fn sessions_per_channel(inputs: &BusinessInputs) -> ChannelSessions {
    let mut sessions = ChannelSessions::default();
    for channel in Channel::ALL {
        sessions.set(channel, channel_sessions(&inputs.channel(channel)));
    }
    sessions
}

fn network_budget(inputs: &BusinessInputs, network: Network) -> f64 {
    Channel::ALL
        .iter()
        .filter(|channel| channel.network() == network)
        .map(|channel| inputs.channel(*channel).budget)
        .sum()
}

fn funnel_sessions(sessions: &ChannelSessions, funnel: Funnel) -> f64 {
    Channel::ALL
        .iter()
        .filter(|channel| channel.funnel() == funnel)
        .map(|channel| sessions.get(*channel))
        .sum()
}

fn funnel_purchases(inputs: &BusinessInputs, sessions: &ChannelSessions, funnel: Funnel) -> f64 {
    Channel::ALL
        .iter()
        .filter(|channel| channel.funnel() == funnel)
        .map(|channel| sessions.get(*channel) * percent(inputs.channel(*channel).conversion_rate))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputField;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn worked_example() -> BusinessInputs {
        BusinessInputs::zeroed()
            .with(InputField::MetaProspectingBudget, 3000.0)
            .with(InputField::MetaProspectingCpc, 1.0)
            .with(InputField::MetaProspectingBounceRate, 40.0)
            .with(InputField::MetaProspectingConversionRate, 1.5)
            .with(InputField::OrganicSessions, 15000.0)
            .with(InputField::FirstPurchaseConversionRate, 1.5)
            .with(InputField::FirstPurchaseAov, 120.0)
            .with(InputField::FirstPurchaseGrossMargin, 60.0)
            .with(InputField::FixedMarketingOpex, 5000.0)
    }

    #[test]
    fn worked_example_matches_hand_calculation() {
        let result = compute_metrics(&worked_example());

        assert_close(result.channel_sessions.meta_prospecting, 1800.0);
        assert_close(result.total_sessions, 16800.0);
        assert_close(result.prospecting_purchases, 27.0);
        assert_close(result.organic_first_purchases, 225.0);
        assert_close(result.first_purchases, 252.0);
        assert_close(result.revenue_first_purchase, 30240.0);
        assert_close(result.gross_profit_first_purchase, 18144.0);
        assert_close(result.total_gross_profit, 18144.0);
        assert_close(result.total_marketing_cost, 8000.0);
        assert_close(result.marketing_profit, 10144.0);
        assert_close(result.contribution_margin, 15144.0);
        assert_eq!(result.repeat_purchases, 0.0);
    }

    #[test]
    fn zero_cpc_yields_zero_sessions() {
        let inputs = BusinessInputs::zeroed()
            .with(InputField::GoogleProspectingBudget, 500.0)
            .with(InputField::GoogleProspectingCpc, 0.0);
        let result = compute_metrics(&inputs);

        assert_eq!(result.channel_sessions.google_prospecting, 0.0);
        assert_eq!(result.total_ads_budget, 500.0);
    }

    #[test]
    fn negative_cpc_yields_zero_sessions() {
        let channel = ChannelInputs {
            budget: 100.0,
            cost_per_click: -2.0,
            bounce_rate: 10.0,
            conversion_rate: 3.0,
        };
        assert_eq!(channel_sessions(&channel), 0.0);
    }

    #[test]
    fn empty_inputs_produce_zero_ratios() {
        let result = compute_metrics(&BusinessInputs::zeroed());

        assert_eq!(result.total_sessions, 0.0);
        assert_eq!(result.blended_cost_per_session, 0.0);
        assert_eq!(result.blended_conversion_rate, 0.0);
        assert_eq!(result.blended_aov, 0.0);
        assert_eq!(result.first_purchase_conversion_rate, 0.0);
        assert_eq!(result.repeat_purchase_conversion_rate, 0.0);
    }

    #[test]
    fn remarketing_purchases_count_as_repeat() {
        let inputs = BusinessInputs::zeroed()
            .with(InputField::MetaRemarketingBudget, 600.0)
            .with(InputField::MetaRemarketingCpc, 0.6)
            .with(InputField::MetaRemarketingConversionRate, 4.0)
            .with(InputField::RepeatPurchaseAov, 80.0)
            .with(InputField::RepeatPurchaseGrossMargin, 50.0);
        let result = compute_metrics(&inputs);

        assert_close(result.channel_sessions.meta_remarketing, 1000.0);
        assert_close(result.remarketing_purchases, 40.0);
        assert_close(result.repeat_purchases, 40.0);
        assert_eq!(result.first_purchases, 0.0);
        assert_close(result.revenue_repeat_purchase, 3200.0);
        assert_close(result.gross_profit_repeat_purchase, 1600.0);
        assert_close(result.repeat_purchase_conversion_rate, 4.0);
    }

    #[test]
    fn repeat_conversion_rate_uses_meta_remarketing_audience() {
        let inputs = BusinessInputs::zeroed()
            .with(InputField::MetaRemarketingBudget, 600.0)
            .with(InputField::MetaRemarketingCpc, 0.6)
            .with(InputField::MetaRemarketingConversionRate, 4.0)
            .with(InputField::GoogleRemarketingBudget, 900.0)
            .with(InputField::GoogleRemarketingCpc, 0.9)
            .with(InputField::GoogleRemarketingConversionRate, 5.0);
        let result = compute_metrics(&inputs);

        // 1000 sessions on each remarketing channel, 40 + 50 purchases
        assert_close(result.channel_sessions.google_remarketing, 1000.0);
        assert_close(result.repeat_purchases, 90.0);
        assert_close(result.repeat_purchase_conversion_rate, 9.0);
    }

    #[test]
    fn default_inputs_repeat_conversion_rate() {
        let result = compute_metrics(&BusinessInputs::default());
        let expected = result.repeat_purchases
            / (result.channel_sessions.meta_remarketing + result.first_purchases)
            * 100.0;

        assert_close(result.repeat_purchase_conversion_rate, expected);
        assert!((result.repeat_purchase_conversion_rate - 8.3842).abs() < 1e-3);
    }

    #[test]
    fn default_inputs_produce_consistent_rollups() {
        let result = compute_metrics(&BusinessInputs::default());

        assert_close(result.total_ads_budget, 10000.0);
        assert_close(result.total_meta_budget, 5000.0);
        assert_close(result.total_google_budget, 5000.0);
        assert_close(
            result.contribution_margin,
            result.marketing_profit + result.fixed_marketing_opex,
        );
        assert_close(
            result.blended_aov * result.total_purchases,
            result.total_revenue,
        );
    }

    #[test]
    fn safe_ratio_guards_non_positive_denominators() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert_eq!(safe_ratio(5.0, -1.0), 0.0);
        assert_eq!(safe_ratio(5.0, 2.0), 2.5);
    }
}
