use super::NOT_APPLICABLE;
use crate::analytics::SessionBreakdown;
use crate::core::Channel;
use crate::formatting::{describe_impact, format_delta, format_number, format_percentage, format_value};
use crate::io::output::{CalcReport, CatalogReport, OutputWriter};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, title: &str, report: &CalcReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", report.metadata.version)?;
        writeln!(
            self.writer,
            "Currency: {} | Estimate: {}",
            report.currency, report.estimate_mode
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        let currency = report.currency;
        let projection = &report.projection;

        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_row(&[
            "Contribution Margin",
            &currency.format(projection.scenario.contribution_margin),
        ])?;
        self.write_row(&["Scenario Cost", &currency.format(projection.scenario_cost)])?;

        let (added, roi) = if projection.has_scenarios() {
            (
                currency.format(projection.contribution_margin_delta),
                format_percentage(projection.roi),
            )
        } else {
            (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string())
        };
        self.write_row(&["Added by Scenarios", &added])?;
        self.write_row(&["Scenario ROI", &roi])?;
        writeln!(self.writer)?;

        if report.active_scenarios.is_empty() {
            writeln!(self.writer, "_No active scenarios._")?;
        } else {
            writeln!(self.writer, "### Active Scenarios")?;
            writeln!(self.writer)?;
            for scenario in &report.active_scenarios {
                writeln!(
                    self.writer,
                    "- **{}** ({}, {})",
                    scenario.name,
                    currency.format(scenario.cost),
                    scenario.level
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_comparison(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        let currency = report.currency;

        writeln!(self.writer, "## Metrics")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Baseline | With Scenarios | Change |")?;
        writeln!(self.writer, "|--------|----------|----------------|--------|")?;
        for delta in &report.deltas {
            let change = format_delta(delta, currency).unwrap_or_default();
            self.write_row(&[
                delta.label,
                &format_value(delta.base, delta.unit, currency),
                &format_value(delta.scenario, delta.unit, currency),
                &change,
            ])?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_channels(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        let base = &report.projection.base.channel_sessions;
        let scenario = &report.projection.scenario.channel_sessions;

        writeln!(self.writer, "## Paid Sessions by Channel")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Channel | Baseline | With Scenarios |")?;
        writeln!(self.writer, "|---------|----------|----------------|")?;
        for channel in Channel::ALL {
            self.write_row(&[
                channel.label(),
                &format_number(base.get(channel)),
                &format_number(scenario.get(channel)),
            ])?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row(&mut self, cells: &[&str]) -> anyhow::Result<()> {
        writeln!(self.writer, "| {} |", cells.join(" | "))?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        self.write_header("Marketing Profitability Report", report)?;
        self.write_summary(report)?;
        self.write_comparison(report)?;
        self.write_channels(report)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_catalog(&mut self, catalog: &CatalogReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Scenarios")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| ID | Name | Cost | Active | Level | Impact |")?;
        writeln!(self.writer, "|----|------|------|--------|-------|--------|")?;
        for scenario in &catalog.scenarios {
            let impacts: Vec<String> = scenario
                .impact
                .iter()
                .map(|(field, impact)| describe_impact(*field, impact, catalog.currency))
                .collect();
            let level = catalog.estimate_mode.effective_for(scenario.estimate_level);
            self.write_row(&[
                &scenario.id,
                &scenario.name,
                &catalog.currency.format(scenario.cost),
                if scenario.active { "yes" } else { "no" },
                level.as_str(),
                &impacts.join("<br>"),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_sessions(&mut self, breakdown: &SessionBreakdown) -> anyhow::Result<()> {
        writeln!(self.writer, "# Sessions by Source")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Source | Sessions |")?;
        writeln!(self.writer, "|--------|----------|")?;
        for (label, sessions) in [
            ("Meta Ads", breakdown.meta),
            ("Google Ads", breakdown.google),
            ("Other", breakdown.other),
            ("Total", breakdown.total()),
        ] {
            self.write_row(&[label, &format_number(sessions as f64)])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
