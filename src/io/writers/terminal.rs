use super::NOT_APPLICABLE;
use crate::analytics::SessionBreakdown;
use crate::core::Channel;
use crate::engine::MetricDelta;
use crate::formatting::{
    describe_impact, format_delta, format_number, format_percentage, format_value, paint_delta,
    ColoredFormatter, Currency, FormattingConfig, OutputFormatter, PlainFormatter,
};
use crate::io::output::{CalcReport, CatalogReport, OutputWriter};
use comfy_table::presets::{ASCII_FULL_CONDENSED, UTF8_FULL_CONDENSED};
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
    config: FormattingConfig,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        let formatter: Box<dyn OutputFormatter> = if config.color.should_use_color() {
            Box::new(ColoredFormatter::new(config))
        } else {
            Box::new(PlainFormatter)
        };
        Self {
            writer,
            config,
            formatter,
        }
    }

    fn new_table(&self, header: &[&str]) -> Table {
        let mut table = Table::new();
        if self.config.emoji.should_use_emoji() {
            table.load_preset(UTF8_FULL_CONDENSED);
        } else {
            table.load_preset(ASCII_FULL_CONDENSED);
        }
        if self.config.color.should_use_color() {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header.to_vec());
        table
    }

    fn print_header(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        let icon = self.formatter.emoji("📈", "[UP]");
        writeln!(
            self.writer,
            "{} {}",
            icon,
            self.formatter.header("Marketing Profitability")
        )?;
        writeln!(
            self.writer,
            "{}",
            self.formatter.dim(&format!(
                "Currency: {} | Estimate: {}",
                report.currency, report.estimate_mode
            ))
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_active_scenarios(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        if report.active_scenarios.is_empty() {
            writeln!(
                self.writer,
                "{}",
                self.formatter
                    .info("No active scenarios. Showing baseline only.")
            )?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "{}", self.formatter.bold("Active scenarios:"))?;
        for scenario in &report.active_scenarios {
            writeln!(
                self.writer,
                "  - {} ({}, {})",
                scenario.name,
                report.currency.format(scenario.cost),
                scenario.level
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_comparison(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        let currency = report.currency;
        let mut table = self.new_table(&["Metric", "Baseline", "With Scenarios", "Change"]);
        for delta in &report.deltas {
            table.add_row(vec![
                Cell::new(delta.label),
                Cell::new(format_value(delta.base, delta.unit, currency))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format_value(delta.scenario, delta.unit, currency))
                    .set_alignment(CellAlignment::Right),
                delta_cell(delta, currency),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_channels(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        let base = &report.projection.base.channel_sessions;
        let scenario = &report.projection.scenario.channel_sessions;

        let mut table = self.new_table(&["Channel", "Sessions", "With Scenarios"]);
        for channel in Channel::ALL {
            table.add_row(vec![
                Cell::new(channel.label()),
                Cell::new(format_number(base.get(channel))).set_alignment(CellAlignment::Right),
                Cell::new(format_number(scenario.get(channel)))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_bottom_line(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        let currency = report.currency;
        let projection = &report.projection;
        let margin = report
            .deltas
            .iter()
            .find(|d| d.key == "contribution_margin");

        let change = margin
            .map(|d| paint_delta(d, currency, self.formatter.as_ref()))
            .unwrap_or_default();
        writeln!(
            self.writer,
            "{} {} {}",
            self.formatter.bold("Contribution Margin:"),
            currency.format(projection.scenario.contribution_margin),
            change
        )?;

        let roi = if projection.has_scenarios() {
            let text = format_percentage(projection.roi);
            if projection.roi > 0.0 {
                self.formatter.success(&text)
            } else {
                self.formatter.error(&text)
            }
        } else {
            NOT_APPLICABLE.to_string()
        };
        writeln!(
            self.writer,
            "Scenario cost: {}   ROI: {}",
            currency.format(projection.scenario_cost),
            roi
        )?;
        Ok(())
    }
}

// Green for improvements, red for regressions, blank when negligible
fn delta_cell(delta: &MetricDelta, currency: Currency) -> Cell {
    let cell = match format_delta(delta, currency) {
        Some(text) => {
            let color = if delta.is_improvement() {
                Color::Green
            } else {
                Color::Red
            };
            Cell::new(text).fg(color)
        }
        None => Cell::new(""),
    };
    cell.set_alignment(CellAlignment::Right)
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        self.print_header(report)?;
        self.print_active_scenarios(report)?;
        self.print_comparison(report)?;
        self.print_channels(report)?;
        self.print_bottom_line(report)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_catalog(&mut self, catalog: &CatalogReport) -> anyhow::Result<()> {
        let mut table = self.new_table(&["ID", "Name", "Cost", "Active", "Level", "Impact"]);
        for scenario in &catalog.scenarios {
            let impacts: Vec<String> = scenario
                .impact
                .iter()
                .map(|(field, impact)| describe_impact(*field, impact, catalog.currency))
                .collect();
            let active = if scenario.active {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no")
            };
            table.add_row(vec![
                Cell::new(&scenario.id),
                Cell::new(&scenario.name),
                Cell::new(catalog.currency.format(scenario.cost))
                    .set_alignment(CellAlignment::Right),
                active,
                Cell::new(catalog.estimate_mode.effective_for(scenario.estimate_level)),
                Cell::new(impacts.join("\n")),
            ]);
        }

        writeln!(self.writer, "{}", self.formatter.header("Scenarios"))?;
        writeln!(self.writer, "{table}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_sessions(&mut self, breakdown: &SessionBreakdown) -> anyhow::Result<()> {
        let mut table = self.new_table(&["Source", "Sessions"]);
        for (label, sessions) in [
            ("Meta Ads", breakdown.meta),
            ("Google Ads", breakdown.google),
            ("Other", breakdown.other),
            ("Total", breakdown.total()),
        ] {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(format_number(sessions as f64)).set_alignment(CellAlignment::Right),
            ]);
        }

        writeln!(self.writer, "{}", self.formatter.header("Sessions by Source"))?;
        writeln!(self.writer, "{table}")?;
        self.writer.flush()?;
        Ok(())
    }
}
