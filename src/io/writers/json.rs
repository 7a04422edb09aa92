use crate::analytics::SessionBreakdown;
use crate::io::output::{CalcReport, CatalogReport, OutputWriter, ReportMetadata};
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SessionsReport<'a> {
    metadata: ReportMetadata,
    #[serde(flatten)]
    breakdown: &'a SessionBreakdown,
    total: u64,
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &CalcReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_catalog(&mut self, catalog: &CatalogReport) -> anyhow::Result<()> {
        self.write_json(catalog)
    }

    fn write_sessions(&mut self, breakdown: &SessionBreakdown) -> anyhow::Result<()> {
        self.write_json(&SessionsReport {
            metadata: ReportMetadata::now(),
            breakdown,
            total: breakdown.total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BusinessInputs, GlobalEstimateLevel};
    use crate::engine::project;
    use crate::formatting::Currency;
    use serde_json::Value;

    #[test]
    fn report_json_carries_metadata_and_metrics() {
        let inputs = BusinessInputs::default();
        let projection = project(&inputs, &[], GlobalEstimateLevel::Realistic);
        let report = CalcReport::new(
            inputs,
            &[],
            GlobalEstimateLevel::Realistic,
            Currency::Eur,
            projection,
        );

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();
        let json: Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(json["metadata"]["tool"], "adprofit");
        assert!(json["metadata"]["generated_at"].is_string());
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["estimate_mode"], "realistic");
        assert_eq!(json["scenario_cost"], 0.0);
        assert_eq!(json["roi"], 0.0);
        assert_eq!(json["deltas"].as_array().unwrap().len(), 17);
        assert_eq!(
            json["base"]["contribution_margin"],
            json["scenario"]["contribution_margin"]
        );
    }

    #[test]
    fn sessions_json_includes_total() {
        let breakdown = SessionBreakdown {
            meta: 5,
            google: 7,
            other: 11,
        };
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_sessions(&breakdown)
            .unwrap();
        let json: Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(json["meta"], 5);
        assert_eq!(json["google"], 7);
        assert_eq!(json["other"], 11);
        assert_eq!(json["total"], 23);
    }
}
