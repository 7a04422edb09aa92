pub mod output;
pub mod writers;

pub use output::{
    create_writer, ActiveScenario, CalcReport, CatalogReport, OutputFormat, OutputWriter,
    ReportMetadata,
};

use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Stdout, or a freshly created file when `output` is given.
pub fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => Ok(Box::new(std::io::BufWriter::new(fs::File::create(path)?))),
        None => Ok(Box::new(std::io::stdout())),
    }
}
