//! Output formatting for inspection reports

mod json;
mod text;

use std::io::Write;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::report::Inspection;

pub use json::JsonOutput;
pub use text::TextOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render an inspection report to a writer
    fn render(&self, report: &Inspection, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextOutput),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render an inspection report to stdout
pub fn render_to_stdout(report: &Inspection, format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = std::io::stdout();
    formatter.render(report, &mut stdout)
}
