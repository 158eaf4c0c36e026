//! JSON output format

use std::io::Write;

use anyhow::Result;

use crate::report::Inspection;

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, report: &Inspection, writer: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, report)?;
        } else {
            serde_json::to_writer(&mut *writer, report)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
