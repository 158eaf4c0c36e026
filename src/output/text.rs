//! Plain text output

use std::io::Write;

use anyhow::Result;

use crate::report::Inspection;

use super::OutputFormatter;

/// Human-readable report
pub struct TextOutput;

impl OutputFormatter for TextOutput {
    fn render(&self, report: &Inspection, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "{}", report.path.display())?;
        writeln!(writer, "  columns ({}):", report.columns.len())?;
        for (index, column) in report.columns.iter().enumerate() {
            writeln!(writer, "    {:>3}  {}", index, column)?;
        }
        writeln!(writer, "  rows: {}", report.row_count)?;

        match &report.problem {
            None => writeln!(writer, "  status: ok")?,
            Some(problem) => writeln!(writer, "  status: {}", problem.message)?,
        }
        Ok(())
    }
}
