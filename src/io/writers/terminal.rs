use crate::core::ScanReport;
use crate::io::output::OutputWriter;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {}",
            "Benchmark scan:".bold().cyan(),
            report.base_path.display()
        )?;
        writeln!(
            self.writer,
            "  {} classified, {} skipped",
            report.entries.len(),
            report.skipped.len()
        )?;
        writeln!(self.writer)?;

        let count = report.non_basic_count();
        if count == 0 {
            writeln!(self.writer, "{}", "No non-basic types found.".green())?;
        } else {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["Folder", "Signature", "Non-basic types"]);
            for entry in report.non_basic_entries() {
                table.add_row(vec![
                    entry.id.to_string(),
                    entry.clean_signature(),
                    entry.joined_types(),
                ]);
            }
            writeln!(self.writer, "{table}")?;
            writeln!(
                self.writer,
                "{}",
                format!("{count} benchmark(s) with non-basic types").yellow()
            )?;
        }

        for skipped in &report.skipped {
            writeln!(
                self.writer,
                "{} folder {}: {}",
                "skipped".dimmed(),
                skipped.id,
                skipped.reason
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
