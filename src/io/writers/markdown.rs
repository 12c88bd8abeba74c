use crate::core::{FolderEntry, ScanReport};
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        let writers: Vec<fn(&mut Self, &ScanReport) -> anyhow::Result<()>> = vec![
            |w, r| w.write_header(r),
            |w, r| w.write_table(r),
            |w, r| w.write_total(r),
        ];

        writers.iter().try_for_each(|writer| writer(self, report))?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Go Benchmark Custom Type Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Scanned `{}` at {}",
            report.base_path.display(),
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_table(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        writeln!(self.writer, "| Folder | Signature | Non-basic types |")?;
        writeln!(self.writer, "|--------|-----------|-----------------|")?;
        for entry in report.non_basic_entries() {
            self.write_row(entry)?;
        }
        Ok(())
    }

    fn write_row(&mut self, entry: &FolderEntry) -> anyhow::Result<()> {
        let signature = entry.clean_signature();
        let signature = if signature.is_empty() {
            "-".to_string()
        } else {
            format!("`{}`", escape_cell(&signature))
        };
        writeln!(
            self.writer,
            "| {} | {} | {} |",
            entry.id,
            signature,
            escape_cell(&entry.joined_types())
        )?;
        Ok(())
    }

    fn write_total(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Found {} benchmark(s) with non-basic types.",
            report.non_basic_count()
        )?;
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
