use crate::application::summary::SpendSummary;
use crate::error::Result;
use std::io::Write;

/// Writes a spend summary as `"{method} {amount}"` lines.
///
/// Uses a headerless, space-delimited `csv::Writer`; amounts always carry 2 decimals.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_summary(&mut self, summary: &SpendSummary) -> Result<()> {
        for (method, total) in summary.lines() {
            self.writer
                .write_record([method.as_str(), total.to_string().as_str()])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
