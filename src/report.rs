//! Writer for the consolidated report.

use BenchConfig;
use DerivedMetrics;
use csv;
use errors::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// The consolidated report, held open for the whole run and flushed
/// once at the end.
///
/// The report mixes 12-field data rows with blank separator rows; the
/// separators are positional (one after each network-model block), so
/// callers must write rows in configuration order.
pub struct Report<W: Write> {
    writer: csv::Writer<W>,
}

impl Report<File> {
    /// Creates the report file at `path`, truncating any previous run,
    /// and writes the header rows.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Report<File>> {
        let file = File::create(path)?;
        Report::from_writer(file)
    }
}

impl<W: Write> Report<W> {
    /// Wraps an open writer and writes the header rows.
    pub fn from_writer(wtr: W) -> Result<Report<W>> {
        // Rows vary in field count (header and data rows have twelve
        // fields, separators one), so the writer must be flexible.
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(wtr);
        let mut report = Report { writer: writer };
        report.write_header()?;
        Ok(report)
    }

    // Two header rows (column-group labels, then column labels)
    // followed by one blank row. The odd spacing in the second row is
    // part of the established report format.
    fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(&[
            "", "", "", "", "Online time", "", "", "", "", "Offline time", "", "",
        ])?;
        self.writer.write_record(&[
            "Network model",
            "Threat model",
            " Distance function",
            "",
            "GCE",
            "OT",
            "Other",
            "Total",
            "",
            "Garble",
            "Send",
            "Total",
        ])?;
        self.write_blank_row()
    }

    /// Appends one configuration's row: the three identity labels, the
    /// online metric group, then the offline group, with a blank
    /// spacer field before each group.
    pub fn write_row(&mut self, config: &BenchConfig, metrics: &DerivedMetrics) -> Result<()> {
        self.writer.serialize((
            config.net_model.label(),
            config.threat_model.code(),
            config.dist_func.code(),
            "",
            metrics.eval_time,
            metrics.ot_time,
            metrics.online_other,
            metrics.online_total,
            "",
            metrics.garble_time,
            metrics.gtable_send_time,
            metrics.offline_total,
        ))?;
        Ok(())
    }

    /// Writes a blank separator row.
    pub fn write_blank_row(&mut self) -> Result<()> {
        // A zero-field record comes out as a bare line terminator. A
        // single empty field would be quoted to `""`, which is not a
        // blank line.
        self.writer.write_record(None::<&[u8]>)?;
        Ok(())
    }

    /// Flushes buffered rows to the underlying writer.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer.into_inner().map_err(|e| {
            // the explicit flush above leaves nothing buffered, so
            // this is not expected to fire; keep the I/O kind if it
            // does
            Error::from(::std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use {DistFunc, NetModel, ThreatModel};

    fn report_text<F>(write: F) -> String
    where
        F: FnOnce(&mut Report<Vec<u8>>),
    {
        let mut report = Report::from_writer(Vec::new()).unwrap();
        write(&mut report);
        String::from_utf8(report.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn header_matches_established_format() {
        let text = report_text(|_| {});
        assert_eq!(
            text,
            ",,,,Online time,,,,,Offline time,,\n\
             Network model,Threat model, Distance function,,GCE,OT,Other,Total,,Garble,Send,Total\n\
             \n"
        );
    }

    #[test]
    fn data_row_groups_online_before_offline() {
        let config = BenchConfig::new(
            NetModel::Local,
            ThreatModel::SemiHonest,
            DistFunc::CosineSimilarity,
        );
        let metrics = DerivedMetrics {
            garble_time: 0.02,
            gtable_send_time: 0.04,
            offline_total: 0.1,
            eval_time: 0.3,
            ot_time: 0.05,
            online_other: 0.15,
            online_total: 0.5,
        };
        let text = report_text(|report| {
            report.write_row(&config, &metrics).unwrap();
        });
        let row = text.lines().nth(3).unwrap();
        assert_eq!(row, "local,sh,cs,,0.3,0.05,0.15,0.5,,0.02,0.04,0.1");
    }

    #[test]
    fn blank_row_is_an_empty_line() {
        let header_only = report_text(|_| {});
        let text = report_text(|report| {
            report.write_blank_row().unwrap();
        });
        assert_eq!(text, format!("{}\n", header_only));
        // a blank row must be truly empty, not a quoted empty field
        assert!(!text.contains('"'));
    }
}
