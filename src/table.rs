//! Loading and column extraction for per-party result tables.

use errors::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Marker the benchmark harness puts in header and separator rows.
const SEPARATOR_MARKER: &'static str = ",,,";

/// One party's timing measurements for a single configuration: an
/// ordered list of rows, each an ordered list of raw string fields.
/// Harness header/separator rows are dropped at load time.
#[derive(Debug)]
pub struct ResultTable {
    source: String,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Reads a table from `rdr`, dropping every line that contains the
    /// separator marker or is shorter than three characters. `source`
    /// labels the table in error messages.
    pub fn from_reader<R: Read>(source: &str, rdr: R) -> Result<ResultTable> {
        let mut rows = Vec::new();
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            if line.contains(SEPARATOR_MARKER) || line.len() < 3 {
                continue;
            }
            rows.push(line.split(',').map(|f| f.to_string()).collect());
        }
        Ok(ResultTable {
            source: source.to_string(),
            rows: rows,
        })
    }

    /// Opens and reads the result file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ResultTable> {
        let file = File::open(path.as_ref())?;
        ResultTable::from_reader(&path.as_ref().to_string_lossy(), file)
    }

    /// True when the table holds no measurement rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of measurement rows (trials).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Extracts the numeric values at `col_idx`, one entry per row and
    /// in row order. A row too short to hold the column contributes
    /// `None`, not zero: the parties log a different number of fields
    /// per phase, so short rows are expected and must stay out of
    /// averages. A present field that fails numeric conversion is an
    /// error naming the source, row and column.
    pub fn column(&self, col_idx: usize) -> Result<Vec<Option<f64>>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| match row.get(col_idx) {
                Some(field) => {
                    field
                        .trim()
                        .parse::<f64>()
                        .map(Some)
                        .chain_err(|| {
                            ErrorKind::Parse(self.source.clone(), row_idx, col_idx)
                        })
                }
                None => Ok(None),
            })
            .collect()
    }
}

/// Averages the present values of `values`, skipping the absent
/// entries. Fails with [`ErrorKind::EmptyInput`] when nothing is left
/// to average.
pub fn average(values: &[Option<f64>]) -> Result<f64> {
    let present = values.iter().filter_map(|v| *v).collect::<Vec<f64>>();
    if present.is_empty() {
        bail!(ErrorKind::EmptyInput);
    }
    Ok(present.iter().sum::<f64>() / present.len() as f64)
}
