use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::app::ports::MemberSourcePort;
use crate::error::Result;
use crate::types::RawTable;

/// Reads membership exports from CSV files on disk
pub struct CsvMemberSource;

impl MemberSourcePort for CsvMemberSource {
    fn read_table(&self, path: &Path) -> Result<RawTable> {
        read_csv(path)
    }
}

/// Open the CSV at `path` and collect its header and rows.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    let table = read_csv_from(file)?;
    debug!("Read {} rows from {}", table.rows.len(), path.display());
    Ok(table)
}

/// Same as [`read_csv`] for any reader. Rows may be ragged; the mapper reports short rows.
pub fn read_csv_from<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}
