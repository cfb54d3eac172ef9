// Primitives for reading CSV files.

use snafu::prelude::*;

use crate::sotg::{io_common::read_text_cell, *};

/// Reads a CSV export. The first record is the header.
pub fn read_csv_table(path: &str) -> SotgResult<Table> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    let mut records = rdr.into_records();

    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu { lineno: 1usize })?
            .iter()
            .map(|s| s.to_string())
            .collect(),
        None => whatever!("The file {} is empty", path),
    };
    debug!("read_csv_table: header: {:?}", header);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is on line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let row: Vec<CellValue> = line.iter().map(read_text_cell).collect();
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, &row);
        rows.push(row);
    }
    Ok(Table::new(header, rows))
}
