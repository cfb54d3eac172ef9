// Primitives for reading Excel files.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use snafu::prelude::*;

use crate::sotg::*;

fn read_header_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        _ => "".to_string(),
    }
}

fn read_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Int(i) => CellValue::Int(*i),
        DataType::Float(f) => CellValue::Float(*f),
        // Dates are kept as their serial number, which is enough to group by day.
        DataType::DateTime(f) => CellValue::Float(*f),
        DataType::String(s) if s.trim().is_empty() => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        DataType::Empty => CellValue::Empty,
        _ => {
            debug!("read_cell: could not understand cell {:?}", cell);
            CellValue::Empty
        }
    }
}

/// Reads an Excel export, from the given worksheet or from the first one.
/// The first row is the header.
pub fn read_excel_table(path: &str, worksheet_name: Option<&str>) -> SotgResult<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?,
    };

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu {})?
        .iter()
        .map(read_header_cell)
        .collect();
    debug!("read_excel_table: header: {:?}", header);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let cells: Vec<CellValue> = row.iter().map(read_cell).collect();
        debug!("read_excel_table: idx: {:?} row: {:?}", idx, &cells);
        rows.push(cells);
    }
    Ok(Table::new(header, rows))
}
