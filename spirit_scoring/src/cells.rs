use crate::config::CellValue;

/// Converts a score cell into a number.
///
/// Free-text answers such as `"4 - great game"` count for their leading
/// number. Anything that cannot be read as a number counts as 0: an
/// approximate ranking is preferred over rejecting the whole sheet for a
/// badly filled cell.
pub fn to_number(cell: &CellValue) -> i64 {
    match cell {
        CellValue::Int(i) => *i,
        CellValue::Float(f) if f.is_finite() => *f as i64,
        CellValue::Float(_) => 0,
        CellValue::Text(s) => s
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<i64>().ok())
            .unwrap_or(0),
        CellValue::Empty => 0,
    }
}

/// Converts a group of score cells, keeping their order.
pub fn to_numbers(cells: &[CellValue]) -> Vec<i64> {
    cells.iter().map(to_number).collect()
}
