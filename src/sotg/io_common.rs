use std::path::Path;

use spirit_scoring::CellValue;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The input type, guessed from the extension. CSV is the default.
pub fn provider_from_extension(path: &str) -> String {
    match Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("xlsx") | Some("xlsm") => "xlsx".to_string(),
        _ => "csv".to_string(),
    }
}

// "007" is a name, not the number 7.
fn has_leading_zero(s: &str) -> bool {
    let digits = s.trim_start_matches(|c| c == '-' || c == '+');
    digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.")
}

/// Types a cell read as text: whole numbers, then decimals, then text.
///
/// Only plain finite numbers are typed: `inf`, `NaN` and numbers with
/// leading zeros stay text, so that team names keep their spelling.
pub fn read_text_cell(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if !has_leading_zero(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return CellValue::Float(f);
            }
        }
    }
    CellValue::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_types() {
        assert_eq!(read_text_cell(""), CellValue::Empty);
        assert_eq!(read_text_cell(" 4 "), CellValue::Int(4));
        assert_eq!(read_text_cell("2.5"), CellValue::Float(2.5));
        assert_eq!(
            read_text_cell("4 - fair"),
            CellValue::Text("4 - fair".to_string())
        );
    }

    #[test]
    fn names_that_look_like_numbers() {
        assert_eq!(read_text_cell("Infinity"), CellValue::Text("Infinity".to_string()));
        assert_eq!(read_text_cell("inf"), CellValue::Text("inf".to_string()));
        assert_eq!(read_text_cell("NaN"), CellValue::Text("NaN".to_string()));
        assert_eq!(read_text_cell("007"), CellValue::Text("007".to_string()));
        assert_eq!(read_text_cell("0"), CellValue::Int(0));
        assert_eq!(read_text_cell("0.5"), CellValue::Float(0.5));
        assert_eq!(read_text_cell("-3"), CellValue::Int(-3));
        assert_eq!(read_text_cell("2.0").as_key(), Some("2".to_string()));
    }

    #[test]
    fn providers() {
        assert_eq!(provider_from_extension("a/b/scores.XLSX"), "xlsx");
        assert_eq!(provider_from_extension("scores.csv"), "csv");
        assert_eq!(provider_from_extension("export"), "csv");
        assert_eq!(simplify_file_name("a/b/scores.csv"), "scores.csv");
    }
}
