use crate::columns::*;
use crate::config::*;

/// A builder for sheets in the standard spirit score form layout.
///
/// This is convenient when the reports do not come from a spreadsheet.
///
/// ```
/// use spirit_scoring::builder::Builder;
/// use spirit_scoring::{missing_columns, ColumnMapping};
///
/// let mut builder = Builder::new();
/// builder.add_report("Alpha", "Beta", "Saturday", &[2, 2, 3, 2, 2], &[3, 3, 3, 3, 3]);
///
/// let table = builder.table();
/// assert!(missing_columns(table.header(), &ColumnMapping::default())
///     .unwrap()
///     .is_empty());
/// ```
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Builder {
    rows: Vec<Vec<CellValue>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { rows: Vec::new() }
    }

    /// The header of the standard form, before de-duplication.
    pub fn header() -> Vec<String> {
        let mut header: Vec<String> = vec![
            TEAM_COLUMN.to_string(),
            OPPONENT_COLUMN.to_string(),
            DAY_COLUMN.to_string(),
        ];
        header.extend(OPPONENT_SCORE_COLUMNS.iter().map(|s| s.to_string()));
        // The self assessment repeats the same questions.
        header.extend(OPPONENT_SCORE_COLUMNS.iter().map(|s| s.to_string()));
        header
    }

    /// Adds the report of `team` on its match against `opponent`.
    ///
    /// `opponent_scores` are the scores given to the opponent, `self_scores`
    /// the scores the team gives itself.
    pub fn add_report(
        &mut self,
        team: &str,
        opponent: &str,
        day: &str,
        opponent_scores: &[i64],
        self_scores: &[i64],
    ) {
        let to_cells = |scores: &[i64]| -> Vec<CellValue> {
            scores.iter().map(|s| CellValue::Int(*s)).collect()
        };
        self.add_report_cells(
            team,
            opponent,
            day,
            &to_cells(opponent_scores),
            &to_cells(self_scores),
        )
    }

    /// Adds a report with the score cells as they were entered.
    ///
    /// Missing categories are left empty and extra ones are ignored.
    pub fn add_report_cells(
        &mut self,
        team: &str,
        opponent: &str,
        day: &str,
        opponent_scores: &[CellValue],
        self_scores: &[CellValue],
    ) {
        let mut row: Vec<CellValue> = vec![team.into(), opponent.into(), day.into()];
        for scores in [opponent_scores, self_scores] {
            for idx in 0..SCORE_CATEGORIES {
                row.push(scores.get(idx).cloned().unwrap_or_default());
            }
        }
        self.rows.push(row);
    }

    pub fn table(&self) -> Table {
        Table::new(Builder::header(), self.rows.clone())
    }
}
