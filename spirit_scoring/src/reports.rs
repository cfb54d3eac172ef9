use log::debug;

use crate::cells::to_numbers;
use crate::columns::{ColumnIndexes, ResolvedColumns, Table};
use crate::config::*;

/// One row of the sheet: a team reporting on a match against an opponent.
///
/// Score cells are kept as they were entered.
#[derive(PartialEq, Debug, Clone)]
pub struct MatchReport {
    pub reporting_team: Option<String>,
    pub opponent_team: Option<String>,
    pub day: Option<String>,
    /// The scores the reporting team gives to the opponent.
    pub opponent_score_fields: Vec<CellValue>,
    /// The scores the reporting team gives itself.
    pub self_score_fields: Vec<CellValue>,
}

/// A report whose score cells have been converted to numbers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoredReport {
    pub reporting_team: Option<String>,
    pub opponent_team: Option<String>,
    pub day: Option<String>,
    pub opponent_scores: Vec<i64>,
    pub self_scores: Vec<i64>,
}

impl ScoredReport {
    /// The score received by the opponent in this report.
    pub fn score_total(&self) -> i64 {
        saturating_sum(&self.opponent_scores)
    }

    pub fn self_score_total(&self) -> i64 {
        saturating_sum(&self.self_scores)
    }

    pub fn score_line(&self) -> ScoreLine {
        ScoreLine {
            scores: self.opponent_scores.clone(),
            total: self.score_total(),
        }
    }

    pub fn self_score_line(&self) -> ScoreLine {
        ScoreLine {
            scores: self.self_scores.clone(),
            total: self.self_score_total(),
        }
    }
}

// Free-text cells can hold any number, the totals stay at the bounds.
fn saturating_sum(scores: &[i64]) -> i64 {
    scores.iter().fold(0, |acc, x| acc.saturating_add(*x))
}

fn cell(row: &[CellValue], idx: usize) -> CellValue {
    row.get(idx).cloned().unwrap_or_default()
}

fn cells(row: &[CellValue], idxs: &[usize]) -> Vec<CellValue> {
    idxs.iter().map(|idx| cell(row, *idx)).collect()
}

/// Reads the reports out of the table. Rows without any content are skipped.
pub fn extract_reports(
    table: &Table,
    columns: &ResolvedColumns,
) -> Result<Vec<MatchReport>, ScoringErrors> {
    let idxs: ColumnIndexes = columns.indexes(table.header())?;
    let mut res: Vec<MatchReport> = Vec::new();
    for (lineno, row) in table.rows().iter().enumerate() {
        if row.iter().all(|c| c.is_empty()) {
            debug!("extract_reports: skipping empty row {}", lineno);
            continue;
        }
        res.push(MatchReport {
            reporting_team: cell(row, idxs.team).as_key(),
            opponent_team: cell(row, idxs.opponent).as_key(),
            day: cell(row, idxs.day).as_key(),
            opponent_score_fields: cells(row, &idxs.opponent_scores),
            self_score_fields: cells(row, &idxs.team_scores),
        });
    }
    debug!("extract_reports: {} reports", res.len());
    Ok(res)
}

/// Converts every score cell of both groups into a number.
pub fn normalize_reports(reports: &[MatchReport]) -> Vec<ScoredReport> {
    reports
        .iter()
        .map(|r| ScoredReport {
            reporting_team: r.reporting_team.clone(),
            opponent_team: r.opponent_team.clone(),
            day: r.day.clone(),
            opponent_scores: to_numbers(&r.opponent_score_fields),
            self_scores: to_numbers(&r.self_score_fields),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::resolve_columns;

    fn small_table() -> Table {
        let header: Vec<String> = ["Who", "Against", "When", "s1", "s2", "o1", "o2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows: Vec<Vec<CellValue>> = vec![
            vec![
                "A".into(),
                "B".into(),
                CellValue::Float(1.0),
                CellValue::Int(2),
                "3 fine".into(),
                "4 - great".into(),
                CellValue::Empty,
            ],
            vec![CellValue::Empty, "".into()],
            // Short row
            vec!["B".into(), "A".into()],
        ];
        Table::new(header, rows)
    }

    fn small_columns(table: &Table) -> ResolvedColumns {
        let mut columns = resolve_columns(table.header(), &ColumnMapping::default()).unwrap();
        columns.team = "Who".to_string();
        columns.opponent = "Against".to_string();
        columns.day = "When".to_string();
        columns.team_scores = vec!["s1".to_string(), "s2".to_string()];
        columns.opponent_scores = vec!["o1".to_string(), "o2".to_string()];
        columns
    }

    #[test]
    fn extract_and_normalize() {
        let table = small_table();
        let reports = extract_reports(&table, &small_columns(&table)).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].day, Some("1".to_string()));
        assert_eq!(reports[1].day, None);

        let scored = normalize_reports(&reports);
        assert_eq!(scored[0].self_scores, vec![2, 3]);
        assert_eq!(scored[0].opponent_scores, vec![4, 0]);
        assert_eq!(scored[0].score_total(), 4);
        assert_eq!(scored[0].self_score_total(), 5);
        assert_eq!(scored[1].score_total(), 0);
    }

    #[test]
    fn huge_scores_do_not_overflow() {
        let report = ScoredReport {
            reporting_team: Some("A".to_string()),
            opponent_team: Some("B".to_string()),
            day: None,
            opponent_scores: vec![i64::MAX / 2 + 1, i64::MAX / 2 + 1, 1],
            self_scores: vec![i64::MIN, -1],
        };
        assert_eq!(report.score_total(), i64::MAX);
        assert_eq!(report.score_line().total, i64::MAX);
        assert_eq!(report.self_score_total(), i64::MIN);
    }

    #[test]
    fn missing_columns_are_an_error() {
        let table = small_table();
        let columns = resolve_columns(table.header(), &ColumnMapping::default()).unwrap();
        let err = extract_reports(&table, &columns).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
