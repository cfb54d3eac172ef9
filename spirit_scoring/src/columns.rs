use log::debug;

use std::collections::{HashMap, HashSet};

use crate::config::*;

pub const TEAM_COLUMN: &str = "Your Team";
pub const OPPONENT_COLUMN: &str = "Opponent Team";
pub const DAY_COLUMN: &str = "Day";

/// The scores given to the opponent, in rubric order.
pub const OPPONENT_SCORE_COLUMNS: [&str; SCORE_CATEGORIES] = [
    "Rules Knowledge & Use",
    "Fouls and Body Contact",
    "Fair Mindedness",
    "Positive Attitude and Self-Control",
    "Communication",
];

/// The scores a team gives itself. The form asks the same questions twice,
/// so these are the de-duplicated names of the second set.
pub const TEAM_SCORE_COLUMNS: [&str; SCORE_CATEGORIES] = [
    "Rules Knowledge & Use.1",
    "Fouls and Body Contact.1",
    "Fair Mindedness.1",
    "Positive Attitude and Self-Control.1",
    "Communication.1",
];

/// A spreadsheet: a header and rows of cells.
///
/// Header names are unique. Repeated names get a numbered suffix on
/// construction: the second `Communication` becomes `Communication.1`.
#[derive(PartialEq, Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Table {
        Table {
            header: dedup_header(&header),
            rows,
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

fn dedup_header(header: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut res: Vec<String> = Vec::with_capacity(header.len());
    for name in header.iter() {
        let mut candidate = name.clone();
        while seen.contains(&candidate) {
            let count = counts.entry(name.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{}.{}", name, count);
        }
        seen.insert(candidate.clone());
        res.push(candidate);
    }
    res
}

/// The concrete column names for every role, once resolved against a header.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolvedColumns {
    pub team: String,
    pub opponent: String,
    pub day: String,
    pub team_scores: Vec<String>,
    pub opponent_scores: Vec<String>,
}

impl ResolvedColumns {
    /// All the required columns with their role, in a stable order.
    pub fn required(&self) -> Vec<(ColumnRole, &str)> {
        let mut res: Vec<(ColumnRole, &str)> = vec![
            (ColumnRole::Team, self.team.as_str()),
            (ColumnRole::Opponent, self.opponent.as_str()),
            (ColumnRole::Day, self.day.as_str()),
        ];
        for (idx, name) in self.team_scores.iter().enumerate() {
            res.push((ColumnRole::TeamScore(idx), name.as_str()));
        }
        for (idx, name) in self.opponent_scores.iter().enumerate() {
            res.push((ColumnRole::OpponentScore(idx), name.as_str()));
        }
        res
    }

    /// The required columns that are not in the header.
    pub fn missing(&self, header: &[String]) -> Vec<String> {
        let present: HashSet<&str> = header.iter().map(|s| s.as_str()).collect();
        let mut res: Vec<String> = Vec::new();
        for (_, name) in self.required() {
            if !present.contains(name) && !res.iter().any(|n| n == name) {
                res.push(name.to_string());
            }
        }
        res
    }

    /// The position of every required column in the header.
    pub(crate) fn indexes(&self, header: &[String]) -> Result<ColumnIndexes, ScoringErrors> {
        let missing = self.missing(header);
        if !missing.is_empty() {
            return Err(ScoringErrors::MissingColumns { columns: missing });
        }
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();
        // All the names are present at this point.
        let find = |name: &String| positions.get(name.as_str()).cloned().unwrap_or_default();
        Ok(ColumnIndexes {
            team: find(&self.team),
            opponent: find(&self.opponent),
            day: find(&self.day),
            team_scores: self.team_scores.iter().map(find).collect(),
            opponent_scores: self.opponent_scores.iter().map(find).collect(),
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct ColumnIndexes {
    pub team: usize,
    pub opponent: usize,
    pub day: usize,
    pub team_scores: Vec<usize>,
    pub opponent_scores: Vec<usize>,
}

fn resolve_one(
    header: &[String],
    column: &ColumnRef,
    role: ColumnRole,
    default_name: &str,
) -> Result<String, ScoringErrors> {
    match column {
        ColumnRef::Unset => Ok(default_name.to_string()),
        ColumnRef::ByName(name) => Ok(name.clone()),
        ColumnRef::ByIndex(index) => {
            header
                .get(*index)
                .cloned()
                .ok_or(ScoringErrors::ColumnOutOfRange {
                    role,
                    index: *index,
                    num_columns: header.len(),
                })
        }
    }
}

/// Resolves every role of the mapping against the header.
///
/// Unset roles fall back to their default name. The only failure is a
/// position beyond the end of the header; a name that is not in the header
/// is reported by [missing_columns] instead.
pub fn resolve_columns(
    header: &[String],
    mapping: &ColumnMapping,
) -> Result<ResolvedColumns, ScoringErrors> {
    let mut team_scores: Vec<String> = Vec::with_capacity(SCORE_CATEGORIES);
    for (idx, column) in mapping.team_scores.iter().enumerate() {
        team_scores.push(resolve_one(
            header,
            column,
            ColumnRole::TeamScore(idx),
            TEAM_SCORE_COLUMNS[idx],
        )?);
    }
    let mut opponent_scores: Vec<String> = Vec::with_capacity(SCORE_CATEGORIES);
    for (idx, column) in mapping.opponent_scores.iter().enumerate() {
        opponent_scores.push(resolve_one(
            header,
            column,
            ColumnRole::OpponentScore(idx),
            OPPONENT_SCORE_COLUMNS[idx],
        )?);
    }
    let res = ResolvedColumns {
        team: resolve_one(header, &mapping.team, ColumnRole::Team, TEAM_COLUMN)?,
        opponent: resolve_one(
            header,
            &mapping.opponent,
            ColumnRole::Opponent,
            OPPONENT_COLUMN,
        )?,
        day: resolve_one(header, &mapping.day, ColumnRole::Day, DAY_COLUMN)?,
        team_scores,
        opponent_scores,
    };
    debug!("resolve_columns: {:?}", res);
    Ok(res)
}

/// The required columns that the header lacks, for the given mapping.
///
/// An empty result means that the sheet can be scored as is. Otherwise the
/// caller should ask for the columns to be selected by hand.
pub fn missing_columns(
    header: &[String],
    mapping: &ColumnMapping,
) -> Result<Vec<String>, ScoringErrors> {
    let resolved = resolve_columns(header, mapping)?;
    Ok(resolved.missing(header))
}
