// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The number of rubric categories in a spirit score sheet.
pub const SCORE_CATEGORIES: usize = 5;

/// The content of one spreadsheet cell, as delivered by the readers.
#[derive(PartialEq, Debug, Clone, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// The cell as a grouping key (team names, days).
    ///
    /// Empty and blank cells have no key. Whole floats are written without
    /// their decimal part so that a day stored as `2.0` matches a day
    /// stored as `2`.
    pub fn as_key(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) if f.is_nan() => None,
            CellValue::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_key().is_none()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> CellValue {
        CellValue::Int(i)
    }
}

/// A reference to a physical column, as configured by the user.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub enum ColumnRef {
    /// Not configured: the documented default name of the role is used.
    #[default]
    Unset,
    ByName(String),
    /// 0-based position in the header.
    ByIndex(usize),
}

impl ColumnRef {
    /// Reads a configured value: digits are a position, an empty value is
    /// unset, anything else is a column name.
    pub fn parse(s: &str) -> ColumnRef {
        let s = s.trim();
        if s.is_empty() {
            ColumnRef::Unset
        } else if let Ok(idx) = s.parse::<usize>() {
            ColumnRef::ByIndex(idx)
        } else {
            ColumnRef::ByName(s.to_string())
        }
    }
}

/// The logical columns of a spirit score sheet.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ColumnRole {
    Team,
    Opponent,
    Day,
    /// One of the categories a team gives itself.
    TeamScore(usize),
    /// One of the categories a team gives to its opponent.
    OpponentScore(usize),
}

impl Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Team => write!(f, "team"),
            ColumnRole::Opponent => write!(f, "opponent"),
            ColumnRole::Day => write!(f, "day"),
            ColumnRole::TeamScore(idx) => write!(f, "team-score-columns[{}]", idx),
            ColumnRole::OpponentScore(idx) => write!(f, "opponent-score-columns[{}]", idx),
        }
    }
}

/// The user-supplied mapping between logical roles and physical columns.
///
/// Every role has a default name, so the empty mapping is valid for sheets
/// exported straight from the standard spirit score form.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ColumnMapping {
    pub team: ColumnRef,
    pub opponent: ColumnRef,
    pub day: ColumnRef,
    pub team_scores: [ColumnRef; SCORE_CATEGORIES],
    pub opponent_scores: [ColumnRef; SCORE_CATEGORIES],
}

/// Options that govern the detailed score views.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ScoringOptions {
    /// When set, detail views include the matches reported by only one
    /// side. Otherwise only fully reciprocated matches are shown.
    pub show_rankings: bool,
}

impl ScoringOptions {
    pub const DEFAULT_OPTIONS: ScoringOptions = ScoringOptions {
        show_rankings: false,
    };
}

// ******** Output data structures *********

/// One line of the standings.
///
/// Averages are `None` when the team has no match to average over: a team
/// that reported on others but was never scored has no received average.
#[derive(PartialEq, Debug, Clone)]
pub struct RankingEntry {
    pub team: String,
    /// Shared by teams with exactly the same received average. `None` when
    /// the received average is undefined.
    pub rank: Option<u32>,
    pub score_matches: u32,
    pub self_score_matches: u32,
    pub total_score_received: i64,
    pub total_self_score: i64,
    pub average_score_received: Option<f64>,
    pub average_self_score: Option<f64>,
    /// Received average minus self average.
    pub score_difference: Option<f64>,
}

/// The identity of one match as seen from a given team.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct MatchKey {
    pub partner: Option<String>,
    pub day: Option<String>,
}

/// The scores of one side of a report, with their total.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreLine {
    pub scores: Vec<i64>,
    pub total: i64,
}

/// One match in a detail view.
///
/// In the received view, `given` holds the scores the partner gave to the
/// team and `self_assessment` the team's own view of itself in that match.
/// In the awarded view, `given` holds the scores the team gave to the
/// partner and `self_assessment` the partner's view of itself.
/// A side is `None` when that report is missing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DetailedScoreRow {
    pub key: MatchKey,
    pub given: Option<ScoreLine>,
    pub self_assessment: Option<ScoreLine>,
}

/// A detail view for one team, with the matches lacking a reciprocal report.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DetailedScores {
    pub rows: Vec<DetailedScoreRow>,
    /// Matches for which the team itself did not report.
    pub missing_from_us: Vec<MatchKey>,
    /// Matches for which the partner did not report.
    pub missing_from_them: Vec<MatchKey>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ErrorKind {
    /// The column selection is invalid and should be made again.
    Configuration,
    /// The source data must be corrected before scoring.
    DataQuality,
}

/// Errors that prevent the scores from being computed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    ColumnOutOfRange {
        role: ColumnRole,
        index: usize,
        num_columns: usize,
    },
    MissingColumns {
        columns: Vec<String>,
    },
    AmbiguousTeamNames {
        names: Vec<String>,
    },
}

impl ScoringErrors {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoringErrors::ColumnOutOfRange { .. } | ScoringErrors::MissingColumns { .. } => {
                ErrorKind::Configuration
            }
            ScoringErrors::AmbiguousTeamNames { .. } => ErrorKind::DataQuality,
        }
    }
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::ColumnOutOfRange {
                role,
                index,
                num_columns,
            } => write!(
                f,
                "Invalid column selection for {}: index {} but the sheet has {} columns",
                role, index, num_columns
            ),
            ScoringErrors::MissingColumns { columns } => write!(
                f,
                "Columns not found in the sheet: {}. Please select the columns to use",
                columns.join(", ")
            ),
            ScoringErrors::AmbiguousTeamNames { names } => write!(
                f,
                "Some team names do not match between the team and opponent columns: {}. \
                 Please fix the names in the source data",
                names.join(", ")
            ),
        }
    }
}
