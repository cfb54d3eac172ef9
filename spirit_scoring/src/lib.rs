mod config;
use log::{debug, info};

use std::{cmp::Ordering, collections::BTreeMap};

pub use crate::config::*;

pub mod builder;
pub mod cells;
pub mod columns;
pub mod detail;
pub mod manual;
pub mod reconcile;
pub mod reports;

pub use crate::columns::{missing_columns, resolve_columns, ResolvedColumns, Table};
use crate::reports::ScoredReport;

/// The spirit scores of one tournament sheet.
///
/// The sheet is prepared once at construction: columns are resolved, the
/// score cells are converted to numbers and team names are reconciled.
/// The views are then computed from this prepared data.
///
/// ```
/// use spirit_scoring::builder::Builder;
/// use spirit_scoring::{ColumnMapping, ScoringOptions, SpiritScorer};
/// # use spirit_scoring::ScoringErrors;
///
/// let mut builder = Builder::new();
/// builder.add_report("Alpha", "Beta", "1", &[2, 2, 2, 2, 2], &[3, 3, 3, 3, 3]);
/// builder.add_report("Beta", "Alpha", "1", &[3, 2, 2, 2, 2], &[2, 2, 2, 2, 2]);
///
/// let scorer = SpiritScorer::new(
///     &builder.table(),
///     &ColumnMapping::default(),
///     &ScoringOptions::DEFAULT_OPTIONS,
/// )?;
/// let rankings = scorer.rankings();
/// assert_eq!(rankings[0].team, "Alpha");
/// assert_eq!(rankings[0].average_score_received, Some(11.0));
///
/// # Ok::<(), ScoringErrors>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SpiritScorer {
    reports: Vec<ScoredReport>,
    options: ScoringOptions,
}

impl SpiritScorer {
    pub fn new(
        table: &Table,
        mapping: &ColumnMapping,
        options: &ScoringOptions,
    ) -> Result<SpiritScorer, ScoringErrors> {
        let columns = resolve_columns(table.header(), mapping)?;
        let raw_reports = reports::extract_reports(table, &columns)?;
        info!(
            "Processing {:?} reports, options: {:?}",
            raw_reports.len(),
            options
        );
        let scored = reports::normalize_reports(&raw_reports);
        let reports = reconcile::reconcile_team_names(scored)?;
        Ok(SpiritScorer {
            reports,
            options: *options,
        })
    }

    pub fn reports(&self) -> &[ScoredReport] {
        &self.reports
    }

    /// All the team names, sorted.
    pub fn teams(&self) -> Vec<String> {
        let mut res: Vec<String> = self
            .reports
            .iter()
            .flat_map(|r| [r.reporting_team.clone(), r.opponent_team.clone()])
            .flatten()
            .collect();
        res.sort();
        res.dedup();
        res
    }

    pub fn rankings(&self) -> Vec<RankingEntry> {
        compute_rankings(&self.reports)
    }

    pub fn received_scores(&self, team: &str) -> DetailedScores {
        detail::received_scores(&self.reports, team, &self.options)
    }

    pub fn awarded_scores(&self, team: &str) -> DetailedScores {
        detail::awarded_scores(&self.reports, team, &self.options)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
struct Tally {
    total: i64,
    matches: u32,
}

fn average(tally: Option<&Tally>) -> Option<f64> {
    match tally {
        Some(t) if t.matches > 0 => Some(t.total as f64 / t.matches as f64),
        _ => None,
    }
}

// Highest average first, undefined averages last.
fn compare_averages(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Computes the standings from prepared reports.
///
/// A team's received score is the sum of what others gave it, averaged over
/// the number of reports about it. The self score is averaged over the
/// number of reports it wrote. Teams with the same received average share
/// the same rank, and the next team is ranked after all of them (1, 1, 3).
/// Teams with an equal average are listed by name.
pub fn compute_rankings(reports: &[ScoredReport]) -> Vec<RankingEntry> {
    let mut received: BTreeMap<String, Tally> = BTreeMap::new();
    let mut self_scored: BTreeMap<String, Tally> = BTreeMap::new();
    for r in reports.iter() {
        if let Some(opponent) = &r.opponent_team {
            let t = received.entry(opponent.clone()).or_default();
            t.total = t.total.saturating_add(r.score_total());
            t.matches += 1;
        }
        if let Some(team) = &r.reporting_team {
            let t = self_scored.entry(team.clone()).or_default();
            t.total = t.total.saturating_add(r.self_score_total());
            t.matches += 1;
        }
    }

    let mut teams: Vec<&String> = received.keys().chain(self_scored.keys()).collect();
    teams.sort();
    teams.dedup();

    let mut res: Vec<RankingEntry> = teams
        .into_iter()
        .map(|team| {
            let rec = received.get(team);
            let own = self_scored.get(team);
            let average_score_received = average(rec);
            let average_self_score = average(own);
            RankingEntry {
                team: team.clone(),
                rank: None,
                score_matches: rec.map(|t| t.matches).unwrap_or(0),
                self_score_matches: own.map(|t| t.matches).unwrap_or(0),
                total_score_received: rec.map(|t| t.total).unwrap_or(0),
                total_self_score: own.map(|t| t.total).unwrap_or(0),
                average_score_received,
                average_self_score,
                score_difference: average_score_received
                    .zip(average_self_score)
                    .map(|(x, y)| x - y),
            }
        })
        .collect();

    // Stable: ties keep the alphabetical order.
    res.sort_by(|a, b| compare_averages(a.average_score_received, b.average_score_received));

    let mut current: Option<(f64, u32)> = None;
    for (idx, entry) in res.iter_mut().enumerate() {
        if let Some(avg) = entry.average_score_received {
            let rank = match current {
                Some((prev_avg, prev_rank)) if prev_avg == avg => prev_rank,
                _ => idx as u32 + 1,
            };
            current = Some((avg, rank));
            entry.rank = Some(rank);
        }
    }
    debug!("compute_rankings: {:?}", res);
    res
}
