use log::{debug, warn};

use std::collections::BTreeSet;

use crate::config::ScoringErrors;
use crate::reports::ScoredReport;

/// The distinct names found in the team and in the opponent columns.
fn team_values(reports: &[ScoredReport]) -> (BTreeSet<String>, BTreeSet<String>) {
    let teams: BTreeSet<String> = reports
        .iter()
        .filter_map(|r| r.reporting_team.clone())
        .collect();
    let opponents: BTreeSet<String> = reports
        .iter()
        .filter_map(|r| r.opponent_team.clone())
        .collect();
    (teams, opponents)
}

/// Repairs a team name that was entered differently in the opponent column.
///
/// When exactly one name appears only as a team and exactly one only as an
/// opponent, the opponent spelling is taken to be a typo and every
/// occurrence of it in the opponent column is replaced. Any other mismatch
/// cannot be repaired safely, and all the names involved are reported.
pub fn reconcile_team_names(
    reports: Vec<ScoredReport>,
) -> Result<Vec<ScoredReport>, ScoringErrors> {
    let (teams, opponents) = team_values(&reports);
    let only_as_team: Vec<&String> = teams.difference(&opponents).collect();
    let only_as_opponent: Vec<&String> = opponents.difference(&teams).collect();
    debug!(
        "reconcile_team_names: only as team: {:?} only as opponent: {:?}",
        only_as_team, only_as_opponent
    );

    match (only_as_team.as_slice(), only_as_opponent.as_slice()) {
        ([], []) => Ok(reports),
        ([canonical], [misspelled]) => {
            warn!(
                "reconcile_team_names: renaming opponent {:?} to {:?}",
                misspelled, canonical
            );
            let canonical: String = canonical.to_string();
            let misspelled: String = misspelled.to_string();
            Ok(reports
                .into_iter()
                .map(|r| {
                    if r.opponent_team.as_ref() == Some(&misspelled) {
                        ScoredReport {
                            opponent_team: Some(canonical.clone()),
                            ..r
                        }
                    } else {
                        r
                    }
                })
                .collect())
        }
        _ => {
            let names: BTreeSet<String> = teams
                .symmetric_difference(&opponents)
                .cloned()
                .collect();
            Err(ScoringErrors::AmbiguousTeamNames {
                names: names.into_iter().collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorKind;

    fn report(team: &str, opponent: &str) -> ScoredReport {
        ScoredReport {
            reporting_team: Some(team.to_string()),
            opponent_team: Some(opponent.to_string()),
            day: Some("1".to_string()),
            opponent_scores: vec![2; 5],
            self_scores: vec![2; 5],
        }
    }

    #[test]
    fn consistent_names_are_untouched() {
        let reports = vec![report("A", "B"), report("B", "A")];
        let res = reconcile_team_names(reports.clone()).unwrap();
        assert_eq!(res, reports);
    }

    #[test]
    fn single_misspelling_is_repaired() {
        let reports = vec![
            report("A", "BB"),
            report("B", "C"),
            report("C", "A"),
            report("C", "BB"),
        ];
        let res = reconcile_team_names(reports).unwrap();
        let opponents: Vec<&str> = res
            .iter()
            .filter_map(|r| r.opponent_team.as_deref())
            .collect();
        assert_eq!(opponents, vec!["B", "C", "A", "B"]);
        let (teams, opponents) = team_values(&res);
        assert_eq!(teams, opponents);
    }

    #[test]
    fn several_misspellings_are_rejected() {
        let reports = vec![report("A", "BB"), report("B", "CC"), report("C", "A")];
        let err = reconcile_team_names(reports).unwrap_err();
        assert_eq!(
            err,
            ScoringErrors::AmbiguousTeamNames {
                names: vec![
                    "B".to_string(),
                    "BB".to_string(),
                    "C".to_string(),
                    "CC".to_string()
                ]
            }
        );
        assert_eq!(err.kind(), ErrorKind::DataQuality);
    }

    #[test]
    fn unbalanced_mismatch_is_rejected() {
        // C reports but nobody reported on C.
        let reports = vec![report("A", "B"), report("B", "A"), report("C", "A")];
        let err = reconcile_team_names(reports).unwrap_err();
        assert_eq!(
            err,
            ScoringErrors::AmbiguousTeamNames {
                names: vec!["C".to_string()]
            }
        );
    }
}
