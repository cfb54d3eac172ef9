use log::debug;

use std::collections::HashSet;

use crate::config::*;
use crate::reports::ScoredReport;

/// One side of a join: the match identity and the scores it carries.
type Side = Vec<(MatchKey, ScoreLine)>;

/// The result of joining two sides on their match keys.
#[derive(Eq, PartialEq, Debug, Clone)]
struct Joined {
    inner: Vec<DetailedScoreRow>,
    outer: Vec<DetailedScoreRow>,
    left_only: Vec<MatchKey>,
    right_only: Vec<MatchKey>,
}

fn push_unique(keys: &mut Vec<MatchKey>, key: &MatchKey) {
    if !keys.contains(key) {
        keys.push(key.clone());
    }
}

// Rows are produced in the order of the left side. Right rows without a
// partner are appended at the end of the outer join, in their own order.
// Keys that appear several times on both sides are paired with each other.
fn join(left: &Side, right: &Side) -> Joined {
    let left_keys: HashSet<&MatchKey> = left.iter().map(|(k, _)| k).collect();
    let right_keys: HashSet<&MatchKey> = right.iter().map(|(k, _)| k).collect();

    let mut inner: Vec<DetailedScoreRow> = Vec::new();
    let mut outer: Vec<DetailedScoreRow> = Vec::new();
    let mut left_only: Vec<MatchKey> = Vec::new();
    let mut right_only: Vec<MatchKey> = Vec::new();

    for (key, given) in left.iter() {
        if right_keys.contains(key) {
            for (_, self_assessment) in right.iter().filter(|(k, _)| k == key) {
                let row = DetailedScoreRow {
                    key: key.clone(),
                    given: Some(given.clone()),
                    self_assessment: Some(self_assessment.clone()),
                };
                inner.push(row.clone());
                outer.push(row);
            }
        } else {
            outer.push(DetailedScoreRow {
                key: key.clone(),
                given: Some(given.clone()),
                self_assessment: None,
            });
            push_unique(&mut left_only, key);
        }
    }
    for (key, self_assessment) in right.iter() {
        if !left_keys.contains(key) {
            outer.push(DetailedScoreRow {
                key: key.clone(),
                given: None,
                self_assessment: Some(self_assessment.clone()),
            });
            push_unique(&mut right_only, key);
        }
    }
    Joined {
        inner,
        outer,
        left_only,
        right_only,
    }
}

fn is_team(name: &Option<String>, team: &str) -> bool {
    name.as_deref() == Some(team)
}

/// The reports written by others about `team`, keyed by their author.
fn reports_about(
    reports: &[ScoredReport],
    team: &str,
    line: fn(&ScoredReport) -> ScoreLine,
) -> Side {
    reports
        .iter()
        .filter(|r| is_team(&r.opponent_team, team))
        .map(|r| {
            let key = MatchKey {
                partner: r.reporting_team.clone(),
                day: r.day.clone(),
            };
            (key, line(r))
        })
        .collect()
}

/// The reports written by `team`, keyed by the opponent.
fn reports_by(
    reports: &[ScoredReport],
    team: &str,
    line: fn(&ScoredReport) -> ScoreLine,
) -> Side {
    reports
        .iter()
        .filter(|r| is_team(&r.reporting_team, team))
        .map(|r| {
            let key = MatchKey {
                partner: r.opponent_team.clone(),
                day: r.day.clone(),
            };
            (key, line(r))
        })
        .collect()
}

/// The scores `team` received, next to its own self assessment.
///
/// A match reported by the partner only is missing from us, a match
/// reported by `team` only is missing from them.
pub fn received_scores(
    reports: &[ScoredReport],
    team: &str,
    options: &ScoringOptions,
) -> DetailedScores {
    let received = reports_about(reports, team, ScoredReport::score_line);
    let self_scored = reports_by(reports, team, ScoredReport::self_score_line);
    let joined = join(&received, &self_scored);
    debug!(
        "received_scores: team {:?}: {} matched, {} missing from us, {} missing from them",
        team,
        joined.inner.len(),
        joined.left_only.len(),
        joined.right_only.len()
    );
    DetailedScores {
        rows: if options.show_rankings {
            joined.outer
        } else {
            joined.inner
        },
        missing_from_us: joined.left_only,
        missing_from_them: joined.right_only,
    }
}

/// The scores `team` gave, next to the partner's self assessment.
pub fn awarded_scores(
    reports: &[ScoredReport],
    team: &str,
    options: &ScoringOptions,
) -> DetailedScores {
    let awarded = reports_by(reports, team, ScoredReport::score_line);
    let partner_self = reports_about(reports, team, ScoredReport::self_score_line);
    let joined = join(&awarded, &partner_self);
    debug!(
        "awarded_scores: team {:?}: {} matched, {} missing from them, {} missing from us",
        team,
        joined.inner.len(),
        joined.left_only.len(),
        joined.right_only.len()
    );
    DetailedScores {
        rows: if options.show_rankings {
            joined.outer
        } else {
            joined.inner
        },
        missing_from_us: joined.right_only,
        missing_from_them: joined.left_only,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(team: &str, opponent: &str, day: &str, given: i64, own: i64) -> ScoredReport {
        ScoredReport {
            reporting_team: Some(team.to_string()),
            opponent_team: Some(opponent.to_string()),
            day: Some(day.to_string()),
            opponent_scores: vec![given; 5],
            self_scores: vec![own; 5],
        }
    }

    fn key(partner: &str, day: &str) -> MatchKey {
        MatchKey {
            partner: Some(partner.to_string()),
            day: Some(day.to_string()),
        }
    }

    const OUTER: ScoringOptions = ScoringOptions {
        show_rankings: true,
    };
    const INNER: ScoringOptions = ScoringOptions {
        show_rankings: false,
    };

    #[test]
    fn reciprocal_reports_need_no_outer_rows() {
        let reports = vec![
            report("A", "B", "1", 2, 3),
            report("B", "A", "1", 1, 4),
            report("A", "B", "2", 2, 2),
            report("B", "A", "2", 3, 3),
        ];
        let outer = received_scores(&reports, "A", &OUTER);
        let inner = received_scores(&reports, "A", &INNER);
        assert_eq!(outer, inner);
        assert!(outer.missing_from_us.is_empty());
        assert!(outer.missing_from_them.is_empty());
        assert_eq!(outer.rows.len(), 2);

        // Day 1: B gave A 1 per category, A rated itself 3.
        let first = &outer.rows[0];
        assert_eq!(first.key, key("B", "1"));
        assert_eq!(first.given.as_ref().map(|l| l.total), Some(5));
        assert_eq!(first.self_assessment.as_ref().map(|l| l.total), Some(15));

        let awarded = awarded_scores(&reports, "A", &INNER);
        // Day 1: A gave B 2 per category, B rated itself 4.
        assert_eq!(awarded.rows[0].given.as_ref().map(|l| l.total), Some(10));
        assert_eq!(
            awarded.rows[0].self_assessment.as_ref().map(|l| l.total),
            Some(20)
        );
    }

    #[test]
    fn unreciprocated_reports() {
        let reports = vec![
            // Both sides reported.
            report("A", "B", "1", 2, 2),
            report("B", "A", "1", 2, 2),
            // Only C reported on its match against A.
            report("C", "A", "1", 3, 3),
            // Only A reported on its match against D.
            report("A", "D", "2", 1, 1),
        ];

        let received = received_scores(&reports, "A", &OUTER);
        assert_eq!(received.rows.len(), 3);
        assert_eq!(received.missing_from_us, vec![key("C", "1")]);
        assert_eq!(received.missing_from_them, vec![key("D", "2")]);
        let unmatched = &received.rows[2];
        assert_eq!(unmatched.key, key("D", "2"));
        assert!(unmatched.given.is_none());
        assert!(unmatched.self_assessment.is_some());

        let received_inner = received_scores(&reports, "A", &INNER);
        assert_eq!(received_inner.rows.len(), 1);
        assert_eq!(received_inner.missing_from_us, received.missing_from_us);

        let awarded = awarded_scores(&reports, "A", &OUTER);
        assert_eq!(awarded.rows.len(), 3);
        assert_eq!(awarded.missing_from_us, vec![key("C", "1")]);
        assert_eq!(awarded.missing_from_them, vec![key("D", "2")]);
    }

    #[test]
    fn same_partner_on_different_days_is_not_joined() {
        let reports = vec![report("A", "B", "1", 2, 2), report("B", "A", "2", 2, 2)];
        let received = received_scores(&reports, "A", &INNER);
        assert!(received.rows.is_empty());
        assert_eq!(received.missing_from_us, vec![key("B", "2")]);
        assert_eq!(received.missing_from_them, vec![key("B", "1")]);
    }
}
