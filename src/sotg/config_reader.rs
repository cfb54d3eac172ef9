use crate::sotg::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    /// csv or xlsx
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

/// The column selection. Every value is either a position (a JSON number
/// or a string of digits) or a column name.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnSettings {
    pub team: Option<JSValue>,
    pub opponent: Option<JSValue>,
    pub day: Option<JSValue>,
    #[serde(rename = "teamScoreColumns")]
    pub team_score_columns: Option<Vec<JSValue>>,
    #[serde(rename = "opponentScoreColumns")]
    pub opponent_score_columns: Option<Vec<JSValue>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SotgConfig {
    pub input: Option<InputSource>,
    #[serde(default)]
    pub columns: ColumnSettings,
    #[serde(rename = "showRankings")]
    pub show_rankings: Option<bool>,
    /// The teams for which the detailed scores are written.
    #[serde(rename = "detailTeams")]
    pub detail_teams: Option<Vec<String>>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

pub fn read_config(path: &str) -> SotgResult<SotgConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    let config: SotgConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> SotgResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

pub fn read_column_ref(x: &Option<JSValue>) -> SotgResult<ColumnRef> {
    match x {
        None | Some(JSValue::Null) => Ok(ColumnRef::Unset),
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|idx| ColumnRef::ByIndex(idx as usize))
            .context(ParsingColumnSnafu {
                value: n.to_string(),
            }),
        Some(JSValue::String(s)) => Ok(ColumnRef::parse(s)),
        Some(other) => ParsingColumnSnafu {
            value: other.to_string(),
        }
        .fail(),
    }
}

/// Reads the five columns of a score group. An absent group is unset.
pub fn read_score_refs(
    role: &str,
    xs: &Option<Vec<JSValue>>,
) -> SotgResult<[ColumnRef; SCORE_CATEGORIES]> {
    let mut res: [ColumnRef; SCORE_CATEGORIES] = Default::default();
    if let Some(values) = xs {
        ensure!(
            values.len() == SCORE_CATEGORIES,
            WrongScoreColumnCountSnafu {
                role,
                count: values.len()
            }
        );
        for (idx, v) in values.iter().enumerate() {
            res[idx] = read_column_ref(&Some(v.clone()))?;
        }
    }
    Ok(res)
}

impl ColumnSettings {
    pub fn column_mapping(&self) -> SotgResult<ColumnMapping> {
        Ok(ColumnMapping {
            team: read_column_ref(&self.team)?,
            opponent: read_column_ref(&self.opponent)?,
            day: read_column_ref(&self.day)?,
            team_scores: read_score_refs("teamScoreColumns", &self.team_score_columns)?,
            opponent_scores: read_score_refs(
                "opponentScoreColumns",
                &self.opponent_score_columns,
            )?,
        })
    }

    /// Replaces the values of this selection with the ones set on the
    /// command line.
    pub fn overridden_by(&self, args: &Args) -> ColumnSettings {
        let value = |s: &Option<String>| s.clone().map(JSValue::String);
        let values = |s: &Option<Vec<String>>| {
            s.clone()
                .map(|xs| xs.into_iter().map(JSValue::String).collect())
        };
        ColumnSettings {
            team: value(&args.team_column).or_else(|| self.team.clone()),
            opponent: value(&args.opponent_column).or_else(|| self.opponent.clone()),
            day: value(&args.day_column).or_else(|| self.day.clone()),
            team_score_columns: values(&args.team_score_columns)
                .or_else(|| self.team_score_columns.clone()),
            opponent_score_columns: values(&args.opponent_score_columns)
                .or_else(|| self.opponent_score_columns.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    #[test]
    fn column_values() {
        assert_eq!(read_column_ref(&None).unwrap(), ColumnRef::Unset);
        assert_eq!(
            read_column_ref(&Some(json!(2))).unwrap(),
            ColumnRef::ByIndex(2)
        );
        assert_eq!(
            read_column_ref(&Some(json!("2"))).unwrap(),
            ColumnRef::ByIndex(2)
        );
        assert_eq!(
            read_column_ref(&Some(json!("Team"))).unwrap(),
            ColumnRef::ByName("Team".to_string())
        );
        assert!(read_column_ref(&Some(json!(-1))).is_err());
        assert!(read_column_ref(&Some(json!([1]))).is_err());
    }

    #[test]
    fn score_groups_have_five_columns() {
        let settings: ColumnSettings =
            serde_json::from_value(json!({"teamScoreColumns": [1, 2, 3]})).unwrap();
        assert!(settings.column_mapping().is_err());

        let settings: ColumnSettings =
            serde_json::from_value(json!({"opponentScoreColumns": [3, 4, 5, 6, "Communication"]}))
                .unwrap();
        let mapping = settings.column_mapping().unwrap();
        assert_eq!(mapping.opponent_scores[0], ColumnRef::ByIndex(3));
        assert_eq!(
            mapping.opponent_scores[4],
            ColumnRef::ByName("Communication".to_string())
        );
        assert_eq!(mapping.team_scores[0], ColumnRef::Unset);
    }

    #[test]
    fn command_line_wins() {
        let settings: ColumnSettings =
            serde_json::from_value(json!({"team": 1, "opponent": 2})).unwrap();
        let args = Args::parse_from(["sotg", "--team-column", "Team name"]);
        let mapping = settings.overridden_by(&args).column_mapping().unwrap();
        assert_eq!(mapping.team, ColumnRef::ByName("Team name".to_string()));
        assert_eq!(mapping.opponent, ColumnRef::ByIndex(2));
        assert_eq!(mapping.day, ColumnRef::Unset);
    }
}
