use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use spirit_scoring::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::sotg::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum SotgError {
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The spreadsheet has no worksheet or no header"))]
    EmptyExcel {},
    #[snafu(display("Worksheet {name} not found"))]
    MissingWorksheet { name: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Cannot read column selection {value}: expected a position or a name"))]
    ParsingColumn { value: String },
    #[snafu(display("{role}: expected 5 columns, got {count}"))]
    WrongScoreColumnCount { role: String, count: usize },
    #[snafu(display("{source}"))]
    Scoring { source: ScoringErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SotgResult<T> = Result<T, SotgError>;

/// Written in place of undefined values in the logged standings.
const PLACEHOLDER: &str = "-";

fn format_number(x: Option<f64>) -> String {
    x.map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn format_ranking_row(e: &RankingEntry) -> String {
    format!(
        "{:>4}  {:<32} {:>7} {:>7} {:>9} {:>9} {:>7}",
        e.rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        e.team,
        e.score_matches,
        e.total_score_received,
        format_number(e.average_score_received),
        format_number(e.average_self_score),
        format_number(e.score_difference)
    )
}

fn log_rankings(rankings: &[RankingEntry]) {
    info!(
        "{:>4}  {:<32} {:>7} {:>7} {:>9} {:>9} {:>7}",
        "Rank", "Team", "Matches", "Score", "Avg", "Avg self", "Diff"
    );
    for e in rankings.iter() {
        info!("{}", format_ranking_row(e));
    }
}

fn rankings_to_json(rankings: &[RankingEntry]) -> Vec<JSValue> {
    rankings
        .iter()
        .map(|e| {
            json!({
                "rank": e.rank,
                "team": e.team,
                "matches": e.score_matches,
                "selfMatches": e.self_score_matches,
                "score": e.total_score_received,
                "selfScore": e.total_self_score,
                "avgScore": e.average_score_received,
                "avgSelfScore": e.average_self_score,
                "difference": e.score_difference,
            })
        })
        .collect()
}

fn score_line_to_json(line: &Option<ScoreLine>) -> JSValue {
    match line {
        Some(l) => json!({"scores": l.scores, "total": l.total}),
        None => JSValue::Null,
    }
}

fn match_key_to_json(key: &MatchKey) -> JSValue {
    json!({"partner": key.partner, "day": key.day})
}

fn detailed_scores_to_json(ds: &DetailedScores) -> JSValue {
    let rows: Vec<JSValue> = ds
        .rows
        .iter()
        .map(|row| {
            json!({
                "partner": row.key.partner,
                "day": row.key.day,
                "given": score_line_to_json(&row.given),
                "selfAssessment": score_line_to_json(&row.self_assessment),
            })
        })
        .collect();
    let missing_from_us: Vec<JSValue> = ds.missing_from_us.iter().map(match_key_to_json).collect();
    let missing_from_them: Vec<JSValue> =
        ds.missing_from_them.iter().map(match_key_to_json).collect();
    json!({
        "rows": rows,
        "missingFromUs": missing_from_us,
        "missingFromThem": missing_from_them,
    })
}

fn build_summary_js(
    input_name: &str,
    options: &ScoringOptions,
    scorer: &SpiritScorer,
    detail_teams: &[String],
) -> JSValue {
    let rankings = scorer.rankings();
    log_rankings(&rankings);
    let mut summary = json!({
        "config": {
            "input": input_name,
            "showRankings": options.show_rankings,
        },
        "rankings": rankings_to_json(&rankings),
    });
    if !detail_teams.is_empty() {
        let known_teams = scorer.teams();
        let mut teams: JSMap<String, JSValue> = JSMap::new();
        for team in detail_teams.iter() {
            if !known_teams.contains(team) {
                warn!("Team {:?} does not appear in the sheet", team);
            }
            teams.insert(
                team.clone(),
                json!({
                    "received": detailed_scores_to_json(&scorer.received_scores(team)),
                    "awarded": detailed_scores_to_json(&scorer.awarded_scores(team)),
                }),
            );
        }
        summary["teams"] = JSValue::Object(teams);
    }
    summary
}

fn read_table(path: &str, provider: &str, worksheet_name: Option<&str>) -> SotgResult<Table> {
    info!("Attempting to read spirit scores from {:?}", path);
    match provider {
        "csv" => io_csv::read_csv_table(path),
        "xlsx" => io_xlsx::read_excel_table(path, worksheet_name),
        x => whatever!("Input type not implemented {:?}", x),
    }
}

fn write_summary(out: &Option<String>, content: &str) -> SotgResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })
        }
    }
}

/// Runs the scoring of one sheet, as described by the command line and an
/// optional configuration file.
pub fn run_scoring(args: &Args) -> SotgResult<()> {
    let config: SotgConfig = match &args.config {
        Some(path) => read_config(path)?,
        None => SotgConfig::default(),
    };
    info!("config: {:?}", config);

    // Paths in the configuration file are relative to that file.
    let root_p: PathBuf = args
        .config
        .as_deref()
        .and_then(|p| Path::new(p).parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    let input_path: String = match (&args.input, &config.input) {
        (Some(p), _) => p.clone(),
        (None, Some(source)) => root_p.join(&source.file_path).display().to_string(),
        (None, None) => whatever!("No input specified: use --input or a configuration file"),
    };
    let provider: String = args
        .input_type
        .clone()
        .or_else(|| config.input.as_ref().and_then(|s| s.provider.clone()))
        .unwrap_or_else(|| io_common::provider_from_extension(&input_path));
    let worksheet_name: Option<String> = args.excel_worksheet_name.clone().or_else(|| {
        config
            .input
            .as_ref()
            .and_then(|s| s.excel_worksheet_name.clone())
    });

    let table = read_table(&input_path, &provider, worksheet_name.as_deref())?;
    let mapping = config.columns.overridden_by(args).column_mapping()?;
    debug!("run_scoring: mapping: {:?}", mapping);

    if args.check_columns {
        let missing = missing_columns(table.header(), &mapping).context(ScoringSnafu {})?;
        if missing.is_empty() {
            println!("All the required columns are present");
        } else {
            println!("Missing columns:");
            for c in missing.iter() {
                println!("  {}", c);
            }
            println!("Available columns:");
            for (idx, c) in table.header().iter().enumerate() {
                println!("  {:>3} {}", idx, c);
            }
        }
        return Ok(());
    }

    let options = ScoringOptions {
        show_rankings: args.show_rankings || config.show_rankings.unwrap_or(false),
    };
    let scorer = match SpiritScorer::new(&table, &mapping, &options) {
        Ok(s) => s,
        Err(e) => {
            if e.kind() == ErrorKind::Configuration {
                warn!("The column selection is invalid, run with --check-columns to list the columns");
            }
            return Err(e).context(ScoringSnafu {});
        }
    };

    let detail_teams: Vec<String> = args
        .team
        .clone()
        .or_else(|| config.detail_teams.clone())
        .unwrap_or_default();
    let input_name = io_common::simplify_file_name(&input_path);
    let result_js = build_summary_js(&input_name, &options, &scorer, &detail_teams);

    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    let out = args.out.clone().or_else(|| config.output_path.clone());
    write_summary(&out, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_test(test_name: &str, extra_args: &[&str]) -> SotgResult<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let test_dir = format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), test_name);
        let mut argv: Vec<String> = vec![
            "sotg".to_string(),
            "--config".to_string(),
            format!("{}/{}_config.json", test_dir, test_name),
            "--reference".to_string(),
            format!("{}/{}_expected_summary.json", test_dir, test_name),
        ];
        argv.extend(extra_args.iter().map(|s| s.to_string()));
        let args = Args::parse_from(argv);
        info!("Running test {}", test_name);
        run_scoring(&args)
    }

    fn test_wrapper(test_name: &str) {
        if let Err(e) = run_test(test_name, &[]) {
            panic!("test {} failed: {}", test_name, e);
        }
    }

    #[test]
    fn two_teams_tie() {
        test_wrapper("two_teams_tie");
    }

    #[test]
    fn round_robin_with_comments() {
        test_wrapper("round_robin_with_comments");
    }

    #[test]
    fn misspelled_opponent() {
        test_wrapper("misspelled_opponent");
    }

    #[test]
    fn custom_columns() {
        test_wrapper("custom_columns");
    }

    #[test]
    fn numeric_looking_names() {
        test_wrapper("numeric_looking_names");
    }

    fn never_scored(team: &str) -> RankingEntry {
        RankingEntry {
            team: team.to_string(),
            rank: None,
            score_matches: 0,
            self_score_matches: 1,
            total_score_received: 0,
            total_self_score: 12,
            average_score_received: None,
            average_self_score: Some(12.0),
            score_difference: None,
        }
    }

    #[test]
    fn undefined_values_use_the_placeholder() {
        assert_eq!(format_number(None), "-");
        assert_eq!(format_number(Some(9.5)), "9.50");

        let row = format_ranking_row(&never_scored("Late Comers"));
        let cols: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(cols, vec!["-", "Late", "Comers", "0", "0", "-", "12.00", "-"]);
    }

    #[test]
    fn undefined_values_are_null_in_json() {
        let js = rankings_to_json(&[never_scored("Late Comers")]);
        assert_eq!(js[0]["rank"], JSValue::Null);
        assert_eq!(js[0]["avgScore"], JSValue::Null);
        assert_eq!(js[0]["difference"], JSValue::Null);
        assert_eq!(js[0]["avgSelfScore"], json!(12.0));
        assert_eq!(js[0]["matches"], json!(0));
    }

    #[test]
    fn ambiguous_names_fail() {
        let err = run_test("ambiguous_names", &[]).unwrap_err();
        match err {
            SotgError::Scoring { source } => {
                assert_eq!(source.kind(), ErrorKind::DataQuality);
            }
            e => panic!("unexpected error {}", e),
        }
    }

    #[test]
    fn column_index_out_of_range_fails() {
        let err = run_test("two_teams_tie", &["--team-column", "42"]).unwrap_err();
        match err {
            SotgError::Scoring { source } => {
                assert_eq!(source.kind(), ErrorKind::Configuration);
            }
            e => panic!("unexpected error {}", e),
        }
    }

    #[test]
    fn reference_mismatch_fails() {
        let res = run_test("two_teams_tie", &["--show-rankings"]);
        assert!(res.is_err());
    }
}
