use clap::Parser;

/// This is a Spirit of the Game scoring program for Ultimate tournaments.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the input sheet, the column selection and the
    /// output. Command line options override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the expected summary in JSON format. If provided, sotg will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The spreadsheet export containing the spirit scores, one row per form answer.
    /// Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is deduced from the extension of the input file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Defaults to the first worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Column selection. Each column is given by its position (starting at 0) or by its name.
    /// The column with the name of the reporting team (default 'Your Team').
    #[clap(long, value_parser)]
    pub team_column: Option<String>,

    /// The column with the name of the opponent (default 'Opponent Team').
    #[clap(long, value_parser)]
    pub opponent_column: Option<String>,

    /// The column with the day of the match (default 'Day').
    #[clap(long, value_parser)]
    pub day_column: Option<String>,

    /// (5 values) The columns with the scores a team gives itself, in rubric order.
    #[clap(long, value_parser)]
    pub team_score_columns: Option<Vec<String>>,

    /// (5 values) The columns with the scores a team gives to its opponent, in rubric order.
    #[clap(long, value_parser)]
    pub opponent_score_columns: Option<Vec<String>>,

    /// If passed as an argument, the detailed views include matches reported by one side only.
    #[clap(long, takes_value = false)]
    pub show_rankings: bool,

    /// (team name, repeatable) Adds the detailed received and awarded scores of this team to the summary.
    #[clap(long, value_parser)]
    pub team: Option<Vec<String>>,

    /// If passed as an argument, only prints the required columns that are missing from the input.
    #[clap(long, takes_value = false)]
    pub check_columns: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
