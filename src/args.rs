use clap::Parser;

/// Ranks alternatives on multiple criteria with the TOPSIS method.
///
/// Example: topsis data.csv "1,1,1,1,1" "+,+,-,+,+" result.csv
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The table of alternatives, in CSV format (or Excel if the name ends with .xlsx).
    /// The first column identifies the alternatives, the other columns are the criteria.
    #[clap(value_parser)]
    pub input: Option<String>,

    /// (list of comma-separated numbers) One weight per criterion, for example "1,1,1,2".
    #[clap(value_parser, allow_hyphen_values = true)]
    pub weights: Option<String>,

    /// (list of comma-separated '+' or '-') One impact per criterion, for example "+,+,-,+".
    /// '+' means that higher values are better, '-' that lower values are better.
    #[clap(value_parser, allow_hyphen_values = true)]
    pub impacts: Option<String>,

    /// (file path) Where to write the input table with the score and the rank of each alternative.
    #[clap(value_parser)]
    pub output: Option<String>,

    /// (file path, optional) A JSON file providing any of the parameters above. The values given
    /// on the command line override the ones from this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) A result file produced previously. If provided, the computed result
    /// is checked against it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default ',') The field delimiter of the CSV input and output.
    #[clap(short, long, value_parser)]
    pub delimiter: Option<char>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
