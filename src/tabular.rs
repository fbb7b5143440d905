use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis::validate::{require_parameter, validate};
use topsis::*;

use std::path::Path;

use text_diff::print_diff;

use crate::args::Args;
use crate::tabular::config_reader::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

pub const SCORE_COLUMN: &str = "Topsis Score";
pub const RANK_COLUMN: &str = "Rank";

// Scores read back from a reference file are compared with this tolerance.
const REFERENCE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Snafu)]
pub enum TopsisCliError {
    #[snafu(display("Input file '{path}' not found"))]
    SourceNotFound { path: String },
    #[snafu(display("Error reading file {path}"))]
    ReadingInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing line {lineno} of {path}"))]
    CsvRead {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error writing result file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error writing result file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Excel file {path} does not contain the worksheet {worksheet:?}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("Excel file {path} does not contain any worksheet or row"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Invalid value for {key:?} in the configuration file"))]
    ConfigValue { key: String },
    #[snafu(display("Reference file {path} does not contain a column {column:?}"))]
    ReferenceFormat { path: String, column: String },
    #[snafu(display("Difference detected between the computed result and the reference {path}"))]
    ReferenceMismatch { path: String },
    #[snafu(display("{source}"))]
    Topsis { source: TopsisError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

impl TopsisCliError {
    /// True when the command line was incomplete, in which case the usage is
    /// worth printing.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(
            self,
            TopsisCliError::Topsis {
                source: TopsisError::MissingParameter { .. }
            }
        )
    }
}

pub type CliResult<T> = Result<T, TopsisCliError>;

/// The parameters of one run, after merging the command line and the
/// configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input: String,
    pub weights: String,
    pub impacts: String,
    pub output: String,
    pub reference: Option<String>,
    pub excel_worksheet_name: Option<String>,
    pub delimiter: u8,
}

/// What the caller reports back to the user.
#[derive(PartialEq, Debug, Clone)]
pub struct RunSummary {
    pub output: String,
    pub num_criteria: usize,
    pub alternatives: Vec<RankedAlternative>,
}

/// A table with the computed columns, ready to be written.
#[derive(PartialEq, Debug, Clone)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn settings_from_args(args: &Args) -> CliResult<RunSettings> {
    let config = match &args.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };

    let input = args
        .input
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.input_file.clone()));
    let weights = match &args.weights {
        Some(w) => Some(w.clone()),
        None => config.as_ref().map(|c| c.weights_text()).transpose()?.flatten(),
    };
    let impacts = match &args.impacts {
        Some(i) => Some(i.clone()),
        None => config.as_ref().map(|c| c.impacts_text()).transpose()?.flatten(),
    };
    let output = args
        .output
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.result_file.clone()));

    // Checked in the order of the command line.
    let input = require_parameter("input_file", input.as_deref()).context(TopsisSnafu {})?;
    let weights = require_parameter("weights", weights.as_deref()).context(TopsisSnafu {})?;
    let impacts = require_parameter("impacts", impacts.as_deref()).context(TopsisSnafu {})?;
    let output = require_parameter("result_file", output.as_deref()).context(TopsisSnafu {})?;

    let delimiter_c = match args.delimiter {
        Some(c) => Some(c),
        None => config.as_ref().map(|c| c.delimiter_char()).transpose()?.flatten(),
    };
    let delimiter = match delimiter_c {
        None => b',',
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => whatever!("The delimiter {:?} must be a single ASCII character", c),
    };

    Ok(RunSettings {
        input: input.to_string(),
        weights: weights.to_string(),
        impacts: impacts.to_string(),
        output: output.to_string(),
        reference: args
            .reference
            .clone()
            .or_else(|| config.as_ref().and_then(|c| c.reference_file.clone())),
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| config.as_ref().and_then(|c| c.excel_worksheet_name.clone())),
        delimiter,
    })
}

pub fn read_table(settings: &RunSettings) -> CliResult<RawTable> {
    let path = settings.input.as_str();
    if !Path::new(path).is_file() {
        return SourceNotFoundSnafu { path }.fail();
    }
    info!("Attempting to read input file {:?}", path);
    let is_excel = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    let table = if is_excel {
        io_excel::read_excel_table(path, settings.excel_worksheet_name.as_deref())?
    } else {
        io_csv::read_csv_table(path, settings.delimiter)?
    };
    info!(
        "read_table: {} columns, {} rows",
        table.num_columns(),
        table.rows.len()
    );
    Ok(table)
}

/// Appends the score and the rank to each row of the input.
pub fn build_result_table(table: &RawTable, scoring: &Scoring) -> ResultTable {
    let mut header = table.header.clone();
    header.push(SCORE_COLUMN.to_string());
    header.push(RANK_COLUMN.to_string());
    let rows = table
        .rows
        .iter()
        .zip(scoring.scores.iter())
        .zip(scoring.ranks.iter())
        .map(|((row, score), rank)| {
            let mut cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            cells.push(score.to_string());
            cells.push(rank.to_string());
            cells
        })
        .collect();
    ResultTable { header, rows }
}

pub fn run(args: &Args) -> CliResult<RunSummary> {
    let settings = settings_from_args(args)?;
    info!("settings: {:?}", settings);

    let table = read_table(&settings)?;
    let input = validate(&table, &settings.weights, &settings.impacts).context(TopsisSnafu {})?;
    let scoring = score(&input.matrix, &input.weights, &input.impacts).context(TopsisSnafu {})?;

    let result = build_result_table(&table, &scoring);
    io_csv::write_result_table(&settings.output, &result, settings.delimiter)?;

    if let Some(reference_p) = &settings.reference {
        check_reference(reference_p, &result, settings.delimiter)?;
    }

    let alternatives = input
        .identifiers
        .iter()
        .zip(scoring.scores.iter())
        .zip(scoring.ranks.iter())
        .map(|((identifier, score), rank)| RankedAlternative {
            identifier: identifier.clone(),
            score: *score,
            rank: *rank,
        })
        .collect();

    Ok(RunSummary {
        output: settings.output,
        num_criteria: input.matrix.num_criteria(),
        alternatives,
    })
}

/// Compares the computed scores and ranks with the ones of a reference file.
///
/// Scores are compared with a small absolute tolerance, ranks exactly.
pub fn check_reference(path: &str, result: &ResultTable, delimiter: u8) -> CliResult<()> {
    if !Path::new(path).is_file() {
        return SourceNotFoundSnafu { path }.fail();
    }
    let reference = io_csv::read_csv_table(path, delimiter)?;
    let column_index = |name: &str| -> CliResult<usize> {
        reference
            .header
            .iter()
            .position(|h| h == name)
            .context(ReferenceFormatSnafu { path, column: name })
    };
    let score_idx = column_index(SCORE_COLUMN)?;
    let rank_idx = column_index(RANK_COLUMN)?;

    let expected: Vec<(Option<f64>, String)> = reference
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: usize| row.get(idx).cloned().unwrap_or(Cell::Empty);
            (cell(score_idx).as_number(), cell(rank_idx).to_string())
        })
        .collect();
    let computed: Vec<(Option<f64>, String)> = result
        .rows
        .iter()
        .map(|row| {
            let n = row.len();
            (row[n - 2].parse::<f64>().ok(), row[n - 1].clone())
        })
        .collect();

    let same = expected.len() == computed.len()
        && expected
            .iter()
            .zip(computed.iter())
            .all(|((es, er), (cs, cr))| match (es, cs) {
                (Some(e), Some(c)) => (e - c).abs() <= REFERENCE_TOLERANCE && er.trim() == cr,
                _ => false,
            });

    if same {
        debug!("check_reference: result matches {:?}", path);
        return Ok(());
    }

    warn!("Found differences with the reference file {:?}", path);
    let render = |rows: &[(Option<f64>, String)]| -> String {
        rows.iter()
            .map(|(s, r)| match s {
                Some(x) => format!("{:.9} {}", x, r.trim()),
                None => format!("? {}", r.trim()),
            })
            .collect::<Vec<String>>()
            .join("\n")
    };
    print_diff(render(&expected).as_str(), render(&computed).as_str(), "\n");
    ReferenceMismatchSnafu { path }.fail()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    const PHONES: &str = "Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
M4,275,32,8,4
M5,225,16,16,2
";

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> String {
        let p = dir.path().join(name);
        let mut f = fs::File::create(&p).unwrap();
        f.write_all(content).unwrap();
        p.display().to_string()
    }

    fn args(v: &[&str]) -> Args {
        let mut all = vec!["topsis"];
        all.extend_from_slice(v);
        Args::try_parse_from(all).unwrap()
    }

    fn out_path(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).display().to_string()
    }

    #[test]
    fn end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "phones.csv", PHONES.as_bytes());
        let output = out_path(&dir, "result.csv");
        let summary = run(&args(&[&input, "0.25,0.25,0.25,0.25", "-,+,+,+", &output])).unwrap();
        assert_eq!(summary.num_criteria, 4);
        assert_eq!(summary.alternatives[2].identifier, "M3");
        assert_eq!(summary.alternatives[2].rank, 1);

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Model,Price,Storage,Camera,Looks,Topsis Score,Rank");
        assert_eq!(lines.len(), 6);
        assert!(lines[3].starts_with("M3,300,32,16,4,0.69163223126753"));
        assert!(lines[3].ends_with(",1"));
        let ranks: Vec<&str> = lines[1..]
            .iter()
            .map(|l| l.rsplit(',').next().unwrap())
            .collect();
        assert_eq!(ranks, vec!["3", "5", "1", "2", "4"]);
    }

    #[test]
    fn excel_input() {
        let dir = TempDir::new().unwrap();
        let input = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/phones.xlsx");
        let output = out_path(&dir, "result.csv");
        let summary = run(&args(&[
            input,
            "0.25,0.25,0.25,0.25",
            "-,+,+,+",
            &output,
            "--excel-worksheet-name",
            "Phones",
        ]))
        .unwrap();
        let ranks: Vec<u32> = summary.alternatives.iter().map(|a| a.rank).collect();
        assert_eq!(ranks, vec![3, 5, 1, 2, 4]);

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Model,Price,Storage,Camera,Looks,Topsis Score,Rank");
        assert!(lines[3].starts_with("M3,300,32,16,4,0.69163223126753"));
    }

    #[test]
    fn missing_parameter() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "phones.csv", PHONES.as_bytes());
        let err = run(&args(&[&input, "1,1,1,1"])).unwrap_err();
        assert!(err.is_missing_parameter());
        assert!(matches!(
            err,
            TopsisCliError::Topsis {
                source: TopsisError::MissingParameter { ref name }
            } if name == "impacts"
        ));
    }

    #[test]
    fn source_not_found() {
        let dir = TempDir::new().unwrap();
        let output = out_path(&dir, "result.csv");
        let missing = out_path(&dir, "nope.csv");
        let err = run(&args(&[&missing, "1,1", "+,+", &output])).unwrap_err();
        assert!(matches!(err, TopsisCliError::SourceNotFound { .. }));
        assert_eq!(err.to_string(), format!("Input file '{}' not found", missing));
    }

    #[test]
    fn validation_error_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "phones.csv", PHONES.as_bytes());
        let output = out_path(&dir, "result.csv");
        let err = run(&args(&[&input, "1,1", "-,+,+,+", &output])).unwrap_err();
        assert!(matches!(
            err,
            TopsisCliError::Topsis {
                source: TopsisError::WeightCountMismatch {
                    found: 2,
                    expected: 4
                }
            }
        ));
        assert!(!Path::new(&output).exists());
    }

    #[test]
    fn utf8_bom_and_semicolons() {
        let dir = TempDir::new().unwrap();
        let content = "\u{FEFF}Nom;Prix;Qualité\nÉté;10;3\nHiver;12;4\n";
        let input = write_file(&dir, "saisons.csv", content.as_bytes());
        let output = out_path(&dir, "result.csv");
        run(&args(&[&input, "1,1", "-,+", &output, "--delimiter", ";"])).unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("Nom;Prix;Qualité;Topsis Score;Rank\n"));
        assert!(written.contains("\nÉté;10;3;"));
    }

    #[test]
    fn latin1_input_gives_utf8_output() {
        let dir = TempDir::new().unwrap();
        let content = "Modèle,Qualité,Sécurité,Prix\n\
            Élégance préférée,3,4,250\n\
            Très économique,2,3,120\n\
            Château à côté de la forêt,5,5,400\n\
            Crème brûlée déjà goûtée,4,2,180\n";
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(content);
        let input = write_file(&dir, "modeles.csv", &bytes);
        let output = out_path(&dir, "result.csv");
        let summary = run(&args(&[&input, "1,1,1", "+,+,-", &output])).unwrap();
        assert_eq!(summary.alternatives[2].identifier, "Château à côté de la forêt");

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Modèle,Qualité,Sécurité,Prix,Topsis Score,Rank");
        assert!(lines[1].starts_with("Élégance préférée,3,4,250,"));
        assert!(lines[2].starts_with("Très économique,2,3,120,"));
        assert!(lines[4].starts_with("Crème brûlée déjà goûtée,4,2,180,"));
    }

    #[test]
    fn reference_check() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "phones.csv", PHONES.as_bytes());
        let output = out_path(&dir, "result.csv");
        run(&args(&[&input, "0.25,0.25,0.25,0.25", "-,+,+,+", &output])).unwrap();

        // The previous result is its own reference.
        let reference = fs::read_to_string(&output).unwrap();
        let reference_p = write_file(&dir, "reference.csv", reference.as_bytes());
        let output2 = out_path(&dir, "result2.csv");
        run(&args(&[
            &input,
            "0.25,0.25,0.25,0.25",
            "-,+,+,+",
            &output2,
            "--reference",
            &reference_p,
        ]))
        .unwrap();

        // Different weights produce a different outcome.
        let err = run(&args(&[
            &input,
            "1,2,1,1",
            "-,+,+,+",
            &output2,
            "--reference",
            &reference_p,
        ]))
        .unwrap_err();
        assert!(matches!(err, TopsisCliError::ReferenceMismatch { .. }));
    }

    #[test]
    fn reference_without_scores() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "phones.csv", PHONES.as_bytes());
        let output = out_path(&dir, "result.csv");
        let err = run(&args(&[
            &input,
            "1,1,1,1",
            "-,+,+,+",
            &output,
            "-r",
            &input,
        ]))
        .unwrap_err();
        assert!(matches!(err, TopsisCliError::ReferenceFormat { .. }));
    }

    #[test]
    fn configuration_file() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "phones.csv", PHONES.as_bytes());
        let config = r#"{
            "inputFile": "phones.csv",
            "weights": [0.25, 0.25, 0.25, 0.25],
            "impacts": ["-", "+", "+", "+"],
            "resultFile": "result.csv"
        }"#;
        let config_p = write_file(&dir, "run.json", config.as_bytes());
        let summary = run(&args(&["--config", &config_p])).unwrap();
        assert_eq!(summary.output, out_path(&dir, "result.csv"));
        assert!(Path::new(&summary.output).exists());

        // The command line takes precedence.
        let settings = settings_from_args(&args(&[
            "--config",
            &config_p,
            "other.csv",
            "1,1,1,1",
        ]))
        .unwrap();
        assert_eq!(settings.input, "other.csv");
        assert_eq!(settings.weights, "1,1,1,1");
        assert_eq!(settings.impacts, "-,+,+,+");
    }

    #[test]
    fn non_ascii_delimiter() {
        let err = settings_from_args(&args(&["a.csv", "1,1", "+,+", "b.csv", "-d", "é"])).unwrap_err();
        assert!(matches!(err, TopsisCliError::Whatever { .. }));
    }

    #[test]
    fn result_table_keeps_cells() {
        let table = RawTable {
            header: vec!["id".into(), "a".into(), "b".into()],
            rows: vec![
                vec![Cell::Text("x".into()), Cell::Text("1.50".into()), Cell::Number(2.0)],
                vec![Cell::Number(7.0), Cell::Text("3".into()), Cell::Text("4".into())],
            ],
        };
        let scoring = Scoring {
            scores: vec![0.25, 0.75],
            ranks: vec![2, 1],
            ideal_best: vec![],
            ideal_worst: vec![],
            separation_best: vec![],
            separation_worst: vec![],
        };
        let res = build_result_table(&table, &scoring);
        assert_eq!(res.header, vec!["id", "a", "b", "Topsis Score", "Rank"]);
        assert_eq!(res.rows[0], vec!["x", "1.50", "2", "0.25", "2"]);
        assert_eq!(res.rows[1], vec!["7", "3", "4", "0.75", "1"]);
    }
}
