// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One cell of a raw table, as produced by the readers.
///
/// Readers for text formats only produce `Text` cells. Spreadsheet readers
/// keep the native numeric type of the cell.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// A cell with no content at all.
    Empty,
}

impl Cell {
    /// The numeric value of the cell, if it has one.
    ///
    /// Text is trimmed before parsing. Infinite and NaN values are not
    /// considered numeric.
    pub fn as_number(&self) -> Option<f64> {
        let x = match self {
            Cell::Number(x) => *x,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Empty => return None,
        };
        if x.is_finite() {
            Some(x)
        } else {
            None
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(x) => write!(f, "{}", x),
            Cell::Empty => Ok(()),
        }
    }
}

/// A table as read from a source, before any validation.
///
/// The first column holds the identifiers of the alternatives, the other
/// columns are the candidate criteria.
#[derive(PartialEq, Debug, Clone)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn num_columns(&self) -> usize {
        self.header.len()
    }
}

/// The polarity of a criterion.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher values are better (`+`).
    Benefit,
    /// Lower values are better (`-`).
    Cost,
}

impl Impact {
    pub fn from_symbol(s: &str) -> Option<Impact> {
        match s {
            "+" => Some(Impact::Benefit),
            "-" => Some(Impact::Cost),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Impact::Benefit => "+",
            Impact::Cost => "-",
        }
    }
}

impl Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The values of all the alternatives, one row per alternative and one
/// column per criterion.
///
/// Invariants: at least one row and one column, all the rows have the same
/// length and all the values are finite.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
    num_criteria: usize,
}

impl DecisionMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<DecisionMatrix, TopsisError> {
        let num_criteria = rows.first().map(|r| r.len()).ok_or(TopsisError::NoAlternatives)?;
        if num_criteria == 0 {
            return Err(TopsisError::InsufficientColumns { found: 1 });
        }
        for (ridx, row) in rows.iter().enumerate() {
            if row.len() != num_criteria {
                return Err(TopsisError::RaggedMatrix {
                    row: ridx + 1,
                    found: row.len(),
                    expected: num_criteria,
                });
            }
            if let Some(cidx) = row.iter().position(|x| !x.is_finite()) {
                return Err(TopsisError::NonFiniteValue {
                    row: ridx + 1,
                    column: cidx + 1,
                });
            }
        }
        Ok(DecisionMatrix { rows, num_criteria })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_alternatives(&self) -> usize {
        self.rows.len()
    }

    pub fn num_criteria(&self) -> usize {
        self.num_criteria
    }
}

/// One strictly positive weight per criterion.
#[derive(PartialEq, Debug, Clone)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    pub fn new(weights: Vec<f64>) -> Result<WeightVector, TopsisError> {
        for (idx, w) in weights.iter().enumerate() {
            if !w.is_finite() {
                return Err(TopsisError::MalformedWeights {
                    token: w.to_string(),
                });
            }
            if *w <= 0.0 {
                return Err(TopsisError::NonPositiveWeight {
                    index: idx + 1,
                    value: *w,
                });
            }
        }
        Ok(WeightVector(weights))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One impact per criterion.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ImpactVector(Vec<Impact>);

impl ImpactVector {
    pub fn new(impacts: Vec<Impact>) -> ImpactVector {
        ImpactVector(impacts)
    }

    pub fn values(&self) -> &[Impact] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Same form as on the command line: "+,-,+".
impl Display for ImpactVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbols: Vec<&str> = self.0.iter().map(|i| i.symbol()).collect();
        write!(f, "{}", symbols.join(","))
    }
}

/// The validated inputs of the algorithm.
///
/// `identifiers` has one entry per row of the matrix, in the same order.
#[derive(PartialEq, Debug, Clone)]
pub struct ValidatedInput {
    pub identifiers: Vec<String>,
    pub matrix: DecisionMatrix,
    pub weights: WeightVector,
    pub impacts: ImpactVector,
}

// ******** Output data structures *********

/// The outcome of the TOPSIS procedure.
///
/// All the vectors indexed by alternative follow the order of the rows of
/// the decision matrix.
#[derive(PartialEq, Debug, Clone)]
pub struct Scoring {
    /// Closeness to the ideal solution, in [0, 1] for non-negative data.
    pub scores: Vec<f64>,
    /// 1 is the best alternative. Always a permutation of 1..=N.
    pub ranks: Vec<u32>,
    /// Per criterion, in the weighted normalized space.
    pub ideal_best: Vec<f64>,
    pub ideal_worst: Vec<f64>,
    pub separation_best: Vec<f64>,
    pub separation_worst: Vec<f64>,
}

/// An alternative with its outcome.
#[derive(PartialEq, Debug, Clone)]
pub struct RankedAlternative {
    pub identifier: String,
    pub score: f64,
    pub rank: u32,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(PartialEq, Debug, Clone)]
pub enum TopsisError {
    /// One of the required inputs is absent or empty.
    MissingParameter { name: String },
    /// The table has fewer than 3 columns (identifier + 2 criteria).
    InsufficientColumns { found: usize },
    /// The table contains no alternative.
    NoAlternatives,
    /// `row` is 1-based and counts data rows only (the header is excluded).
    NonNumericCriterion {
        row: usize,
        column: String,
        content: String,
    },
    MalformedWeights { token: String },
    MalformedImpacts { token: String },
    NonPositiveWeight { index: usize, value: f64 },
    WeightCountMismatch { found: usize, expected: usize },
    ImpactCountMismatch { found: usize, expected: usize },
    InvalidImpactSymbol { token: String },
    RaggedMatrix {
        row: usize,
        found: usize,
        expected: usize,
    },
    NonFiniteValue { row: usize, column: usize },
    /// The criterion at this (1-based) index has only zero values.
    DegenerateCriterion { column: usize },
}

impl Error for TopsisError {}

impl Display for TopsisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopsisError::MissingParameter { name } => {
                write!(f, "Insufficient number of parameters: missing {}. Required: input_file, weights, impacts, result_file", name)
            }
            TopsisError::InsufficientColumns { found } => write!(
                f,
                "Input file must contain three or more columns (found {})",
                found
            ),
            TopsisError::NoAlternatives => write!(f, "Input file does not contain any row"),
            TopsisError::NonNumericCriterion {
                row,
                column,
                content,
            } => write!(
                f,
                "Columns from 2nd onwards must contain numeric values only: row {}, column {:?} contains {:?}",
                row, column, content
            ),
            TopsisError::MalformedWeights { token } => write!(
                f,
                "Invalid weights format: {:?} is not a number. Expected comma-separated numbers",
                token
            ),
            TopsisError::MalformedImpacts { token } => write!(
                f,
                "Invalid impacts format: {:?}. Expected comma-separated '+' or '-' symbols",
                token
            ),
            TopsisError::NonPositiveWeight { index, value } => write!(
                f,
                "Weights must be strictly positive, but weight {} is {}",
                index, value
            ),
            TopsisError::WeightCountMismatch { found, expected } => write!(
                f,
                "Number of weights ({}) should match number of criteria ({})",
                found, expected
            ),
            TopsisError::ImpactCountMismatch { found, expected } => write!(
                f,
                "Number of impacts ({}) should match number of criteria ({})",
                found, expected
            ),
            TopsisError::InvalidImpactSymbol { token } => write!(
                f,
                "Impacts must be either '+' or '-', but found {:?}",
                token
            ),
            TopsisError::RaggedMatrix {
                row,
                found,
                expected,
            } => write!(
                f,
                "Row {} has {} values, but {} criteria were expected",
                row, found, expected
            ),
            TopsisError::NonFiniteValue { row, column } => write!(
                f,
                "The value at row {}, criterion {} is not a finite number",
                row, column
            ),
            TopsisError::DegenerateCriterion { column } => write!(
                f,
                "Criterion {} only contains zeros and cannot be normalized",
                column
            ),
        }
    }
}
