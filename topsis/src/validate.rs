use log::debug;

pub use crate::config::*;

/// The minimum number of columns of a table: the identifier and two criteria.
pub const MIN_COLUMNS: usize = 3;

/// Checks that a required parameter is present and not blank.
///
/// ```
/// use topsis::validate::require_parameter;
///
/// assert_eq!(require_parameter("weights", Some("1,1,1")), Ok("1,1,1"));
/// assert!(require_parameter("weights", Some("  ")).is_err());
/// assert!(require_parameter("weights", None).is_err());
/// ```
pub fn require_parameter<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, TopsisError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(TopsisError::MissingParameter {
            name: name.to_string(),
        }),
    }
}

/// Turns a raw table and the textual weights and impacts into the inputs of
/// the algorithm.
///
/// The checks run in a fixed order and the first failure is returned:
/// shape of the table, numeric criteria, weight tokens, impact tokens, then
/// the number of weights and of impacts.
pub fn validate(
    table: &RawTable,
    weights_text: &str,
    impacts_text: &str,
) -> Result<ValidatedInput, TopsisError> {
    let num_columns = table.num_columns();
    if num_columns < MIN_COLUMNS {
        return Err(TopsisError::InsufficientColumns { found: num_columns });
    }
    let num_criteria = num_columns - 1;
    debug!(
        "validate: {} rows, {} criteria",
        table.rows.len(),
        num_criteria
    );

    let (identifiers, rows) = numeric_rows(table)?;

    let weights = parse_weights(weights_text)?;
    let impacts = parse_impacts(impacts_text)?;

    if weights.len() != num_criteria {
        return Err(TopsisError::WeightCountMismatch {
            found: weights.len(),
            expected: num_criteria,
        });
    }
    if impacts.len() != num_criteria {
        return Err(TopsisError::ImpactCountMismatch {
            found: impacts.len(),
            expected: num_criteria,
        });
    }

    Ok(ValidatedInput {
        identifiers,
        matrix: DecisionMatrix::new(rows)?,
        weights,
        impacts,
    })
}

/// Parses a comma-separated list of strictly positive numbers.
pub fn parse_weights(text: &str) -> Result<WeightVector, TopsisError> {
    let mut weights: Vec<f64> = Vec::new();
    for token in text.split(',').map(|s| s.trim()) {
        match token.parse::<f64>() {
            Ok(w) if w.is_finite() => weights.push(w),
            _ => {
                return Err(TopsisError::MalformedWeights {
                    token: token.to_string(),
                })
            }
        }
    }
    WeightVector::new(weights)
}

/// Parses a comma-separated list of `+` and `-` symbols.
pub fn parse_impacts(text: &str) -> Result<ImpactVector, TopsisError> {
    let mut impacts: Vec<Impact> = Vec::new();
    for token in text.split(',').map(|s| s.trim()) {
        if token.is_empty() {
            return Err(TopsisError::MalformedImpacts {
                token: token.to_string(),
            });
        }
        let impact = Impact::from_symbol(token).ok_or_else(|| TopsisError::InvalidImpactSymbol {
            token: token.to_string(),
        })?;
        impacts.push(impact);
    }
    Ok(ImpactVector::new(impacts))
}

// Splits the rows between the identifiers and the numeric values.
// The whole criteria region is scanned before reporting, row by row.
fn numeric_rows(table: &RawTable) -> Result<(Vec<String>, Vec<Vec<f64>>), TopsisError> {
    if table.rows.is_empty() {
        return Err(TopsisError::NoAlternatives);
    }
    let num_columns = table.num_columns();
    let mut identifiers: Vec<String> = Vec::with_capacity(table.rows.len());
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(table.rows.len());
    for (ridx, row) in table.rows.iter().enumerate() {
        identifiers.push(row.first().map(|c| c.to_string()).unwrap_or_default());
        let mut values: Vec<f64> = Vec::with_capacity(num_columns - 1);
        for cidx in 1..num_columns {
            // Short rows are padded with empty cells, which are rejected below.
            let cell = row.get(cidx).unwrap_or(&Cell::Empty);
            match cell.as_number() {
                Some(x) => values.push(x),
                None => {
                    return Err(TopsisError::NonNumericCriterion {
                        row: ridx + 1,
                        column: table.header[cidx].clone(),
                        content: cell.to_string(),
                    })
                }
            }
        }
        rows.push(values);
    }
    Ok((identifiers, rows))
}
