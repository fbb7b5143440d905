pub use crate::config::*;
use crate::validate::{parse_impacts, parse_weights};

/// A builder for adding alternatives one at a time.
///
/// It is the simplest entry point when the data does not come from a table.
///
/// ```
/// use topsis::builder::Builder;
/// # use topsis::TopsisError;
///
/// let mut builder = Builder::new("1,1", "+,-")?;
/// builder.add_alternative("Anna", &[8.0, 120.0])?;
/// builder.add_alternative("Bob", &[6.0, 100.0])?;
///
/// let ranking = builder.rank()?;
/// assert_eq!(ranking.len(), 2);
///
/// # Ok::<(), TopsisError>(())
/// ```
pub struct Builder {
    pub(crate) _weights: WeightVector,
    pub(crate) _impacts: ImpactVector,
    pub(crate) _identifiers: Vec<String>,
    pub(crate) _rows: Vec<Vec<f64>>,
}

impl Builder {
    /// Creates a builder from the textual weights and impacts, for example
    /// `"1,1,2"` and `"+,-,+"`.
    pub fn new(weights: &str, impacts: &str) -> Result<Builder, TopsisError> {
        let weights = parse_weights(weights)?;
        let impacts = parse_impacts(impacts)?;
        Builder::with_vectors(weights, impacts)
    }

    pub fn with_vectors(weights: WeightVector, impacts: ImpactVector) -> Result<Builder, TopsisError> {
        if impacts.len() != weights.len() {
            return Err(TopsisError::ImpactCountMismatch {
                found: impacts.len(),
                expected: weights.len(),
            });
        }
        Ok(Builder {
            _weights: weights,
            _impacts: impacts,
            _identifiers: Vec::new(),
            _rows: Vec::new(),
        })
    }

    /// Adds an alternative.
    ///
    /// values: one value per criterion, in the order of the weights.
    pub fn add_alternative(&mut self, identifier: &str, values: &[f64]) -> Result<(), TopsisError> {
        let row = self._rows.len() + 1;
        if values.len() != self._weights.len() {
            return Err(TopsisError::RaggedMatrix {
                row,
                found: values.len(),
                expected: self._weights.len(),
            });
        }
        if let Some(cidx) = values.iter().position(|x| !x.is_finite()) {
            return Err(TopsisError::NonFiniteValue {
                row,
                column: cidx + 1,
            });
        }
        self._identifiers.push(identifier.to_string());
        self._rows.push(values.to_vec());
        Ok(())
    }

    pub fn validated(&self) -> Result<ValidatedInput, TopsisError> {
        Ok(ValidatedInput {
            identifiers: self._identifiers.clone(),
            matrix: DecisionMatrix::new(self._rows.clone())?,
            weights: self._weights.clone(),
            impacts: self._impacts.clone(),
        })
    }

    /// Runs the algorithm and returns the alternatives in input order.
    pub fn run(&self) -> Result<Vec<RankedAlternative>, TopsisError> {
        let input = self.validated()?;
        let scoring = crate::score(&input.matrix, &input.weights, &input.impacts)?;
        Ok(input
            .identifiers
            .into_iter()
            .zip(scoring.scores)
            .zip(scoring.ranks)
            .map(|((identifier, score), rank)| RankedAlternative {
                identifier,
                score,
                rank,
            })
            .collect())
    }

    /// Runs the algorithm and returns the alternatives from the best to the
    /// worst.
    pub fn rank(&self) -> Result<Vec<RankedAlternative>, TopsisError> {
        let mut res = self.run()?;
        res.sort_by_key(|a| a.rank);
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_order() {
        let mut b = Builder::new("1,1", "+,-").unwrap();
        b.add_alternative("cheap", &[5.0, 10.0]).unwrap();
        b.add_alternative("good", &[9.0, 12.0]).unwrap();
        b.add_alternative("bad", &[2.0, 20.0]).unwrap();
        let in_order = b.run().unwrap();
        assert_eq!(
            in_order.iter().map(|a| a.identifier.as_str()).collect::<Vec<_>>(),
            vec!["cheap", "good", "bad"]
        );
        let ranked = b.rank().unwrap();
        assert_eq!(ranked[2].identifier, "bad");
        assert_eq!(ranked.iter().map(|a| a.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn wrong_number_of_values() {
        let mut b = Builder::new("1,1,1", "+,-,+").unwrap();
        assert_eq!(
            b.add_alternative("x", &[1.0, 2.0]),
            Err(TopsisError::RaggedMatrix {
                row: 1,
                found: 2,
                expected: 3
            })
        );
        assert!(b.add_alternative("y", &[1.0, f64::INFINITY, 2.0]).is_err());
    }

    #[test]
    fn impacts_must_match_weights() {
        assert!(matches!(
            Builder::new("1,1", "+"),
            Err(TopsisError::ImpactCountMismatch {
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn empty_builder() {
        let b = Builder::new("1,1", "+,+").unwrap();
        assert_eq!(b.run(), Err(TopsisError::NoAlternatives));
    }
}
