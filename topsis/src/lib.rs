/*!
Multi-criteria decision analysis with TOPSIS (Technique for Order of
Preference by Similarity to Ideal Solution).

A set of alternatives is scored on several criteria. Each criterion has a
weight and an impact: `+` when higher values are better (benefit), `-` when
lower values are better (cost). TOPSIS ranks the alternatives by their
relative closeness to the ideal best point and their distance from the ideal
worst point.

The crate has two entry points:
* [validate::validate] turns a raw table and the textual weights and
  impacts into a [ValidatedInput]
* [score] runs the algorithm on validated inputs

```
use topsis::*;

let matrix = DecisionMatrix::new(vec![
    vec![250.0, 16.0, 12.0, 5.0],
    vec![200.0, 16.0, 8.0, 3.0],
    vec![300.0, 32.0, 16.0, 4.0],
])?;
let weights = WeightVector::new(vec![1.0, 1.0, 1.0, 1.0])?;
let impacts = ImpactVector::new(vec![
    Impact::Cost,
    Impact::Benefit,
    Impact::Benefit,
    Impact::Benefit,
]);

let scoring = score(&matrix, &weights, &impacts)?;
assert_eq!(scoring.ranks.len(), 3);
assert_eq!(scoring.ranks[2], 1);
# Ok::<(), TopsisError>(())
```

See the [manual] for the command line tool.
*/

pub mod builder;
mod config;
pub mod manual;
pub mod quick_start;
pub mod validate;

use log::{debug, info};

pub use crate::config::*;

/// Runs the TOPSIS procedure.
///
/// Arguments:
/// * `matrix` the values of the alternatives, one row per alternative
/// * `weights` one weight per criterion
/// * `impacts` one impact per criterion
///
/// A criterion whose values are all zero cannot be normalized and is
/// reported as [TopsisError::DegenerateCriterion]. An alternative that is
/// at distance zero from both ideal points gets a score of 0.
pub fn score(
    matrix: &DecisionMatrix,
    weights: &WeightVector,
    impacts: &ImpactVector,
) -> Result<Scoring, TopsisError> {
    let num_criteria = matrix.num_criteria();
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
    info!(
        "Processing {} alternatives on {} criteria",
        matrix.num_alternatives(),
        num_criteria
    );

    debug!("score: impacts: {}", impacts);

    let norms = column_norms(matrix)?;
    debug!("score: column norms: {:?}", norms);

    let weighted: Vec<Vec<f64>> = matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(norms.iter())
                .zip(weights.values())
                .map(|((x, norm), w)| x / norm * w)
                .collect()
        })
        .collect();

    let (ideal_best, ideal_worst) = ideal_points(&weighted, impacts);
    debug!("score: ideal best: {:?}", ideal_best);
    debug!("score: ideal worst: {:?}", ideal_worst);

    let separation_best: Vec<f64> = weighted.iter().map(|r| distance(r, &ideal_best)).collect();
    let separation_worst: Vec<f64> = weighted.iter().map(|r| distance(r, &ideal_worst)).collect();
    debug!("score: separation from best: {:?}", separation_best);
    debug!("score: separation from worst: {:?}", separation_worst);

    let scores: Vec<f64> = separation_best
        .iter()
        .zip(separation_worst.iter())
        .map(|(sb, sw)| closeness(*sb, *sw))
        .collect();
    let ranks = rank_scores(&scores);

    for (idx, (s, r)) in scores.iter().zip(ranks.iter()).enumerate() {
        info!("Alternative {}: score {:.6} rank {}", idx + 1, s, r);
    }

    Ok(Scoring {
        scores,
        ranks,
        ideal_best,
        ideal_worst,
        separation_best,
        separation_worst,
    })
}

// Euclidean norm of each column. `hypot` keeps the intermediate values in
// range for very large or very small inputs.
fn column_norms(matrix: &DecisionMatrix) -> Result<Vec<f64>, TopsisError> {
    (0..matrix.num_criteria())
        .map(|cidx| {
            if matrix.rows().iter().all(|row| row[cidx] == 0.0) {
                return Err(TopsisError::DegenerateCriterion { column: cidx + 1 });
            }
            Ok(matrix
                .rows()
                .iter()
                .map(|row| row[cidx])
                .fold(0.0, f64::hypot))
        })
        .collect()
}

// The matrix is never empty at this point.
fn ideal_points(weighted: &[Vec<f64>], impacts: &ImpactVector) -> (Vec<f64>, Vec<f64>) {
    let mut best: Vec<f64> = Vec::with_capacity(impacts.len());
    let mut worst: Vec<f64> = Vec::with_capacity(impacts.len());
    for (cidx, impact) in impacts.values().iter().enumerate() {
        let max = weighted
            .iter()
            .map(|r| r[cidx])
            .fold(f64::NEG_INFINITY, f64::max);
        let min = weighted.iter().map(|r| r[cidx]).fold(f64::INFINITY, f64::min);
        match impact {
            Impact::Benefit => {
                best.push(max);
                worst.push(min);
            }
            Impact::Cost => {
                best.push(min);
                worst.push(max);
            }
        }
    }
    (best, worst)
}

fn distance(row: &[f64], point: &[f64]) -> f64 {
    row.iter()
        .zip(point.iter())
        .map(|(x, p)| x - p)
        .fold(0.0, f64::hypot)
}

fn closeness(separation_best: f64, separation_worst: f64) -> f64 {
    let total = separation_best + separation_worst;
    if total == 0.0 {
        0.0
    } else {
        separation_worst / total
    }
}

/// Ranks scores from the highest (rank 1) to the lowest.
///
/// This is a double argsort: the position of each score in a stable
/// ascending sort gives the rank `N - position`. Equal scores never share a
/// rank, the one that appears last in the input gets the better rank.
///
/// ```
/// assert_eq!(topsis::rank_scores(&[0.2, 0.9, 0.5]), vec![3, 1, 2]);
/// assert_eq!(topsis::rank_scores(&[0.5, 0.5]), vec![2, 1]);
/// ```
pub fn rank_scores(scores: &[f64]) -> Vec<u32> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| scores[*a].total_cmp(&scores[*b]));
    let mut ranks: Vec<u32> = vec![0; n];
    for (position, idx) in order.iter().enumerate() {
        ranks[*idx] = (n - position) as u32;
    }
    ranks
}
