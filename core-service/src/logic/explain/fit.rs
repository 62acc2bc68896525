//! Locality-weighted linear fit
//!
//! Pure numeric routines: kernel weights, weighted ridge regression with
//! intercept, weighted R², and sparse feature selection.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::types::ExplainError;

/// Budgets up to this size use greedy forward selection
pub const FORWARD_SELECTION_MAX: usize = 6;

/// Near-zero penalty for selection fits
const SELECTION_ALPHA: f64 = 1e-6;

/// Penalty for the all-features fit behind highest-weight selection
const HIGHEST_WEIGHTS_ALPHA: f64 = 0.01;

const PIVOT_EPSILON: f64 = 1e-12;

/// Linear model `y = intercept + x · coefficients`
#[derive(Debug, Clone)]
pub struct RidgeFit {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl RidgeFit {
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        x.dot(&self.coefficients) + self.intercept
    }

    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>, w: &Array1<f64>) -> f64 {
        weighted_r2(y, &self.predict(x), w)
    }
}

/// Cosine distance between a mask row and the reference row
///
/// A zero vector is at distance 1 from everything.
pub fn cosine_distance(row: ArrayView1<f64>, reference: ArrayView1<f64>) -> f64 {
    let norm_a = row.dot(&row).sqrt();
    let norm_b = reference.dot(&reference).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - row.dot(&reference) / (norm_a * norm_b)
}

/// Exponential kernel on cosine distance to row 0 (scaled x100)
pub fn kernel_weights(masks: &Array2<f64>, width: f64) -> Array1<f64> {
    let reference = masks.row(0);
    masks
        .rows()
        .into_iter()
        .map(|row| {
            let d = cosine_distance(row, reference) * 100.0;
            (-(d * d) / (width * width)).exp().sqrt()
        })
        .collect()
}

/// Weighted ridge regression with an unpenalised intercept
pub fn weighted_ridge(
    x: &Array2<f64>,
    y: &Array1<f64>,
    w: &Array1<f64>,
    alpha: f64,
) -> Result<RidgeFit, ExplainError> {
    let (n, d) = x.dim();
    if y.len() != n || w.len() != n {
        return Err(ExplainError::FitFailed(format!(
            "shape mismatch: x={}x{}, y={}, w={}",
            n, d, y.len(), w.len()
        )));
    }

    let total_weight = w.sum();
    if !(total_weight > 0.0) {
        return Err(ExplainError::FitFailed("sample weights sum to zero".to_string()));
    }

    let y_mean = w.dot(y) / total_weight;
    if d == 0 {
        return Ok(RidgeFit {
            coefficients: Array1::zeros(0),
            intercept: y_mean,
        });
    }

    let x_mean = x.t().dot(w) / total_weight;
    let xc = x - &x_mean;
    let yc = y - y_mean;
    let xw = &xc * &w.view().insert_axis(Axis(1));

    let gram = xw.t().dot(&xc) + Array2::<f64>::eye(d) * alpha;
    let rhs = xw.t().dot(&yc);

    let coefficients = solve(gram, rhs)
        .ok_or_else(|| ExplainError::FitFailed("singular normal equations".to_string()))?;
    let intercept = y_mean - x_mean.dot(&coefficients);

    Ok(RidgeFit { coefficients, intercept })
}

/// Weighted coefficient of determination
///
/// A constant target scores 1.0 when predicted exactly, 0.0 otherwise.
pub fn weighted_r2(y: &Array1<f64>, pred: &Array1<f64>, w: &Array1<f64>) -> f64 {
    let total_weight = w.sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let y_mean = w.dot(y) / total_weight;

    let residual: f64 = y.iter().zip(pred).zip(w).map(|((a, b), wi)| wi * (a - b).powi(2)).sum();
    let total: f64 = y.iter().zip(w).map(|(a, wi)| wi * (a - y_mean).powi(2)).sum();

    if total <= f64::EPSILON {
        return if residual <= f64::EPSILON { 1.0 } else { 0.0 };
    }
    1.0 - residual / total
}

/// Pick at most `budget` feature columns
pub fn select_features(
    x: &Array2<f64>,
    y: &Array1<f64>,
    w: &Array1<f64>,
    budget: usize,
) -> Result<Vec<usize>, ExplainError> {
    let budget = budget.min(x.ncols());
    if budget <= FORWARD_SELECTION_MAX {
        forward_selection(x, y, w, budget)
    } else {
        highest_weights(x, y, w, budget)
    }
}

/// Greedily add the column that most improves weighted R²
pub fn forward_selection(
    x: &Array2<f64>,
    y: &Array1<f64>,
    w: &Array1<f64>,
    budget: usize,
) -> Result<Vec<usize>, ExplainError> {
    let mut used: Vec<usize> = Vec::with_capacity(budget);

    for _ in 0..budget.min(x.ncols()) {
        let mut best: Option<(usize, f64)> = None;

        for candidate in (0..x.ncols()).filter(|c| !used.contains(c)) {
            let mut cols = used.clone();
            cols.push(candidate);
            let sub = x.select(Axis(1), &cols);

            // Degenerate column sets just lose the round
            let Ok(fit) = weighted_ridge(&sub, y, w, SELECTION_ALPHA) else {
                continue;
            };
            let score = fit.score(&sub, y, w);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((col, _)) => used.push(col),
            None => break,
        }
    }

    Ok(used)
}

/// Columns with the largest |coefficient| in a full fit
pub fn highest_weights(
    x: &Array2<f64>,
    y: &Array1<f64>,
    w: &Array1<f64>,
    budget: usize,
) -> Result<Vec<usize>, ExplainError> {
    let fit = weighted_ridge(x, y, w, HIGHEST_WEIGHTS_ALPHA)?;
    let mut order: Vec<usize> = (0..x.ncols()).collect();
    order.sort_by(|&a, &b| {
        fit.coefficients[b]
            .abs()
            .partial_cmp(&fit.coefficients[a].abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(budget);
    Ok(order)
}

/// Solve `a · x = b` by Gaussian elimination with partial pivoting
pub fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    if a.dim() != (n, n) {
        return None;
    }

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| {
            a[[i, col]]
                .abs()
                .partial_cmp(&a[[j, col]].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[[pivot, col]].abs() < PIVOT_EPSILON {
            return None;
        }
        if pivot != col {
            for k in 0..n {
                a.swap([pivot, k], [col, k]);
            }
            b.swap(pivot, col);
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Some(x)
}
