//! Comparison oracles for validating device outputs against a reference.
//!
//! All comparators return a [`ComparisonResult`] value: a failing metric is
//! reported through `passed = false`, never through an error. The only hard
//! error at this boundary is a shape mismatch between the two tensors.
use crate::{Error, Result, Tensor};
use tracing::warn;

/// Absolute and relative tolerances for elementwise closeness checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub atol: f64,
    pub rtol: f64,
}

impl Tolerance {
    pub const fn new(atol: f64, rtol: f64) -> Self {
        Self { atol, rtol }
    }
}

impl Default for Tolerance {
    /// The tolerances applied when the correlation metric degenerates to an
    /// elementwise check. These match the sweep harness this oracle was
    /// extracted from; operators with different numeric behavior should pass
    /// their own values through [`comp_pcc_with_tolerance`].
    fn default() -> Self {
        Self {
            atol: 1e-4,
            rtol: 0.17,
        }
    }
}

/// The outcome of a single oracle comparison.
///
/// `metric` is the Pearson correlation coefficient for the pcc comparators
/// and the maximum absolute delta for [`comp_equal`] and [`comp_allclose`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub passed: bool,
    pub metric: f64,
    pub message: String,
}

fn check_same_shape(op: &'static str, expected: &Tensor, actual: &Tensor) -> Result<()> {
    if expected.shape() != actual.shape() {
        return Err(Error::ShapeMismatchCompare {
            op,
            expected: expected.shape().clone(),
            actual: actual.shape().clone(),
        });
    }
    Ok(())
}

fn all_close(expected: &[f64], actual: &[f64], tolerance: Tolerance) -> bool {
    expected
        .iter()
        .zip(actual.iter())
        .all(|(e, a)| (e - a).abs() <= tolerance.atol + tolerance.rtol * a.abs())
}

fn max_abs_delta(expected: &[f64], actual: &[f64]) -> f64 {
    expected
        .iter()
        .zip(actual.iter())
        .map(|(e, a)| (e - a).abs())
        .filter(|d| d.is_finite())
        .fold(0f64, f64::max)
}

fn pearson(expected: &[f64], actual: &[f64], fallback: Tolerance) -> f64 {
    if expected.is_empty() {
        return 1.0;
    }
    let expected_all_nan = expected.iter().all(|v| v.is_nan());
    let actual_all_nan = actual.iter().all(|v| v.is_nan());
    if expected_all_nan && actual_all_nan {
        warn!("both tensors are entirely NaN");
        return 1.0;
    }
    if expected_all_nan || actual_all_nan {
        warn!("exactly one tensor is entirely NaN");
        return 0.0;
    }

    // Mask non-finite values to zero on both sides before correlating.
    let expected: Vec<f64> = expected
        .iter()
        .map(|v| if v.is_finite() { *v } else { 0.0 })
        .collect();
    let actual: Vec<f64> = actual
        .iter()
        .map(|v| if v.is_finite() { *v } else { 0.0 })
        .collect();

    let expected_any_nonzero = expected.iter().any(|v| *v != 0.0);
    let actual_any_nonzero = actual.iter().any(|v| *v != 0.0);
    if expected_any_nonzero != actual_any_nonzero {
        warn!("one tensor is entirely zero, the other is not");
        return 0.0;
    }
    if expected == actual {
        return 1.0;
    }

    let n = expected.len() as f64;
    let expected_mean = expected.iter().sum::<f64>() / n;
    let actual_mean = actual.iter().sum::<f64>() / n;
    let mut covariance = 0f64;
    let mut expected_var = 0f64;
    let mut actual_var = 0f64;
    for (e, a) in expected.iter().zip(actual.iter()) {
        let de = e - expected_mean;
        let da = a - actual_mean;
        covariance += de * da;
        expected_var += de * de;
        actual_var += da * da;
    }
    if expected_var == 0.0 || actual_var == 0.0 {
        // A constant sequence has no defined correlation; fall back to an
        // elementwise tolerance check instead of dividing by zero.
        return if all_close(&expected, &actual, fallback) {
            1.0
        } else {
            0.0
        };
    }
    covariance / (expected_var.sqrt() * actual_var.sqrt())
}

/// Compares two shape-compatible tensors through the Pearson correlation
/// coefficient, using the default zero-variance fallback tolerances.
pub fn comp_pcc(expected: &Tensor, actual: &Tensor, threshold: f64) -> Result<ComparisonResult> {
    comp_pcc_with_tolerance(expected, actual, threshold, Tolerance::default())
}

/// Same as [`comp_pcc`] with an explicit zero-variance fallback tolerance.
///
/// The verdict is `metric >= threshold`; a below-threshold metric is the
/// normal failing-test path and is never an error. Calling this twice with
/// identical inputs returns bit-identical results.
pub fn comp_pcc_with_tolerance(
    expected: &Tensor,
    actual: &Tensor,
    threshold: f64,
    fallback: Tolerance,
) -> Result<ComparisonResult> {
    check_same_shape("comp_pcc", expected, actual)?;
    let metric = pearson(&expected.to_f64_vec(), &actual.to_f64_vec(), fallback);
    Ok(ComparisonResult {
        passed: metric >= threshold,
        metric,
        message: format!("pcc: {metric:.6}, threshold: {threshold}"),
    })
}

/// Checks two shape-compatible tensors for exact equality. NaNs at matching
/// positions count as equal so all-NaN goldens remain usable.
pub fn comp_equal(expected: &Tensor, actual: &Tensor) -> Result<ComparisonResult> {
    check_same_shape("comp_equal", expected, actual)?;
    let expected = expected.to_f64_vec();
    let actual = actual.to_f64_vec();
    let passed = expected
        .iter()
        .zip(actual.iter())
        .all(|(e, a)| e == a || (e.is_nan() && a.is_nan()));
    let metric = max_abs_delta(&expected, &actual);
    Ok(ComparisonResult {
        passed,
        metric,
        message: format!("max absolute delta: {metric:.3e}"),
    })
}

/// Checks that every element of `actual` is within `tolerance` of the
/// corresponding element of `expected`.
pub fn comp_allclose(
    expected: &Tensor,
    actual: &Tensor,
    tolerance: Tolerance,
) -> Result<ComparisonResult> {
    check_same_shape("comp_allclose", expected, actual)?;
    let expected = expected.to_f64_vec();
    let actual = actual.to_f64_vec();
    let passed = all_close(&expected, &actual, tolerance);
    let metric = max_abs_delta(&expected, &actual);
    Ok(ComparisonResult {
        passed,
        metric,
        message: format!(
            "max absolute delta: {metric:.3e}, atol: {}, rtol: {}",
            tolerance.atol, tolerance.rtol
        ),
    })
}
