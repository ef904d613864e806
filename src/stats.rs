//! Descriptive statistics and univariate least-squares regression.

use std::fmt;
use thiserror::Error;

/// Error raised when a statistic is undefined for the given input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("mean of an empty sequence is undefined")]
    Empty,

    #[error("at least {min} values are required, but got {len}")]
    TooShort { min: usize, len: usize },

    #[error("sequences must have equal length, but have {0} and {1}")]
    LengthMismatch(usize, usize),

    #[error("slope is undefined because x has zero standard deviation")]
    ConstantPredictor,

    #[error("r squared is undefined because y has zero total sum of squares")]
    ConstantResponse,
}

/// Straight line `y = beta * x + alpha` fitted by least squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Intercept.
    pub alpha: f64,
    /// Slope.
    pub beta: f64,
}

impl Fit {
    pub fn predict(&self, x: f64) -> f64 {
        self.beta * x + self.alpha
    }

    pub fn error(&self, x: f64, y: f64) -> f64 {
        self.predict(x) - y
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.alpha, self.beta)
    }
}

/// Mean and sample standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    pub fn of(vals: &[f64]) -> Result<Self, DomainError> {
        Ok(Self {
            mean: mean(vals)?,
            std_dev: std_dev(vals)?,
        })
    }
}

pub fn mean(vals: &[f64]) -> Result<f64, DomainError> {
    if vals.is_empty() {
        return Err(DomainError::Empty);
    }
    Ok(vals.iter().sum::<f64>() / vals.len() as f64)
}

/// Deviations of each value from the mean.
pub fn de_mean(vals: &[f64]) -> Result<Vec<f64>, DomainError> {
    let mean = mean(vals)?;
    Ok(vals.iter().map(|&val| val - mean).collect())
}

pub fn dot(v: &[f64], w: &[f64]) -> Result<f64, DomainError> {
    check_same_len(v, w)?;
    Ok(v.iter().zip(w).map(|(v_i, w_i)| v_i * w_i).sum())
}

pub fn sum_of_squares(vals: &[f64]) -> f64 {
    vals.iter().map(|val| val * val).sum()
}

/// Sample variance (n - 1 denominator).
pub fn variance(vals: &[f64]) -> Result<f64, DomainError> {
    let n_vals = vals.len();
    check_min_len(n_vals, 2)?;
    Ok(sum_of_squares(&de_mean(vals)?) / (n_vals - 1) as f64)
}

pub fn std_dev(vals: &[f64]) -> Result<f64, DomainError> {
    Ok(variance(vals)?.sqrt())
}

/// Sample covariance (n - 1 denominator).
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64, DomainError> {
    check_same_len(x, y)?;
    let n_vals = x.len();
    check_min_len(n_vals, 2)?;
    Ok(dot(&de_mean(x)?, &de_mean(y)?)? / (n_vals - 1) as f64)
}

/// Pearson correlation coefficient.
///
/// Returns `0.0` when either sequence is constant.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64, DomainError> {
    let std_dev_x = std_dev(x)?;
    let std_dev_y = std_dev(y)?;
    if std_dev_x > 0.0 && std_dev_y > 0.0 {
        Ok(covariance(x, y)? / std_dev_x / std_dev_y)
    } else {
        check_same_len(x, y)?;
        Ok(0.0)
    }
}

/// Fit `y = beta * x + alpha` minimizing the sum of squared vertical residuals.
pub fn least_squares_fit(x: &[f64], y: &[f64]) -> Result<Fit, DomainError> {
    let std_dev_x = std_dev(x)?;
    if std_dev_x == 0.0 {
        return Err(DomainError::ConstantPredictor);
    }
    let beta = correlation(x, y)? * std_dev(y)? / std_dev_x;
    let alpha = mean(y)? - beta * mean(x)?;
    Ok(Fit { alpha, beta })
}

pub fn sum_of_squared_errors(fit: &Fit, x: &[f64], y: &[f64]) -> Result<f64, DomainError> {
    check_same_len(x, y)?;
    Ok(x.iter()
        .zip(y)
        .map(|(&x_i, &y_i)| fit.error(x_i, y_i).powi(2))
        .sum())
}

pub fn total_sum_of_squares(y: &[f64]) -> Result<f64, DomainError> {
    Ok(sum_of_squares(&de_mean(y)?))
}

/// Fraction of the variation in `y` explained by `fit`.
pub fn r_squared(fit: &Fit, x: &[f64], y: &[f64]) -> Result<f64, DomainError> {
    let sse = sum_of_squared_errors(fit, x, y)?;
    let sst = total_sum_of_squares(y)?;
    if sst == 0.0 {
        return Err(DomainError::ConstantResponse);
    }
    Ok(1.0 - sse / sst)
}

fn check_same_len(x: &[f64], y: &[f64]) -> Result<(), DomainError> {
    if x.len() != y.len() {
        return Err(DomainError::LengthMismatch(x.len(), y.len()));
    }
    Ok(())
}

fn check_min_len(len: usize, min: usize) -> Result<(), DomainError> {
    if len < min {
        return Err(DomainError::TooShort { min, len });
    }
    Ok(())
}
