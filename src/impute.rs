//! Mean imputation and unit scaling.

use crate::config::Units;
use crate::model::{Dataset, Variable};
use crate::stats::{DomainError, mean};
use serde::{Deserialize, Serialize};

/// What to do when a column has no values to average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputeStrategy {
    /// Leave the whole dataset untouched.
    #[default]
    Lenient,
    /// Fail with the underlying [`DomainError`].
    Strict,
}

/// Replace every missing value with the mean of the present values of its column.
///
/// All column means are computed before anything is written, so the dataset is
/// never partially imputed.
pub fn impute(dataset: &mut Dataset, strategy: ImputeStrategy) -> Result<(), DomainError> {
    let mut means = Vec::with_capacity(Variable::METRICS.len());
    for var in Variable::METRICS {
        match mean(&dataset.present_values(var)) {
            Ok(val) => means.push((var, val)),
            Err(err) => match strategy {
                ImputeStrategy::Lenient => {
                    log::debug!("skipping imputation: {var}: {err}");
                    return Ok(());
                }
                ImputeStrategy::Strict => return Err(err),
            },
        }
    }

    let mut n_imputed = 0;
    for obs in &mut dataset.obs_vec {
        for &(var, val) in &means {
            if let Some(field) = obs.field_mut(var)
                && field.is_none()
            {
                *field = Some(val);
                n_imputed += 1;
            }
        }
    }
    log::debug!("imputed {n_imputed} values");

    Ok(())
}

/// Multiply every present value by its unit factor. Missing values stay missing.
pub fn scale_units(dataset: &mut Dataset, units: &Units) {
    for obs in &mut dataset.obs_vec {
        if let Some(fuel) = obs.fuel.as_mut() {
            *fuel *= units.fuel;
        }
        if let Some(enplanements) = obs.enplanements.as_mut() {
            *enplanements *= units.enplanements;
        }
        if let Some(revenue) = obs.revenue.as_mut() {
            *revenue *= units.revenue;
        }
    }
}
