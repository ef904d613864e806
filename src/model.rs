//! Dataset types.

use anyhow::{Result, bail};
use std::fmt;

/// One row of the input file.
///
/// Numeric fields are `None` when the value is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub year: i32,
    pub fuel: Option<f64>,
    pub enplanements: Option<f64>,
    pub revenue: Option<f64>,
}

impl Observation {
    pub fn new(year: i32, fuel: f64, enplanements: f64, revenue: f64) -> Self {
        Self {
            year,
            fuel: Some(fuel),
            enplanements: Some(enplanements),
            revenue: Some(revenue),
        }
    }

    /// Get a value of the observation; the year is always present.
    pub fn get(&self, var: Variable) -> Option<f64> {
        match var {
            Variable::Year => Some(self.year as f64),
            Variable::Fuel => self.fuel,
            Variable::Enplanements => self.enplanements,
            Variable::Revenue => self.revenue,
        }
    }

    /// Get a mutable reference to a numeric field.
    ///
    /// Returns `None` for [`Variable::Year`], which is not numeric data.
    pub fn field_mut(&mut self, var: Variable) -> Option<&mut Option<f64>> {
        match var {
            Variable::Year => None,
            Variable::Fuel => Some(&mut self.fuel),
            Variable::Enplanements => Some(&mut self.enplanements),
            Variable::Revenue => Some(&mut self.revenue),
        }
    }
}

/// Column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Year,
    Fuel,
    Enplanements,
    Revenue,
}

impl Variable {
    /// Columns holding measured values.
    pub const METRICS: [Variable; 3] = [Variable::Fuel, Variable::Enplanements, Variable::Revenue];

    pub fn label(self) -> &'static str {
        match self {
            Variable::Year => "year",
            Variable::Fuel => "fuel consumption",
            Variable::Enplanements => "enplanements",
            Variable::Revenue => "revenue stream",
        }
    }

    /// Short name usable in file names.
    pub fn slug(self) -> &'static str {
        match self {
            Variable::Year => "year",
            Variable::Fuel => "fuel",
            Variable::Enplanements => "enplanements",
            Variable::Revenue => "revenue",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pairs `(x, y)` regressed by the `regress` command.
pub const REGRESSION_PAIRS: [(Variable, Variable); 6] = [
    (Variable::Year, Variable::Fuel),
    (Variable::Year, Variable::Enplanements),
    (Variable::Year, Variable::Revenue),
    (Variable::Enplanements, Variable::Fuel),
    (Variable::Enplanements, Variable::Revenue),
    (Variable::Fuel, Variable::Revenue),
];

/// Observations in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub obs_vec: Vec<Observation>,
}

impl Dataset {
    pub fn new(obs_vec: Vec<Observation>) -> Self {
        Self { obs_vec }
    }

    /// Get a full column.
    ///
    /// # Errors
    /// Returns an error if any value of the column is missing.
    pub fn values(&self, var: Variable) -> Result<Vec<f64>> {
        let mut vals = Vec::with_capacity(self.obs_vec.len());
        for obs in &self.obs_vec {
            match obs.get(var) {
                Some(val) => vals.push(val),
                None => bail!("{var} is missing for year {}", obs.year),
            }
        }
        Ok(vals)
    }

    /// Get the values of a column that are present, skipping missing ones.
    pub fn present_values(&self, var: Variable) -> Vec<f64> {
        self.obs_vec.iter().filter_map(|obs| obs.get(var)).collect()
    }

    pub fn n_missing(&self) -> usize {
        self.obs_vec
            .iter()
            .map(|obs| {
                Variable::METRICS
                    .iter()
                    .filter(|&&var| obs.get(var).is_none())
                    .count()
            })
            .sum()
    }
}
