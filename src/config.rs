use crate::impute::ImputeStrategy;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

pub const MILLION: f64 = 1_000_000.0;
pub const BILLION: f64 = 1_000_000_000.0;

/// Analysis configuration parameters.
///
/// Every section is optional and falls back to its default.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Unit scaling factors.
    pub units: Units,
    /// Imputation parameters.
    pub impute: ImputeConfig,
    /// Chart parameters.
    pub plot: PlotConfig,
}

/// Factors converting stored units into absolute counts.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Units {
    /// Fuel consumption is stored in billions.
    pub fuel: f64,
    /// Enplanements are stored in millions.
    pub enplanements: f64,
    /// Revenue is stored in billions.
    pub revenue: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            fuel: BILLION,
            enplanements: MILLION,
            revenue: BILLION,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImputeConfig {
    pub strategy: ImputeStrategy,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Years marked with a vertical line on the overview chart.
    pub marker_years: Vec<i32>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            marker_years: vec![2019, 2020, 2021],
        }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded.
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_factor(self.units.fuel).context("invalid fuel unit factor")?;
        check_factor(self.units.enplanements).context("invalid enplanements unit factor")?;
        check_factor(self.units.revenue).context("invalid revenue unit factor")?;

        check_num(self.plot.width, 200..10_000).context("invalid plot width")?;
        check_num(self.plot.height, 200..10_000).context("invalid plot height")?;
        for &year in &self.plot.marker_years {
            check_num(year, 1000..10_000).context("invalid marker year")?;
        }

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_factor(factor: f64) -> Result<()> {
    if !factor.is_finite() || factor <= 0.0 {
        bail!("factor must be positive and finite, but is {factor:?}");
    }
    Ok(())
}
