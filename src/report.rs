//! Console reports.

use crate::model::{Dataset, Variable};
use crate::stats::{Fit, Summary};
use anyhow::Result;
use std::io::Write;

const MISSING: &str = "NA";

/// Format a value with two decimals and comma-separated thousands.
pub fn format_thousands(val: f64) -> String {
    if !val.is_finite() {
        return val.to_string();
    }
    let fixed = format!("{:.2}", val.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if val < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        grouped.push('-');
    }
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(frac_part);
    grouped
}

fn format_cell(val: Option<f64>) -> String {
    val.map_or_else(|| MISSING.to_string(), format_thousands)
}

/// Write the dataset as a fixed-width table.
pub fn write_table<W: Write>(out: &mut W, dataset: &Dataset) -> Result<()> {
    writeln!(
        out,
        "{:<10} {:<20} {:<20} {:<20}",
        "Years", "Fuel Consumption", "Enplanements", "Revenue Streams"
    )?;
    for obs in &dataset.obs_vec {
        // The currency symbol sits outside the padded revenue column.
        let revenue = match obs.revenue {
            Some(val) => format!("${:<20}", format_thousands(val)),
            None => format!(" {MISSING:<20}"),
        };
        writeln!(
            out,
            "{:<10} {:<20} {:<20} {}",
            obs.year,
            format_cell(obs.fuel),
            format_cell(obs.enplanements),
            revenue
        )?;
    }
    Ok(())
}

/// Write the mean and standard deviation of every metric.
pub fn write_summary<W: Write>(out: &mut W, dataset: &Dataset) -> Result<()> {
    writeln!(out, "{:<20} {:<24} {:<24}", "Metric", "Mean", "Std. Dev.")?;
    for var in Variable::METRICS {
        let (mean, std_dev) = match Summary::of(&dataset.present_values(var)) {
            Ok(summary) => (
                format_thousands(summary.mean),
                format_thousands(summary.std_dev),
            ),
            Err(err) => {
                log::debug!("no summary for {var}: {err}");
                (MISSING.to_string(), MISSING.to_string())
            }
        };
        writeln!(out, "{:<20} {:<24} {:<24}", var.label(), mean, std_dev)?;
    }
    Ok(())
}

pub fn write_fit<W: Write>(out: &mut W, x: Variable, y: Variable, fit: &Fit) -> Result<()> {
    writeln!(out, "The fit for {x} vs {y} is: {fit}")?;
    Ok(())
}

pub fn write_r_squared<W: Write>(out: &mut W, x: Variable, y: Variable, r2: f64) -> Result<()> {
    writeln!(out, "R² for {x} vs {y} is: {r2}")?;
    Ok(())
}
