//! SVG charts.

use crate::config::PlotConfig;
use crate::model::{Dataset, Variable};
use crate::stats::Fit;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::{ops::Range, path::Path};

const FONT: &str = "sans-serif";

/// Draw fuel consumption and revenue (primary axis) and enplanements (secondary axis)
/// against year, with vertical lines at the marker years.
pub fn plot_overview(dataset: &Dataset, cfg: &PlotConfig, file: &Path) -> Result<()> {
    let fuel = points(dataset, Variable::Year, Variable::Fuel);
    let enplanements = points(dataset, Variable::Year, Variable::Enplanements);
    let revenue = points(dataset, Variable::Year, Variable::Revenue);

    let marker_years = cfg.marker_years.iter().map(|&year| year as f64);
    let x_range = padded_range(
        dataset
            .present_values(Variable::Year)
            .into_iter()
            .chain(marker_years.clone()),
    );
    let y_range = padded_range(fuel.iter().chain(&revenue).map(|&(_, y)| y));
    let y2_range = padded_range(enplanements.iter().map(|&(_, y)| y));

    let root = SVGBackend::new(file, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Fuel consumption, enplanements and revenue", (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .right_y_label_area_size(90)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?
        .set_secondary_coord(x_range, y2_range);

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Fuel consumption / revenue")
        .x_label_formatter(&|year: &f64| format!("{year:.0}"))
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("Enplanements")
        .draw()?;

    chart
        .draw_series(LineSeries::new(fuel, &YELLOW))?
        .label(Variable::Fuel.label())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], YELLOW));
    chart
        .draw_secondary_series(LineSeries::new(enplanements, &BLUE))?
        .label(Variable::Enplanements.label())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(revenue, &GREEN))?
        .label(Variable::Revenue.label())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    for year in marker_years {
        chart.draw_series(LineSeries::new(
            vec![(year, y_range.start), (year, y_range.end)],
            RED.mix(0.5),
        ))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

/// Draw one metric against year as a line with point markers.
pub fn plot_metric(dataset: &Dataset, var: Variable, cfg: &PlotConfig, file: &Path) -> Result<()> {
    let data = points(dataset, Variable::Year, var);
    let x_range = padded_range(data.iter().map(|&(x, _)| x));
    let y_range = padded_range(data.iter().map(|&(_, y)| y));

    let root = SVGBackend::new(file, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!("Year vs {}", title_case(var.label()));
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(title_case(var.label()))
        .x_label_formatter(&|year: &f64| format!("{year:.0}"))
        .draw()?;

    chart.draw_series(LineSeries::new(data.iter().copied(), &RED))?;
    chart.draw_series(
        data.iter()
            .map(|&point| Circle::new(point, 4, RED.filled())),
    )?;

    root.present()
        .with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

/// Draw the scatter of `y` against `x` together with the fitted line.
pub fn plot_regression(
    dataset: &Dataset,
    (x, y): (Variable, Variable),
    fit: &Fit,
    r2: f64,
    cfg: &PlotConfig,
    file: &Path,
) -> Result<()> {
    let data = points(dataset, x, y);
    let x_range = padded_range(data.iter().map(|&(x_i, _)| x_i));
    let line = vec![
        (x_range.start, fit.predict(x_range.start)),
        (x_range.end, fit.predict(x_range.end)),
    ];
    let y_range = padded_range(data.iter().chain(&line).map(|&(_, y_i)| y_i));

    let root = SVGBackend::new(file, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!(
        "{} vs {} (R² = {r2:.4})",
        title_case(x.label()),
        title_case(y.label())
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)?;

    let year_formatter = |year: &f64| format!("{year:.0}");
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(title_case(x.label()))
        .y_desc(title_case(y.label()));
    if x == Variable::Year {
        mesh.x_label_formatter(&year_formatter);
    }
    mesh.draw()?;

    chart.draw_series(
        data.iter()
            .map(|&point| Circle::new(point, 4, BLUE.filled())),
    )?;
    chart.draw_series(LineSeries::new(line, BLUE.stroke_width(2)))?;

    root.present()
        .with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

/// Pairs `(x, y)` of the observations where both values are present.
fn points(dataset: &Dataset, x: Variable, y: Variable) -> Vec<(f64, f64)> {
    dataset
        .obs_vec
        .iter()
        .filter_map(|obs| Some((obs.get(x)?, obs.get(y)?)))
        .collect()
}

/// Range spanning all finite values with a 5% margin on each side.
fn padded_range<I: IntoIterator<Item = f64>>(vals: I) -> Range<f64> {
    let (min, max) = vals
        .into_iter()
        .filter(|val| val.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), val| {
            (min.min(val), max.max(val))
        });
    if min > max {
        return 0.0..1.0;
    }
    let pad = if max > min {
        0.05 * (max - min)
    } else {
        0.5 * min.abs().max(1.0)
    };
    (min - pad)..(max + pad)
}

fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
