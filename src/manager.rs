use crate::config::Config;
use crate::impute::{impute, scale_units};
use crate::loader::{load_strict, load_tolerant};
use crate::model::{Dataset, REGRESSION_PAIRS, Variable};
use crate::plot::{plot_metric, plot_overview, plot_regression};
use crate::report::{write_fit, write_r_squared, write_summary, write_table};
use crate::stats::{least_squares_fit, r_squared};
use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

pub struct Manager {
    data_file: PathBuf,
    plot_dir: Option<PathBuf>,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(
        data_file: P,
        config_file: Option<P>,
        plot_dir: Option<P>,
    ) -> Result<Self> {
        let data_file = data_file.as_ref().to_path_buf();

        let cfg = match config_file {
            Some(config_file) => {
                Config::from_file(config_file).context("failed to construct cfg")?
            }
            None => Config::default(),
        };
        log::info!("{cfg:#?}");

        let plot_dir = match plot_dir {
            Some(plot_dir) => {
                let plot_dir = plot_dir.as_ref().to_path_buf();
                fs::create_dir_all(&plot_dir)
                    .with_context(|| format!("failed to create {plot_dir:?}"))?;
                Some(plot_dir)
            }
            None => None,
        };

        Ok(Self {
            data_file,
            plot_dir,
            cfg,
        })
    }

    /// Load with the tolerant loader, impute, scale, print the table and the
    /// summary, and draw the overview chart.
    ///
    /// Does nothing if the data file does not exist.
    pub fn summarize(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.summarize_to(&mut stdout)
    }

    fn summarize_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(mut dataset) =
            load_tolerant(&self.data_file).context("failed to load dataset")?
        else {
            return Ok(());
        };

        impute(&mut dataset, self.cfg.impute.strategy).context("failed to impute dataset")?;
        let n_missing = dataset.n_missing();
        if n_missing > 0 {
            log::warn!("{n_missing} values are still missing after imputation");
        }
        scale_units(&mut dataset, &self.cfg.units);

        write_table(out, &dataset).context("failed to write table")?;
        writeln!(out)?;
        write_summary(out, &dataset).context("failed to write summary")?;

        if let Some(plot_dir) = &self.plot_dir {
            let file = overview_file(plot_dir);
            plot_overview(&dataset, &self.cfg.plot, &file)
                .with_context(|| format!("failed to plot {file:?}"))?;
            log::info!("wrote {file:?}");
        }

        Ok(())
    }

    /// Load with the strict loader, fit every regression pair, and print the
    /// fits and their R² values.
    pub fn regress(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.regress_to(&mut stdout)
    }

    fn regress_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let dataset = load_strict(&self.data_file).context("failed to load dataset")?;

        if let Some(plot_dir) = &self.plot_dir {
            for var in Variable::METRICS {
                let file = metric_file(plot_dir, var);
                plot_metric(&dataset, var, &self.cfg.plot, &file)
                    .with_context(|| format!("failed to plot {file:?}"))?;
                log::info!("wrote {file:?}");
            }
        }

        let mut fits = Vec::with_capacity(REGRESSION_PAIRS.len());
        for (x, y) in REGRESSION_PAIRS {
            let (x_vals, y_vals) = pair_values(&dataset, x, y)?;
            let fit = least_squares_fit(&x_vals, &y_vals)
                .with_context(|| format!("failed to fit {x} vs {y}"))?;
            write_fit(out, x, y, &fit)?;
            fits.push((x, y, x_vals, y_vals, fit));
        }

        for (x, y, x_vals, y_vals, fit) in fits {
            let r2 = r_squared(&fit, &x_vals, &y_vals)
                .with_context(|| format!("failed to compute r squared of {x} vs {y}"))?;
            write_r_squared(out, x, y, r2)?;

            if let Some(plot_dir) = &self.plot_dir {
                let file = regression_file(plot_dir, x, y);
                plot_regression(&dataset, (x, y), &fit, r2, &self.cfg.plot, &file)
                    .with_context(|| format!("failed to plot {file:?}"))?;
                log::info!("wrote {file:?}");
            }
        }

        Ok(())
    }
}

fn pair_values(dataset: &Dataset, x: Variable, y: Variable) -> Result<(Vec<f64>, Vec<f64>)> {
    let x_vals = dataset
        .values(x)
        .with_context(|| format!("failed to get {x} values"))?;
    let y_vals = dataset
        .values(y)
        .with_context(|| format!("failed to get {y} values"))?;
    Ok((x_vals, y_vals))
}

fn overview_file(plot_dir: &Path) -> PathBuf {
    plot_dir.join("overview.svg")
}

fn metric_file(plot_dir: &Path, var: Variable) -> PathBuf {
    plot_dir.join(format!("{}.svg", var.slug()))
}

fn regression_file(plot_dir: &Path, x: Variable, y: Variable) -> PathBuf {
    plot_dir.join(format!("{}-vs-{}.svg", x.slug(), y.slug()))
}
