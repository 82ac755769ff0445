//! Pure conversion functions: TOML config structs -> crate API types.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use fos_models::{ModelParams, Strategy};
use fos_series::{DateSpan, WindowSet};

use crate::config::{DirsToml, EvaluateToml};

/// Resolved data directory layout.
pub struct DataPaths {
    pub projectdir: PathBuf,
    pub snoteldir: PathBuf,
    pub wrfdir: PathBuf,
    pub coorddir: PathBuf,
    pub outdir: PathBuf,
    pub domain: String,
}

impl DataPaths {
    /// The station metadata CSV.
    pub fn station_table(&self) -> PathBuf {
        self.snoteldir.join("snotelmeta.csv")
    }

    /// A watershed polygon layer, `huc6` or `huc8`.
    pub fn watershed_layer(&self, label: &str) -> PathBuf {
        self.projectdir.join("spatialdata").join(format!("{label}.geojson"))
    }
}

/// Resolves the directory layout, deriving each unset path from its
/// parent. An empty string in the TOML counts as unset.
pub fn resolve_dirs(dirs: &DirsToml) -> DataPaths {
    let projectdir = pick(&dirs.projectdir, dirs.basedir.join("fos-data"));
    let snoteldir = pick(&dirs.snoteldir, projectdir.join("snoteldata"));
    let wrfdir = pick(&dirs.wrfdir, projectdir.join("wrfdata"));
    let coorddir = pick(&dirs.coorddir, projectdir.join("coorddata"));
    let outdir = pick(&dirs.outdir, projectdir.join("output"));
    DataPaths {
        projectdir,
        snoteldir,
        wrfdir,
        coorddir,
        outdir,
        domain: dirs.domain.clone(),
    }
}

fn pick(explicit: &Option<PathBuf>, derived: PathBuf) -> PathBuf {
    match explicit {
        Some(path) if !path.as_os_str().is_empty() => path.clone(),
        _ => derived,
    }
}

/// Parses a `YYYY-MM-DD` config value.
pub fn parse_config_date(text: &str, key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("bad date for {key}: {text:?} (expected YYYY-MM-DD)"))
}

/// Builds the train/test window set from the evaluate section.
pub fn build_window_set(eval: &EvaluateToml) -> Result<WindowSet> {
    let train = DateSpan::new(
        parse_config_date(&eval.train_start, "evaluate.train_start")?,
        parse_config_date(&eval.train_end, "evaluate.train_end")?,
    )
    .context("bad train window")?;
    let test = DateSpan::new(
        parse_config_date(&eval.test_start, "evaluate.test_start")?,
        parse_config_date(&eval.test_end, "evaluate.test_end")?,
    )
    .context("bad test window")?;
    WindowSet::train_test(train, test).context("bad evaluation windows")
}

/// Builds model parameters from the evaluate section.
pub fn build_model_params(eval: &EvaluateToml) -> ModelParams {
    ModelParams::new()
        .with_vars(eval.vars.iter().cloned())
        .with_fvars(eval.fvars.iter().cloned())
}

/// Parses a strategy name from `--model` into the corresponding variant.
pub fn parse_strategy(s: &str, degree: usize) -> Result<Strategy> {
    match s.to_lowercase().as_str() {
        "identity" => Ok(Strategy::Identity),
        "mean_offset" => Ok(Strategy::MeanOffset),
        "training_mean" => Ok(Strategy::TrainingMean),
        "linear_regression" => Ok(Strategy::LinearRegression),
        "polynomial" | "polynomial_regression" => Ok(Strategy::Polynomial { degree }),
        other => bail!("unknown strategy: {other:?}"),
    }
}
