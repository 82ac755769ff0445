use std::path::PathBuf;

use serde::Deserialize;

/// Top-level project configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FosConfig {
    /// Data directory layout.
    #[serde(default)]
    pub dirs: DirsToml,

    /// Peak-table settings.
    #[serde(default)]
    pub peaks: PeaksToml,

    /// Model-evaluation settings.
    #[serde(default)]
    pub evaluate: EvaluateToml,
}

/// Data directory layout. Every path except `basedir` may be left empty
/// and is then derived from its parent directory.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirsToml {
    #[serde(default = "default_basedir")]
    pub basedir: PathBuf,
    pub projectdir: Option<PathBuf>,
    pub snoteldir: Option<PathBuf>,
    pub wrfdir: Option<PathBuf>,
    pub coorddir: Option<PathBuf>,
    pub outdir: Option<PathBuf>,
    #[serde(default = "default_domain")]
    pub domain: String,
}

impl Default for DirsToml {
    fn default() -> Self {
        Self {
            basedir: default_basedir(),
            projectdir: None,
            snoteldir: None,
            wrfdir: None,
            coorddir: None,
            outdir: None,
            domain: default_domain(),
        }
    }
}

fn default_basedir() -> PathBuf {
    PathBuf::from(".")
}
fn default_domain() -> String {
    "d02".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeaksToml {
    #[serde(default = "default_exclude_states")]
    pub exclude_states: Vec<String>,
    #[serde(default)]
    pub plots: bool,
}

impl Default for PeaksToml {
    fn default() -> Self {
        Self {
            exclude_states: default_exclude_states(),
            plots: false,
        }
    }
}

fn default_exclude_states() -> Vec<String> {
    vec!["AK".to_string()]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateToml {
    /// Train window `[start, end)`, `YYYY-MM-DD`.
    #[serde(default = "default_train_start")]
    pub train_start: String,
    #[serde(default = "default_train_end")]
    pub train_end: String,
    /// Test window `[start, end)`, `YYYY-MM-DD`.
    #[serde(default = "default_test_start")]
    pub test_start: String,
    #[serde(default = "default_test_end")]
    pub test_end: String,
    /// Observation variables the models reproduce.
    #[serde(default = "default_vars")]
    pub vars: Vec<String>,
    /// Forcing variables the models read.
    #[serde(default = "default_fvars")]
    pub fvars: Vec<String>,
    /// Degree of the polynomial strategy.
    #[serde(default = "default_degree")]
    pub degree: usize,
}

impl Default for EvaluateToml {
    fn default() -> Self {
        Self {
            train_start: default_train_start(),
            train_end: default_train_end(),
            test_start: default_test_start(),
            test_end: default_test_end(),
            vars: default_vars(),
            fvars: default_fvars(),
            degree: default_degree(),
        }
    }
}

fn default_train_start() -> String {
    "1981-10-01".to_string()
}
fn default_train_end() -> String {
    "2004-10-01".to_string()
}
fn default_test_start() -> String {
    "2004-10-01".to_string()
}
fn default_test_end() -> String {
    "2014-10-01".to_string()
}
fn default_vars() -> Vec<String> {
    vec!["SWE".to_string()]
}
fn default_fvars() -> Vec<String> {
    vec!["SNOTEL_SWE".to_string()]
}
fn default_degree() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: FosConfig = toml::from_str("").expect("empty config parses");
        assert_eq!(config.dirs.basedir, PathBuf::from("."));
        assert_eq!(config.dirs.domain, "d02");
        assert_eq!(config.dirs.projectdir, None);
        assert_eq!(config.peaks.exclude_states, vec!["AK".to_string()]);
        assert!(!config.peaks.plots);
        assert_eq!(config.evaluate.train_start, "1981-10-01");
        assert_eq!(config.evaluate.test_end, "2014-10-01");
        assert_eq!(config.evaluate.vars, vec!["SWE".to_string()]);
        assert_eq!(config.evaluate.fvars, vec!["SNOTEL_SWE".to_string()]);
        assert_eq!(config.evaluate.degree, 3);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let text = r#"
            [dirs]
            basedir = "/data/fos"

            [evaluate]
            degree = 2
        "#;
        let config: FosConfig = toml::from_str(text).expect("config parses");
        assert_eq!(config.dirs.basedir, PathBuf::from("/data/fos"));
        assert_eq!(config.dirs.domain, "d02");
        assert_eq!(config.evaluate.degree, 2);
        assert_eq!(config.evaluate.train_end, "2004-10-01");
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = toml::from_str::<FosConfig>("[peaks]\nplotz = true\n").unwrap_err();
        assert!(err.to_string().contains("plotz"));
    }
}
