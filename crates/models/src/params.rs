use crate::error::ModelError;

/// Variable selection shared by every forecast strategy.
///
/// `vars` names the observed columns being predicted and `fvars` names the
/// forcing columns driving the prediction. The two lists are paired by
/// position for the direct strategies (identity, mean offset, training mean),
/// while the regression strategies use every forcing column as a feature for
/// each observed variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    vars: Vec<String>,
    fvars: Vec<String>,
}

impl ModelParams {
    /// Default pairing used throughout the toolkit: predict the gridded `SWE`
    /// column from the station `SNOTEL_SWE` column.
    pub fn new() -> Self {
        Self {
            vars: vec!["SWE".to_string()],
            fvars: vec!["SNOTEL_SWE".to_string()],
        }
    }

    /// Replaces the observed variable list.
    pub fn with_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vars = vars.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the forcing variable list.
    pub fn with_fvars<I, S>(mut self, fvars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fvars = fvars.into_iter().map(Into::into).collect();
        self
    }

    /// Observed variable names, in model-output column order.
    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    /// Forcing variable names paired with [`vars`](Self::vars) by position.
    pub fn fvars(&self) -> &[String] {
        &self.fvars
    }

    /// Number of variable pairs, which is also the output column count.
    pub fn nvars(&self) -> usize {
        self.fvars.len()
    }

    /// Checks that the selection is usable before any fitting starts.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.vars.is_empty() {
            return Err(ModelError::InvalidParams {
                reason: "observed variable list is empty".to_string(),
            });
        }
        if self.fvars.is_empty() {
            return Err(ModelError::InvalidParams {
                reason: "forcing variable list is empty".to_string(),
            });
        }
        if self.vars.len() != self.fvars.len() {
            return Err(ModelError::InvalidParams {
                reason: format!(
                    "{} observed variables cannot pair with {} forcing variables",
                    self.vars.len(),
                    self.fvars.len()
                ),
            });
        }
        for (i, name) in self.vars.iter().enumerate() {
            if self.vars[..i].contains(name) {
                return Err(ModelError::InvalidParams {
                    reason: format!("observed variable '{name}' listed twice"),
                });
            }
        }
        for (i, name) in self.fvars.iter().enumerate() {
            if self.fvars[..i].contains(name) {
                return Err(ModelError::InvalidParams {
                    reason: format!("forcing variable '{name}' listed twice"),
                });
            }
        }
        Ok(())
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::new()
    }
}
