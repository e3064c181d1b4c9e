use crate::interpreter::error::{ExpressionError, Malformation};
use crate::interpreter::operator::Function;
use anyhow::{bail, Result};

pub const DEFAULT_VARIABLE: &str = "x";
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// What to do with a power whose derivative is not one of the supported shapes
/// (`x^n` and `a^x`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnsupportedPowerPolicy {
    /// Fold the derivative to `0` and log a warning.
    Zero,
    /// Fail with `ExpressionError::UnsupportedDerivativeShape`.
    Reject,
}

/// Settings shared by parsing and differentiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferentiationConfig {
    pub with_respect_to: String,
    pub unsupported_powers: UnsupportedPowerPolicy,
    pub max_depth: usize,
}

impl DifferentiationConfig {
    pub fn with_respect_to(variable: impl Into<String>) -> DifferentiationConfig {
        DifferentiationConfig {
            with_respect_to: variable.into(),
            ..DifferentiationConfig::default()
        }
    }

    pub fn strict(self) -> DifferentiationConfig {
        DifferentiationConfig {
            unsupported_powers: UnsupportedPowerPolicy::Reject,
            ..self
        }
    }

    /// The variable has to be something the lexer produces as an identifier.
    pub fn validate(&self) -> Result<()> {
        let variable = &self.with_respect_to;
        let is_word = !variable.is_empty() && variable.chars().all(|c| c.is_ascii_alphabetic());
        if !is_word || Function::from_name(variable).is_some() {
            bail!(ExpressionError::from(Malformation::InvalidVariable(
                variable.clone()
            )));
        }
        Ok(())
    }
}

impl Default for DifferentiationConfig {
    fn default() -> Self {
        DifferentiationConfig {
            with_respect_to: DEFAULT_VARIABLE.to_string(),
            unsupported_powers: UnsupportedPowerPolicy::Zero,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
