//! Tunable parameters of the penalty solver.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{PersistenceError, SettingsError};

/// Numerical parameters used by [`Solver`](crate::Solver).
///
/// The defaults reproduce the long-standing behaviour of the solver. They are
/// empirical choices rather than physical constants, so every field may be
/// overridden; missing fields in a settings file fall back to the defaults.
///
/// # Examples
/// ```
/// use trusslink::SolverSettings;
///
/// let settings: SolverSettings =
///     serde_json::from_str(r#"{ "penalty_multiplier": 1e8 }"#).expect("valid settings");
/// assert_eq!(settings.penalty_multiplier, 1.0e8);
/// assert_eq!(settings.singular_row_placeholder, 42.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Multiplier `c` applied to the largest stiffness coefficient of a row to
    /// form the penalty spring of a constrained degree of freedom.
    pub penalty_multiplier: f64,
    /// Diagonal value written into rows that carry neither stiffness nor a
    /// constraint. Displacements at those rows have no physical meaning.
    pub singular_row_placeholder: f64,
    /// Allowed constraint error is `factor * max_displacement / penalty`.
    pub constraint_tolerance_factor: f64,
    /// Largest exaggerated displacement as a fraction of the model size.
    pub exaggeration_fraction: f64,
    /// Largest global system, in degrees of freedom, the solver will allocate.
    ///
    /// The system is dense and sized by the largest node id, so memory grows
    /// with the square of this value.
    pub max_dofs: usize,
}

impl SolverSettings {
    /// Default penalty multiplier.
    pub const PENALTY_MULTIPLIER: f64 = 1.0e6;
    /// Default diagonal for empty rows.
    pub const SINGULAR_ROW_PLACEHOLDER: f64 = 42.0;
    /// Default constraint tolerance factor.
    pub const CONSTRAINT_TOLERANCE_FACTOR: f64 = 2.0;
    /// Default exaggeration fraction.
    pub const EXAGGERATION_FRACTION: f64 = 0.05;
    /// Default system size limit.
    pub const MAX_DOFS: usize = 10_000;

    /// Return a copy with a different penalty multiplier.
    #[must_use]
    pub fn with_penalty_multiplier(mut self, penalty_multiplier: f64) -> Self {
        self.penalty_multiplier = penalty_multiplier;
        self
    }

    /// Check every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.penalty_multiplier.is_finite() && self.penalty_multiplier > 0.0) {
            return Err(SettingsError::PenaltyMultiplier(self.penalty_multiplier));
        }
        if !self.singular_row_placeholder.is_finite() || self.singular_row_placeholder == 0.0 {
            return Err(SettingsError::SingularRowPlaceholder(
                self.singular_row_placeholder,
            ));
        }
        if !(self.constraint_tolerance_factor.is_finite() && self.constraint_tolerance_factor > 0.0)
        {
            return Err(SettingsError::ToleranceFactor(
                self.constraint_tolerance_factor,
            ));
        }
        if !(self.exaggeration_fraction.is_finite() && self.exaggeration_fraction >= 0.0) {
            return Err(SettingsError::ExaggerationFraction(
                self.exaggeration_fraction,
            ));
        }
        if self.max_dofs == 0 {
            return Err(SettingsError::MaxDofs);
        }
        Ok(())
    }

    /// Read settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            penalty_multiplier: Self::PENALTY_MULTIPLIER,
            singular_row_placeholder: Self::SINGULAR_ROW_PLACEHOLDER,
            constraint_tolerance_factor: Self::CONSTRAINT_TOLERANCE_FACTOR,
            exaggeration_fraction: Self::EXAGGERATION_FRACTION,
            max_dofs: Self::MAX_DOFS,
        }
    }
}
