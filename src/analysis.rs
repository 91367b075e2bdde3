use std::error::Error;
use std::path::Path;

use tracing::{info, warn};
use trusslink::{persistence, Model, PersistenceError, SolveError, SolveStatus, SolverSettings};

use crate::demo::{build_cantilever, CantileverProperties};

/// Read solver settings from `path` (defaults when absent) and apply a penalty
/// override.
pub fn load_settings(
    path: Option<&Path>,
    penalty: Option<f64>,
) -> Result<SolverSettings, PersistenceError> {
    let settings = match path {
        Some(path) => SolverSettings::from_file(path)?,
        None => SolverSettings::default(),
    };
    Ok(match penalty {
        Some(penalty) => settings.with_penalty_multiplier(penalty),
        None => settings,
    })
}

/// Load the model at `path`, or build the demonstration bar.
pub fn load_model(path: Option<&Path>) -> Result<Model, Box<dyn Error>> {
    match path {
        Some(path) => Ok(persistence::load(path)?),
        None => {
            info!("no model given; solving the demonstration cantilever");
            Ok(build_cantilever(&CantileverProperties::default())?)
        }
    }
}

/// Solve `model`, leaving the solution cached on it.
///
/// The structure is analysed with the penalty form of the direct stiffness
/// method (<https://en.wikipedia.org/wiki/Direct_stiffness_method>).
pub fn run_analysis(model: &mut Model, settings: SolverSettings) -> Result<SolveStatus, SolveError> {
    let status = model.solve_with(settings)?;
    if !status.is_success() {
        warn!("{}", status.message());
    }
    Ok(status)
}
