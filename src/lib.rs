#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub mod geometry;
mod link;
mod material;
mod model;
mod node;
pub mod persistence;
mod scope;
mod settings;
mod solution;
mod solver;

/// Identifier of a node. Doubles as the base of the node's degree-of-freedom
/// indices, so ids should be kept dense.
pub type NodeId = usize;

/// Identifier of a link.
pub type LinkId = usize;

/// Identifier of a material.
pub type MaterialId = usize;

pub use errors::{
    MaterialPropertyError, ModelEditError, NumericError, PersistenceError, PreconditionError,
    SettingsError, SolveError,
};
pub use geometry::{displacement, force, point, Axis, Dimensions, Displacement, Force, Point};
pub use link::Link;
pub use material::Material;
pub use model::{Model, Units};
pub use node::{Constraint, Node};
pub use persistence::ModelFile;
pub use scope::Scope;
pub use settings::SolverSettings;
pub use solution::{Extremes, LinkSolution, MassProperties, NodeSolution, Solution};
pub use solver::{ConstraintViolation, LinearSystem, SolveOutcome, SolveStatus, Solver};
