//! Penalty-method linear solver for link models.
//!
//! The global system is never reduced. Each node `i` owns the degrees of freedom
//! `i * d .. i * d + d` (with `d` the model dimensionality), so the matrix is sized
//! by the largest node id rather than by the node count. Ids skipped by the
//! caller leave empty rows behind; those rows are repaired with a placeholder
//! diagonal and their displacements are meaningless.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{NumericError, PreconditionError, SolveError};
use crate::geometry::{Axis, Dimensions, Displacement};
use crate::link::Link;
use crate::model::Model;
use crate::node::Node;
use crate::scope::Scope;
use crate::settings::SolverSettings;
use crate::solution::{PostProcessor, Solution};
use crate::{LinkId, NodeId};

/// Matrices and vectors of one solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearSystem {
    /// Assembled stiffness matrix `K` without penalty terms.
    pub stiffness: DMatrix<f64>,
    /// Diagonal penalty springs `Kp`.
    pub penalty_stiffness: DMatrix<f64>,
    /// Applied loads `F`.
    pub loads: DVector<f64>,
    /// Penalty loads `Fp`.
    pub penalty_loads: DVector<f64>,
    /// Solution `U` of `(K + Kp) U = F + Fp`.
    pub displacements: DVector<f64>,
    /// Reactions `R = K U`.
    pub reactions: DVector<f64>,
    /// Degrees of freedom whose empty row received the placeholder diagonal.
    pub repaired_dofs: Vec<usize>,
}

/// A prescribed displacement the penalty solve failed to approximate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintViolation {
    /// Constrained node.
    pub node: NodeId,
    /// Constrained axis.
    pub axis: Axis,
    /// Prescribed displacement.
    pub prescribed: f64,
    /// Displacement returned by the linear solve.
    pub solved: f64,
    /// Largest accepted difference.
    pub tolerance: f64,
}

/// Quality of a completed solve.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveStatus {
    /// Every prescribed displacement was met within tolerance.
    Success,
    /// The solution exists but some constraints were not met.
    ConstraintsNotMet(Vec<ConstraintViolation>),
}

impl SolveStatus {
    /// Whether the solve met every constraint.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Human readable status line.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success => "solution completed".to_owned(),
            Self::ConstraintsNotMet(violations) => format!(
                "warning: solution did not meet {} constraint(s)",
                violations.len()
            ),
        }
    }
}

/// Result of a solve that produced a solution.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveOutcome {
    /// Derived results.
    pub solution: Solution,
    /// Whether prescribed displacements were achieved.
    pub status: SolveStatus,
}

/// Penalty solver working on a snapshot of a model.
///
/// The solver clones the nodes and links it is built from, so editing the model
/// afterwards never changes what it computes.
#[derive(Clone, Debug)]
pub struct Solver {
    /// Dimensionality of the snapshot.
    dimensions: Dimensions,
    /// Nodes keyed by id.
    nodes: BTreeMap<NodeId, Node>,
    /// Links keyed by id.
    links: BTreeMap<LinkId, Link>,
    /// Numerical parameters.
    settings: SolverSettings,
}

impl Solver {
    /// Snapshot `model` with default settings.
    #[must_use]
    pub fn new(model: &Model) -> Self {
        Self::with_settings(model, SolverSettings::default())
    }

    /// Snapshot `model` with explicit settings.
    #[must_use]
    pub fn with_settings(model: &Model, settings: SolverSettings) -> Self {
        Self::snapshot(
            model.dimensions(),
            model.nodes().cloned(),
            model.links().cloned(),
            settings,
        )
    }

    /// Build a solver from loose nodes and links.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::DanglingLink`] when a link references a node
    /// that is not in `nodes`.
    pub fn from_parts(
        dimensions: Dimensions,
        nodes: impl IntoIterator<Item = Node>,
        links: impl IntoIterator<Item = Link>,
        settings: SolverSettings,
    ) -> Result<Self, PreconditionError> {
        let solver = Self::snapshot(dimensions, nodes, links, settings);
        for link in solver.links.values() {
            for node in [link.node_a, link.node_b] {
                if !solver.nodes.contains_key(&node) {
                    return Err(PreconditionError::DanglingLink {
                        link: link.id,
                        node,
                    });
                }
            }
        }
        Ok(solver)
    }

    /// Key the nodes and links by id, dropping axes the model does not use.
    fn snapshot(
        dimensions: Dimensions,
        nodes: impl IntoIterator<Item = Node>,
        links: impl IntoIterator<Item = Link>,
        settings: SolverSettings,
    ) -> Self {
        let nodes = nodes
            .into_iter()
            .map(|mut node| {
                node.position = node.position.restricted_to(dimensions);
                node.force = node.force.restricted_to(dimensions);
                (node.id, node)
            })
            .collect();
        let links = links.into_iter().map(|link| (link.id, link)).collect();
        Self {
            dimensions,
            nodes,
            links,
            settings,
        }
    }

    /// Dimensionality of the snapshot.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Numerical parameters in use.
    #[must_use]
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Size of the global system: `(max node id + 1) * dimensions`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::SystemTooLarge`] when that size overflows or
    /// exceeds [`SolverSettings::max_dofs`].
    pub fn dof_count(&self) -> Result<usize, NumericError> {
        let Some(&max_node) = self.nodes.keys().next_back() else {
            return Ok(0);
        };
        let limit = self.settings.max_dofs;
        max_node
            .checked_add(1)
            .and_then(|slots| slots.checked_mul(self.dimensions.count()))
            .filter(|&dofs| dofs <= limit)
            .ok_or(NumericError::SystemTooLarge { max_node, limit })
    }

    /// Global index of `axis` at `node`.
    #[must_use]
    pub fn dof(&self, node: NodeId, axis: Axis) -> usize {
        node * self.dimensions.count() + axis.index()
    }

    /// Fail when a load acts along an axis that no node restrains.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::InsufficientlyConstrained`] naming every such
    /// axis.
    pub fn check_restraint(&self) -> Result<(), PreconditionError> {
        let axes: Vec<Axis> = self
            .dimensions
            .axes()
            .iter()
            .copied()
            .filter(|&axis| {
                let loaded = self
                    .nodes
                    .values()
                    .any(|node| node.force.component(axis) != 0.0);
                let restrained = self
                    .nodes
                    .values()
                    .any(|node| node.constraint_along(axis).is_some());
                loaded && !restrained
            })
            .collect();
        if axes.is_empty() {
            Ok(())
        } else {
            Err(PreconditionError::InsufficientlyConstrained { axes })
        }
    }

    /// Fail unless `constraints + links >= dimensions * nodes`.
    ///
    /// The count is necessary but not sufficient for stability.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Unstable`] with the counts involved.
    pub fn check_determinacy(&self) -> Result<(), PreconditionError> {
        let constraints: usize = self
            .nodes
            .values()
            .map(|node| node.prescribed(self.dimensions).count())
            .sum();
        let links = self.links.len();
        let nodes = self.nodes.len();
        let dimensions = self.dimensions.count();
        if constraints + links >= dimensions * nodes {
            Ok(())
        } else {
            Err(PreconditionError::Unstable {
                constraints,
                links,
                nodes,
                dimensions,
            })
        }
    }

    /// Run every check that does not need the matrices.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`PreconditionError`].
    pub fn check_preconditions(&self) -> Result<(), PreconditionError> {
        self.settings.validate()?;
        if self.nodes.is_empty() {
            return Err(PreconditionError::EmptyModel);
        }
        self.check_restraint()?;
        self.check_determinacy()
    }

    /// Assemble the global stiffness matrix.
    ///
    /// Contributions are accumulated, so links sharing a node superpose.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::SystemTooLarge`] before allocating an oversized
    /// matrix.
    pub fn stiffness_matrix(&self) -> Result<DMatrix<f64>, NumericError> {
        let d = self.dimensions.count();
        let dof = self.dof_count()?;
        let mut matrix = DMatrix::zeros(dof, dof);
        for link in self.links.values() {
            let cosines = DVector::from_vec(link.direction_cosines());
            let block = link.axial_stiffness() * (&cosines * cosines.transpose());

            let start_idx = link.node_a * d;
            let end_idx = link.node_b * d;
            let dof_map: Vec<usize> = (start_idx..start_idx + d)
                .chain(end_idx..end_idx + d)
                .collect();

            for (row_local, &global_row) in dof_map.iter().enumerate() {
                for (col_local, &global_col) in dof_map.iter().enumerate() {
                    let sign = if (row_local < d) == (col_local < d) {
                        1.0
                    } else {
                        -1.0
                    };
                    matrix[(global_row, global_col)] +=
                        sign * block[(row_local % d, col_local % d)];
                }
            }
        }
        Ok(matrix)
    }

    /// Assemble the applied load vector.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::SystemTooLarge`] when the system would exceed the
    /// configured limit.
    pub fn load_vector(&self) -> Result<DVector<f64>, NumericError> {
        let mut load = DVector::zeros(self.dof_count()?);
        for node in self.nodes.values() {
            for &axis in self.dimensions.axes() {
                load[self.dof(node.id, axis)] = node.force.component(axis);
            }
        }
        Ok(load)
    }

    /// Build the penalty springs and loads for every prescribed displacement.
    ///
    /// The spring of a constrained degree of freedom is the penalty multiplier
    /// times the largest absolute stiffness coefficient in its row of `stiffness`.
    #[must_use]
    pub fn penalty_terms(&self, stiffness: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
        let c = self.settings.penalty_multiplier;
        let dof = stiffness.nrows();
        let mut penalty_stiffness = DMatrix::zeros(dof, dof);
        let mut penalty_loads = DVector::zeros(dof);
        for node in self.nodes.values() {
            for (axis, prescribed) in node.prescribed(self.dimensions) {
                let idx = self.dof(node.id, axis);
                let row_max = stiffness.row(idx).amax();
                penalty_stiffness[(idx, idx)] = c * row_max;
                penalty_loads[idx] = c * prescribed * row_max;
            }
        }
        (penalty_stiffness, penalty_loads)
    }

    /// Assemble and solve the penalised system.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError`] when the system cannot be solved or produces
    /// non-finite values.
    pub fn linear_system(&self) -> Result<LinearSystem, NumericError> {
        let stiffness = self.stiffness_matrix()?;
        let loads = self.load_vector()?;
        let (penalty_stiffness, penalty_loads) = self.penalty_terms(&stiffness);
        debug!(
            dofs = stiffness.nrows(),
            nodes = self.nodes.len(),
            links = self.links.len(),
            "assembled global system"
        );

        let mut system = &stiffness + &penalty_stiffness;
        let rhs = &loads + &penalty_loads;
        let repaired_dofs = repair_empty_rows(&mut system, self.settings.singular_row_placeholder);
        if !repaired_dofs.is_empty() {
            debug!(
                count = repaired_dofs.len(),
                "empty rows given placeholder diagonal"
            );
        }

        let displacements = solve_dense(system, &rhs)?;
        let reactions = &stiffness * &displacements;
        if let Some(dof) = reactions.iter().position(|value| !value.is_finite()) {
            return Err(NumericError::NonFinite { dof });
        }

        Ok(LinearSystem {
            stiffness,
            penalty_stiffness,
            loads,
            penalty_loads,
            displacements,
            reactions,
            repaired_dofs,
        })
    }

    /// Compare every prescribed displacement with the solved one.
    ///
    /// The tolerance is `factor * max_displacement / penalty_multiplier`, where
    /// `max_displacement` is the largest raw nodal displacement magnitude.
    #[must_use]
    pub fn constraint_violations(&self, displacements: &DVector<f64>) -> Vec<ConstraintViolation> {
        let max_displacement = self
            .nodes
            .keys()
            .map(|&node| self.raw_displacement(displacements, node).magnitude())
            .fold(0.0, f64::max);
        let tolerance = self.settings.constraint_tolerance_factor * max_displacement
            / self.settings.penalty_multiplier;

        let mut violations = Vec::new();
        for node in self.nodes.values() {
            for (axis, prescribed) in node.prescribed(self.dimensions) {
                let solved = displacements[self.dof(node.id, axis)];
                if (prescribed - solved).abs() > tolerance {
                    violations.push(ConstraintViolation {
                        node: node.id,
                        axis,
                        prescribed,
                        solved,
                        tolerance,
                    });
                }
            }
        }
        violations
    }

    /// Validate, solve and post-process the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Precondition`] when a check rejects the model before
    /// assembly and [`SolveError::Numeric`] when the linear solve fails. A solve
    /// that misses its constraints still succeeds with
    /// [`SolveStatus::ConstraintsNotMet`].
    ///
    /// # Examples
    /// ```
    /// use trusslink::{force, point, Dimensions, Material, Model, Solver};
    ///
    /// let mut model = Model::new(Dimensions::Two);
    /// model.add_material(Material::new(0, 200.0e9, 0.01, 0.0)?)?;
    /// model.add_node(0, point(0.0, 0.0, 0.0))?;
    /// model.add_node(1, point(1.0, 0.0, 0.0))?;
    /// model.add_link(0, 0, 1, 0)?;
    /// model.set_constraints(0, [Some(0.0), Some(0.0), None])?;
    /// model.set_constraints(1, [None, Some(0.0), None])?;
    /// model.set_force(1, force(1_000.0, 0.0, 0.0))?;
    ///
    /// let outcome = Solver::new(&model).solve()?;
    /// assert!(outcome.status.is_success());
    /// let tip = outcome.solution.node(1).expect("node solved");
    /// assert!((tip.displacement.x - 5.0e-7).abs() < 1.0e-12);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn solve(&self) -> Result<SolveOutcome, SolveError> {
        self.check_preconditions()?;
        let system = self.linear_system()?;

        let violations = self.constraint_violations(&system.displacements);
        let status = if violations.is_empty() {
            SolveStatus::Success
        } else {
            for violation in &violations {
                warn!(
                    node = violation.node,
                    axis = %violation.axis,
                    prescribed = violation.prescribed,
                    solved = violation.solved,
                    tolerance = violation.tolerance,
                    "prescribed displacement not met"
                );
            }
            SolveStatus::ConstraintsNotMet(violations)
        };

        let model_size = Scope::of(
            self.nodes.values().map(|node| node.position),
            self.dimensions,
        )
        .map_or(1.0, |scope| scope.model_size);
        let solution = PostProcessor {
            dimensions: self.dimensions,
            nodes: &self.nodes,
            links: &self.links,
            model_size,
            exaggeration_fraction: self.settings.exaggeration_fraction,
        }
        .compile(system);

        info!(
            nodes = solution.nodes.len(),
            links = solution.links.len(),
            status = %status.message(),
            "solve finished"
        );
        Ok(SolveOutcome { solution, status })
    }

    /// Raw solved displacement of `node`.
    fn raw_displacement(&self, displacements: &DVector<f64>, node: NodeId) -> Displacement {
        let base = self.dof(node, Axis::X);
        Displacement::from_components(
            &displacements.as_slice()[base..base + self.dimensions.count()],
        )
    }
}

/// Give every all-zero row a nonzero diagonal and return the affected rows.
fn repair_empty_rows(system: &mut DMatrix<f64>, placeholder: f64) -> Vec<usize> {
    let mut repaired = Vec::new();
    for idx in 0..system.nrows() {
        if system.row(idx).iter().all(|&value| value == 0.0) {
            system[(idx, idx)] = placeholder;
            repaired.push(idx);
        }
    }
    repaired
}

/// Solve a dense square system by LU decomposition.
fn solve_dense(system: DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>, NumericError> {
    if !system.is_square() || system.nrows() != rhs.len() {
        return Err(NumericError::DimensionMismatch {
            expected: system.nrows(),
            found: rhs.len(),
        });
    }
    if let Some(dof) = system
        .row_iter()
        .position(|row| row.iter().any(|value| !value.is_finite()))
    {
        return Err(NumericError::NonFinite { dof });
    }
    let solution = system
        .lu()
        .solve(rhs)
        .ok_or(NumericError::SingularSystem)?;
    if let Some(dof) = solution.iter().position(|value| !value.is_finite()) {
        return Err(NumericError::NonFinite { dof });
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{force, point};
    use crate::material::Material;

    /// Horizontal bar of length 2 with a pull of 1000 at the free end.
    fn bar() -> Model {
        let mut model = Model::new(Dimensions::Two);
        model
            .add_material(Material::new(0, 200.0e9, 0.01, 0.0).expect("valid"))
            .expect("material added");
        model.add_node(0, point(0.0, 0.0, 0.0)).expect("node added");
        model.add_node(1, point(2.0, 0.0, 0.0)).expect("node added");
        model.add_link(0, 0, 1, 0).expect("link added");
        model
            .set_constraints(0, [Some(0.0), Some(0.0), None])
            .expect("constraint set");
        model
            .set_constraints(1, [None, Some(0.0), None])
            .expect("constraint set");
        model
            .set_force(1, force(1_000.0, 0.0, 0.0))
            .expect("force set");
        model
    }

    #[test]
    fn stiffness_matrix_is_symmetric_and_scattered() {
        let mut model = bar();
        model.add_node(2, point(2.0, 2.0, 0.0)).expect("node added");
        model.add_link(1, 1, 2, 0).expect("link added");
        model.add_link(2, 0, 2, 0).expect("link added");
        let solver = Solver::new(&model);
        let k = solver.stiffness_matrix().expect("assembled");

        assert_eq!(k.nrows(), 6);
        assert_eq!(k, k.transpose());
        // Node 1 x: horizontal bar only; vertical link has no x stiffness.
        assert_relative_eq!(k[(2, 2)], 1.0e9, max_relative = 1.0e-12);
        assert_relative_eq!(k[(0, 2)], -1.0e9, max_relative = 1.0e-12);
        // Node 1 y: vertical link only.
        assert_relative_eq!(k[(3, 3)], 1.0e9, max_relative = 1.0e-12);
        // Node 0 x: horizontal bar plus the diagonal's x projection.
        let diagonal = 2.0e9 / 8.0_f64.sqrt() * 0.5;
        assert_relative_eq!(k[(0, 0)], 1.0e9 + diagonal, max_relative = 1.0e-12);
        assert_relative_eq!(k[(0, 1)], diagonal, max_relative = 1.0e-12);
    }

    #[test]
    fn load_vector_places_components() {
        let solver = Solver::new(&bar());
        let load = solver.load_vector().expect("assembled");
        assert_eq!(load.as_slice(), &[0.0, 0.0, 1_000.0, 0.0]);
    }

    #[test]
    fn penalty_scales_with_row_maximum() {
        let solver = Solver::new(&bar());
        let k = solver.stiffness_matrix().expect("assembled");
        let (kp, fp) = solver.penalty_terms(&k);
        assert_relative_eq!(kp[(0, 0)], 1.0e6 * 1.0e9, max_relative = 1.0e-12);
        // Rows with no stiffness get a zero penalty.
        assert_eq!(kp[(1, 1)], 0.0);
        assert_eq!(kp[(2, 2)], 0.0);
        assert_eq!(fp.iter().copied().fold(0.0, f64::max), 0.0);
    }

    #[test]
    fn gaps_in_numbering_enlarge_the_system() {
        let mut model = bar();
        model.add_node(5, point(9.0, 9.0, 0.0)).expect("node added");
        model
            .set_constraints(5, [Some(0.0), Some(0.0), None])
            .expect("constraint set");
        let solver = Solver::new(&model);
        assert_eq!(solver.dof_count(), Ok(12));

        let system = solver.linear_system().expect("solvable");
        // Node 1 y, ids 2..=4 and node 5 have no stiffness at all.
        assert_eq!(system.repaired_dofs, vec![1, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert!(system.displacements.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn sparse_ids_beyond_the_limit_fail_before_allocating() {
        let mut model = bar();
        model.add_node(200_000, point(9.0, 9.0, 0.0)).expect("node added");
        model
            .set_constraints(200_000, [Some(0.0), Some(0.0), None])
            .expect("constraint set");
        assert_eq!(
            Solver::new(&model).solve(),
            Err(SolveError::Numeric(NumericError::SystemTooLarge {
                max_node: 200_000,
                limit: SolverSettings::MAX_DOFS,
            }))
        );

        let roomy = SolverSettings {
            max_dofs: 400_002,
            ..SolverSettings::default()
        };
        assert_eq!(Solver::with_settings(&model, roomy).dof_count(), Ok(400_002));
    }

    #[test]
    fn overflowing_system_size_is_reported() {
        let mut model = Model::new(Dimensions::Two);
        let id = usize::MAX / 2;
        model.add_node(id, point(0.0, 0.0, 0.0)).expect("node added");
        model
            .set_constraints(id, [Some(0.0), Some(0.0), None])
            .expect("constraint set");
        let solver = Solver::new(&model);
        assert!(matches!(
            solver.dof_count(),
            Err(NumericError::SystemTooLarge { max_node, .. }) if max_node == id
        ));
        assert!(matches!(solver.solve(), Err(SolveError::Numeric(_))));
    }

    #[test]
    fn loose_parts_must_reference_known_nodes() {
        let steel = Material::new(0, 200.0e9, 0.01, 0.0).expect("valid");
        let a = Node::new(0, point(0.0, 0.0, 0.0));
        let b = Node::new(7, point(1.0, 0.0, 0.0));
        let link = Link::new(3, &a, &b, steel, Dimensions::Two).expect("valid link");

        let error = Solver::from_parts(
            Dimensions::Two,
            [a.clone()],
            [link.clone()],
            SolverSettings::default(),
        )
        .expect_err("node 7 is missing");
        assert_eq!(error, PreconditionError::DanglingLink { link: 3, node: 7 });

        let solver = Solver::from_parts(Dimensions::Two, [a, b], [link], SolverSettings::default())
            .expect("complete parts");
        assert_eq!(solver.dof_count(), Ok(16));
    }

    #[test]
    fn prescribed_displacement_is_met() {
        let mut model = bar();
        model.clear_force(1).expect("force cleared");
        model
            .set_constraints(1, [Some(0.001), Some(0.0), None])
            .expect("constraint set");
        let solver = Solver::new(&model);
        let outcome = solver.solve().expect("solves");
        assert!(outcome.status.is_success());
        let tip = outcome.solution.node(1).expect("solved");
        assert_eq!(tip.displacement.x, 0.001);
        assert_relative_eq!(tip.calculated_displacement.x, 0.001, max_relative = 1.0e-5);
    }

    #[test]
    fn empty_model_is_rejected() {
        let model = Model::new(Dimensions::Three);
        assert_eq!(
            Solver::new(&model).solve(),
            Err(SolveError::Precondition(PreconditionError::EmptyModel))
        );
    }

    #[test]
    fn unsatisfiable_constraint_is_reported_as_warning() {
        let mut model = bar();
        // Node 2 is isolated: its prescribed y displacement has no row to act on.
        model.add_node(2, point(5.0, 5.0, 0.0)).expect("node added");
        model
            .set_constraints(2, [Some(0.0), Some(0.25), None])
            .expect("constraint set");
        model.add_node(3, point(7.0, 5.0, 0.0)).expect("node added");
        model.add_link(1, 2, 3, 0).expect("link added");
        model
            .set_constraints(3, [None, Some(0.0), None])
            .expect("constraint set");

        let outcome = Solver::new(&model).solve().expect("solution produced");
        let SolveStatus::ConstraintsNotMet(violations) = outcome.status else {
            panic!("expected a constraint warning");
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].node, 2);
        assert_eq!(violations[0].axis, Axis::Y);
        assert_eq!(violations[0].solved, 0.0);
    }
}
