//! Model nodes: points carrying constraints and loads.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Dimensions, Force, Point};
use crate::NodeId;

/// Per-axis prescribed displacements; `None` leaves the axis free and
/// `Some(0.0)` fixes it.
pub type Constraint = [Option<f64>; 3];

/// A node of a link model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier of the node; also selects its degrees of freedom.
    pub id: NodeId,
    /// Undeformed position.
    pub position: Point,
    /// Prescribed displacement per axis.
    #[serde(default)]
    pub constraint: Constraint,
    /// Applied external load.
    #[serde(default)]
    pub force: Force,
}

impl Node {
    /// Create a free, unloaded node.
    #[must_use]
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            constraint: [None; 3],
            force: Force::default(),
        }
    }

    /// Prescribed displacement along `axis`, if any.
    #[must_use]
    pub fn constraint_along(&self, axis: Axis) -> Option<f64> {
        self.constraint[axis.index()]
    }

    /// Whether any axis has a prescribed displacement.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.constraint.iter().any(Option::is_some)
    }

    /// Number of prescribed displacement components.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraint.iter().filter(|value| value.is_some()).count()
    }

    /// Whether a nonzero load acts on the node.
    #[must_use]
    pub fn has_force(&self) -> bool {
        self.force.is_nonzero()
    }

    /// Iterate the prescribed displacements active in `dimensions`.
    pub fn prescribed(&self, dimensions: Dimensions) -> impl Iterator<Item = (Axis, f64)> + '_ {
        dimensions
            .axes()
            .iter()
            .filter_map(move |&axis| self.constraint_along(axis).map(|value| (axis, value)))
    }
}
