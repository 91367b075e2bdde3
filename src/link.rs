//! Two-node axial members.

use crate::errors::ModelEditError;
use crate::geometry::{Axis, Dimensions, Point};
use crate::material::Material;
use crate::node::Node;
use crate::{LinkId, NodeId};

/// An axial member joining two nodes.
///
/// Length and direction cosines are derived from the end positions when the link
/// is built; moving a node therefore requires rebuilding its links.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    /// Identifier of the link within its model.
    pub id: LinkId,
    /// Start node.
    pub node_a: NodeId,
    /// End node.
    pub node_b: NodeId,
    /// Material definition the link was built with.
    pub material: Material,
    /// Undeformed length.
    length: f64,
    /// Unit vector from `node_a` to `node_b`.
    direction: Point,
    /// Dimensionality of the owning model.
    dimensions: Dimensions,
}

impl Link {
    /// Build a link between two nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::SelfLink`] when both ends are the same node and
    /// [`ModelEditError::ZeroLengthLink`] when the positions coincide.
    pub fn new(
        id: LinkId,
        a: &Node,
        b: &Node,
        material: Material,
        dimensions: Dimensions,
    ) -> Result<Self, ModelEditError> {
        if a.id == b.id {
            return Err(ModelEditError::SelfLink(a.id));
        }
        let delta = b.position.restricted_to(dimensions).to_vector()
            - a.position.restricted_to(dimensions).to_vector();
        let length = delta.norm();
        if length == 0.0 {
            return Err(ModelEditError::ZeroLengthLink(id));
        }
        Ok(Self {
            id,
            node_a: a.id,
            node_b: b.id,
            material,
            length,
            direction: Point::from(delta / length),
            dimensions,
        })
    }

    /// Undeformed length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction cosine along `axis`.
    #[must_use]
    pub fn cosine(&self, axis: Axis) -> f64 {
        self.direction.component(axis)
    }

    /// One direction cosine per active axis.
    #[must_use]
    pub fn direction_cosines(&self) -> Vec<f64> {
        self.dimensions
            .axes()
            .iter()
            .map(|&axis| self.cosine(axis))
            .collect()
    }

    /// Axial stiffness `A * E / L`.
    #[must_use]
    pub fn axial_stiffness(&self) -> f64 {
        self.material.axial_rigidity() / self.length
    }

    /// Whether the link touches `node`.
    #[must_use]
    pub fn connects(&self, node: NodeId) -> bool {
        self.node_a == node || self.node_b == node
    }

    /// Mass of the member.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.material.mass_of(self.length)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    fn material() -> Material {
        Material::new(0, 100.0, 2.0, 3.0).expect("valid material")
    }

    #[test]
    fn derives_length_and_cosines() {
        let a = Node::new(0, point(0.0, 0.0, 0.0));
        let b = Node::new(1, point(3.0, 4.0, 0.0));
        let link = Link::new(7, &a, &b, material(), Dimensions::Two).expect("valid link");
        assert_relative_eq!(link.length(), 5.0);
        assert_eq!(link.direction_cosines(), vec![0.6, 0.8]);
        assert_relative_eq!(link.axial_stiffness(), 40.0);
        assert_relative_eq!(link.mass(), 30.0);
    }

    #[test]
    fn rejects_degenerate_links() {
        let a = Node::new(0, point(1.0, 1.0, 0.0));
        let b = Node::new(1, point(1.0, 1.0, 0.0));
        assert_eq!(
            Link::new(2, &a, &a, material(), Dimensions::Two),
            Err(ModelEditError::SelfLink(0))
        );
        assert_eq!(
            Link::new(2, &a, &b, material(), Dimensions::Two),
            Err(ModelEditError::ZeroLengthLink(2))
        );
    }
}
