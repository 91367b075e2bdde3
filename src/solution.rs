//! Results derived from a solved linear system.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Dimensions, Displacement, Force, Point};
use crate::link::Link;
use crate::node::Node;
use crate::solver::LinearSystem;
use crate::{LinkId, MaterialId, NodeId};

/// Solved state of one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSolution {
    /// Node identifier.
    pub id: NodeId,
    /// Displacement with constrained axes set exactly to their prescribed value.
    pub displacement: Displacement,
    /// Displacement as returned by the penalty solve.
    pub calculated_displacement: Displacement,
    /// Reaction `K U` at the node.
    pub reaction: Force,
    /// Undeformed position plus `displacement`.
    pub solved_position: Point,
    /// Undeformed position plus the display-scaled displacement.
    pub exaggerated_position: Point,
}

/// Solved state of one link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkSolution {
    /// Link identifier.
    pub id: LinkId,
    /// Start node.
    pub node_a: NodeId,
    /// End node.
    pub node_b: NodeId,
    /// Material the link was solved with.
    pub material: MaterialId,
    /// Distance between the solved end positions.
    pub deformed_length: f64,
    /// Engineering strain; positive when stretched.
    pub strain: f64,
    /// Axial stress `E * strain`.
    pub stress: f64,
    /// Axial force `stress * A`; positive in tension.
    pub tension: f64,
}

/// Largest and smallest link responses.
///
/// Every bound starts at zero, so maxima are never negative and minima never
/// positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    /// Largest strain.
    pub max_strain: f64,
    /// Smallest strain.
    pub min_strain: f64,
    /// Largest stress.
    pub max_stress: f64,
    /// Smallest stress.
    pub min_stress: f64,
    /// Largest axial force.
    pub max_tension: f64,
    /// Smallest axial force.
    pub min_tension: f64,
}

impl Extremes {
    /// Widen the bounds to include `link`.
    fn include(&mut self, link: &LinkSolution) {
        self.max_strain = self.max_strain.max(link.strain);
        self.min_strain = self.min_strain.min(link.strain);
        self.max_stress = self.max_stress.max(link.stress);
        self.min_stress = self.min_stress.min(link.stress);
        self.max_tension = self.max_tension.max(link.tension);
        self.min_tension = self.min_tension.min(link.tension);
    }
}

/// Length and mass totals, per material and for the whole model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassProperties {
    /// Sum of every link mass.
    pub total_mass: f64,
    /// Sum of every undeformed link length.
    pub total_length: f64,
    /// Mass per material.
    pub per_material_mass: BTreeMap<MaterialId, f64>,
    /// Undeformed length per material.
    pub per_material_length: BTreeMap<MaterialId, f64>,
}

impl MassProperties {
    /// Aggregate the undeformed lengths and masses of `links`.
    ///
    /// # Examples
    /// ```
    /// use trusslink::{point, Dimensions, Link, MassProperties, Material, Node};
    ///
    /// let steel = Material::new(0, 200.0e9, 0.01, 7_850.0)?;
    /// let a = Node::new(0, point(0.0, 0.0, 0.0));
    /// let b = Node::new(1, point(2.0, 0.0, 0.0));
    /// let link = Link::new(0, &a, &b, steel, Dimensions::Two)?;
    ///
    /// let mass = MassProperties::of([&link]);
    /// assert_eq!(mass.total_length, 2.0);
    /// assert!((mass.total_mass - 157.0).abs() < 1.0e-9);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of<'a>(links: impl IntoIterator<Item = &'a Link>) -> Self {
        let mut properties = Self::default();
        for link in links {
            let material = link.material.id;
            let length = link.length();
            let mass = link.mass();
            *properties.per_material_length.entry(material).or_insert(0.0) += length;
            *properties.per_material_mass.entry(material).or_insert(0.0) += mass;
            properties.total_length += length;
            properties.total_mass += mass;
        }
        properties
    }
}

/// Everything computed by one solve.
///
/// Files written before mass properties or the linear system were stored load
/// with those fields empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Dimensionality of the solved model.
    pub dimensions: Dimensions,
    /// Per-node results keyed by node id.
    pub nodes: BTreeMap<NodeId, NodeSolution>,
    /// Per-link results keyed by link id.
    pub links: BTreeMap<LinkId, LinkSolution>,
    /// Bounds of the link responses.
    pub extremes: Extremes,
    /// Length and mass aggregates.
    #[serde(default)]
    pub mass: MassProperties,
    /// Matrices and vectors of the solve.
    #[serde(default)]
    pub system: Option<LinearSystem>,
}

impl Solution {
    /// Results for one node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeSolution> {
        self.nodes.get(&id)
    }

    /// Results for one link.
    #[must_use]
    pub fn link(&self, id: LinkId) -> Option<&LinkSolution> {
        self.links.get(&id)
    }

    /// Largest displacement magnitude among the model's nodes.
    #[must_use]
    pub fn max_displacement(&self) -> f64 {
        self.nodes
            .values()
            .map(|node| node.displacement.magnitude())
            .fold(0.0, f64::max)
    }
}

/// Turns a solved [`LinearSystem`] into a [`Solution`].
pub(crate) struct PostProcessor<'a> {
    /// Dimensionality of the solved model.
    pub(crate) dimensions: Dimensions,
    /// Snapshot nodes.
    pub(crate) nodes: &'a BTreeMap<NodeId, Node>,
    /// Snapshot links.
    pub(crate) links: &'a BTreeMap<LinkId, Link>,
    /// Characteristic size of the model.
    pub(crate) model_size: f64,
    /// Largest exaggerated displacement as a fraction of `model_size`.
    pub(crate) exaggeration_fraction: f64,
}

impl PostProcessor<'_> {
    /// Derive node, link and aggregate results.
    pub(crate) fn compile(&self, system: LinearSystem) -> Solution {
        let scale = self.exaggeration_fraction * self.model_size
            / self.max_slot_displacement(&system);

        let nodes: BTreeMap<NodeId, NodeSolution> = self
            .nodes
            .values()
            .map(|node| (node.id, self.node_solution(node, &system, scale)))
            .collect();

        let mut extremes = Extremes::default();
        let links: BTreeMap<LinkId, LinkSolution> = self
            .links
            .values()
            .filter_map(|link| {
                let solution = Self::link_solution(link, &nodes)?;
                extremes.include(&solution);
                Some((link.id, solution))
            })
            .collect();

        Solution {
            dimensions: self.dimensions,
            nodes,
            links,
            extremes,
            mass: MassProperties::of(self.links.values()),
            system: Some(system),
        }
    }

    /// Largest raw displacement over every node slot of the system, including
    /// unused ids; one when nothing moves.
    fn max_slot_displacement(&self, system: &LinearSystem) -> f64 {
        let d = self.dimensions.count();
        let max = system
            .displacements
            .as_slice()
            .chunks(d)
            .map(|slot| Displacement::from_components(slot).magnitude())
            .fold(0.0, f64::max);
        if max == 0.0 {
            1.0
        } else {
            max
        }
    }

    /// Build the result record of one node.
    fn node_solution(&self, node: &Node, system: &LinearSystem, scale: f64) -> NodeSolution {
        let d = self.dimensions.count();
        let base = node.id * d;
        let raw = &system.displacements.as_slice()[base..base + d];
        let calculated_displacement = Displacement::from_components(raw);

        let mut written_back = raw.to_vec();
        for (axis, prescribed) in node.prescribed(self.dimensions) {
            written_back[axis.index()] = prescribed;
        }
        let displacement = Displacement::from_components(&written_back);

        NodeSolution {
            id: node.id,
            displacement,
            calculated_displacement,
            reaction: Force::from_components(&system.reactions.as_slice()[base..base + d]),
            solved_position: node.position.displaced(displacement),
            exaggerated_position: node.position.displaced(displacement.scaled(scale)),
        }
    }

    /// Build the result record of one link from the solved node positions.
    fn link_solution(
        link: &Link,
        nodes: &BTreeMap<NodeId, NodeSolution>,
    ) -> Option<LinkSolution> {
        let start = nodes.get(&link.node_a)?.solved_position.to_vector();
        let end = nodes.get(&link.node_b)?.solved_position.to_vector();
        let deformed_length = (end - start).norm();
        let strain = (deformed_length - link.length()) / link.length();
        let stress = link.material.modulus * strain;
        Some(LinkSolution {
            id: link.id,
            node_a: link.node_a,
            node_b: link.node_b,
            material: link.material.id,
            deformed_length,
            strain,
            stress,
            tension: stress * link.material.area,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;
    use crate::material::Material;
    use nalgebra::{DMatrix, DVector};

    fn system(displacements: Vec<f64>) -> LinearSystem {
        let dof = displacements.len();
        LinearSystem {
            stiffness: DMatrix::zeros(dof, dof),
            penalty_stiffness: DMatrix::zeros(dof, dof),
            loads: DVector::zeros(dof),
            penalty_loads: DVector::zeros(dof),
            displacements: DVector::from_vec(displacements),
            reactions: DVector::from_element(dof, 1.0),
            repaired_dofs: Vec::new(),
        }
    }

    fn two_node_snapshot() -> (BTreeMap<NodeId, Node>, BTreeMap<LinkId, Link>) {
        let mut a = Node::new(0, point(0.0, 0.0, 0.0));
        a.constraint = [Some(0.0), Some(0.0), None];
        let b = Node::new(1, point(1.0, 0.0, 0.0));
        let material = Material::new(2, 100.0, 0.5, 4.0).expect("valid");
        let link = Link::new(9, &a, &b, material, Dimensions::Two).expect("valid");
        (
            BTreeMap::from([(0, a), (1, b)]),
            BTreeMap::from([(9, link)]),
        )
    }

    #[test]
    fn constrained_axes_are_written_back() {
        let (nodes, links) = two_node_snapshot();
        let processor = PostProcessor {
            dimensions: Dimensions::Two,
            nodes: &nodes,
            links: &links,
            model_size: 2.0,
            exaggeration_fraction: 0.05,
        };
        let solution = processor.compile(system(vec![1.0e-9, -2.0e-9, 0.01, 0.0]));

        let fixed = solution.node(0).expect("solved");
        assert_eq!(fixed.displacement, Displacement::new(0.0, 0.0, 0.0));
        assert_eq!(fixed.calculated_displacement.x, 1.0e-9);
        assert_eq!(fixed.reaction, Force::new(1.0, 1.0, 0.0));

        let free = solution.node(1).expect("solved");
        assert_relative_eq!(free.solved_position.x, 1.01);
        // The largest displacement is drawn at 5% of the model size.
        assert_relative_eq!(free.exaggerated_position.x, 1.1, max_relative = 1.0e-12);
    }

    #[test]
    fn stretched_link_is_in_tension() {
        let (nodes, links) = two_node_snapshot();
        let processor = PostProcessor {
            dimensions: Dimensions::Two,
            nodes: &nodes,
            links: &links,
            model_size: 1.0,
            exaggeration_fraction: 0.05,
        };
        let solution = processor.compile(system(vec![0.0, 0.0, 0.01, 0.0]));
        let link = solution.link(9).expect("solved");
        assert_relative_eq!(link.strain, 0.01, max_relative = 1.0e-9);
        assert_relative_eq!(link.stress, 1.0, max_relative = 1.0e-9);
        assert_relative_eq!(link.tension, 0.5, max_relative = 1.0e-9);
        assert_eq!(solution.extremes.min_stress, 0.0);
        assert_relative_eq!(solution.extremes.max_tension, 0.5, max_relative = 1.0e-9);
    }

    #[test]
    fn zero_displacement_keeps_positions() {
        let (nodes, links) = two_node_snapshot();
        let processor = PostProcessor {
            dimensions: Dimensions::Two,
            nodes: &nodes,
            links: &links,
            model_size: 1.0,
            exaggeration_fraction: 0.05,
        };
        let solution = processor.compile(system(vec![0.0; 4]));
        let free = solution.node(1).expect("solved");
        assert_eq!(free.exaggerated_position, point(1.0, 0.0, 0.0));
        assert_eq!(solution.link(9).expect("solved").strain, 0.0);
    }

    #[test]
    fn mass_is_grouped_by_material() {
        let (_, links) = two_node_snapshot();
        let mass = MassProperties::of(links.values());
        assert_relative_eq!(mass.total_mass, 2.0);
        assert_eq!(mass.per_material_length.get(&2), Some(&1.0));
        assert_eq!(mass.per_material_mass.len(), 1);
    }
}
