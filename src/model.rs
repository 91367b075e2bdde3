//! Editable link model: materials, nodes, links, and the cached solution.

use std::collections::BTreeMap;

use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ModelEditError, SolveError};
use crate::geometry::{Dimensions, Force, Point};
use crate::link::Link;
use crate::material::Material;
use crate::node::{Constraint, Node};
use crate::scope::Scope;
use crate::settings::SolverSettings;
use crate::solution::Solution;
use crate::solver::{SolveStatus, Solver};
use crate::{LinkId, MaterialId, NodeId};

/// Unit labels attached to a model. They are descriptive only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Units {
    /// Mass unit label.
    pub mass: String,
    /// Length unit label.
    pub length: String,
    /// Time unit label.
    pub time: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            mass: "kg".to_owned(),
            length: "m".to_owned(),
            time: "s".to_owned(),
        }
    }
}

/// Container for a pin-jointed link model.
///
/// Nodes, links and materials are addressed by caller-chosen integer ids. Ids do
/// not need to be contiguous, but the solver sizes its system by the largest node
/// id, so sparse numbering costs memory.
///
/// Every edit discards the cached [`Solution`].
#[derive(Clone, Debug)]
pub struct Model {
    /// Dimensionality shared by every node and link.
    dimensions: Dimensions,
    /// Material definitions keyed by id.
    materials: BTreeMap<MaterialId, Material>,
    /// Nodes keyed by id.
    nodes: BTreeMap<NodeId, Node>,
    /// Links keyed by id.
    links: BTreeMap<LinkId, Link>,
    /// Connectivity: an edge per link, weighted with the link id.
    topology: UnGraphMap<NodeId, LinkId>,
    /// Unit labels.
    units: Units,
    /// Free-form notes.
    notes: String,
    /// Result of the last solve, if still current.
    solution: Option<Solution>,
}

impl Model {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use trusslink::{Dimensions, Model};
    ///
    /// let model = Model::new(Dimensions::Three);
    /// assert_eq!(model.node_count(), 0);
    /// assert_eq!(model.next_node_id(), Some(0));
    /// ```
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            materials: BTreeMap::new(),
            nodes: BTreeMap::new(),
            links: BTreeMap::new(),
            topology: UnGraphMap::new(),
            units: Units::default(),
            notes: String::new(),
            solution: None,
        }
    }

    /// Dimensionality of the model.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a link.
    #[must_use]
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Look up a material.
    #[must_use]
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Links in id order.
    pub fn links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.values()
    }

    /// Materials in id order.
    pub fn materials(&self) -> impl Iterator<Item = &Material> + '_ {
        self.materials.values()
    }

    /// Ids of the nodes sharing a link with `node`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownNode`] when `node` is not part of this model.
    pub fn connected_nodes(&self, node: NodeId) -> Result<Vec<NodeId>, ModelEditError> {
        if !self.nodes.contains_key(&node) {
            return Err(ModelEditError::UnknownNode(node));
        }
        let mut connected: Vec<NodeId> = self.topology.neighbors(node).collect();
        connected.sort_unstable();
        Ok(connected)
    }

    /// Smallest unused node id above every existing one, or `None` when the
    /// largest representable id is taken.
    #[must_use]
    pub fn next_node_id(&self) -> Option<NodeId> {
        next_id(&self.nodes)
    }

    /// Smallest unused link id above every existing one, if any.
    #[must_use]
    pub fn next_link_id(&self) -> Option<LinkId> {
        next_id(&self.links)
    }

    /// Smallest unused material id above every existing one, if any.
    #[must_use]
    pub fn next_material_id(&self) -> Option<MaterialId> {
        next_id(&self.materials)
    }

    /// Bounding box and characteristic size of the nodes.
    #[must_use]
    pub fn scope(&self) -> Option<Scope> {
        Scope::of(self.nodes.values().map(|node| node.position), self.dimensions)
    }

    /// Unit labels.
    #[must_use]
    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Replace the unit labels.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// Free-form notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replace the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Result of the last solve, unless the model changed since.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Define or replace a material.
    ///
    /// Replacing a material rewrites every link that referenced the old
    /// definition, so later solves use the new properties. Returns the replaced
    /// definition.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::InvalidMaterial`] when the properties are not
    /// physically meaningful.
    pub fn add_material(&mut self, material: Material) -> Result<Option<Material>, ModelEditError> {
        material.validate()?;
        self.invalidate();
        let previous = self.materials.insert(material.id, material);
        if previous.is_some() {
            warn!(material = material.id, "replacing existing material");
            for link in self.links.values_mut() {
                if link.material.id == material.id {
                    link.material = material;
                }
            }
        }
        Ok(previous)
    }

    /// Delete a material no link uses.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownMaterial`] when `id` is not defined and
    /// [`ModelEditError::MaterialInUse`] when a link references it.
    pub fn remove_material(&mut self, id: MaterialId) -> Result<Material, ModelEditError> {
        if !self.materials.contains_key(&id) {
            return Err(ModelEditError::UnknownMaterial(id));
        }
        if let Some(link) = self.links.values().find(|link| link.material.id == id) {
            return Err(ModelEditError::MaterialInUse {
                material: id,
                link: link.id,
            });
        }
        self.invalidate();
        self.materials
            .remove(&id)
            .ok_or(ModelEditError::UnknownMaterial(id))
    }

    /// Create a node, or move an existing one.
    ///
    /// Moving keeps the node's constraints and load and rebuilds every attached
    /// link. Returns the previous position when the node already existed. In a
    /// planar model the `z` coordinate is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::LocationOccupied`] when another node sits at
    /// `position` and [`ModelEditError::NonFiniteValue`] for NaN or infinite
    /// coordinates.
    ///
    /// # Examples
    /// ```
    /// use trusslink::{point, Dimensions, Model, ModelEditError};
    ///
    /// let mut model = Model::new(Dimensions::Two);
    /// assert_eq!(model.add_node(0, point(0.0, 0.0, 0.0)), Ok(None));
    /// assert_eq!(
    ///     model.add_node(1, point(0.0, 0.0, 0.0)),
    ///     Err(ModelEditError::LocationOccupied { node: 1, existing: 0 })
    /// );
    /// ```
    pub fn add_node(&mut self, id: NodeId, position: Point) -> Result<Option<Point>, ModelEditError> {
        let position = self.checked_position(id, position)?;
        if let Some(existing) = self.occupant(position, |other| other == id) {
            return Err(ModelEditError::LocationOccupied { node: id, existing });
        }

        let Some(current) = self.nodes.get(&id) else {
            self.invalidate();
            self.nodes.insert(id, Node::new(id, position));
            self.topology.add_node(id);
            return Ok(None);
        };

        let previous = current.position;
        let mut moved = current.clone();
        moved.position = position;
        let rebuilt = self
            .links
            .values()
            .filter(|link| link.connects(id))
            .map(|link| self.rebuild_link(link, &moved))
            .collect::<Result<Vec<_>, _>>()?;

        warn!(node = id, "replacing existing node");
        self.invalidate();
        self.nodes.insert(id, moved);
        for link in rebuilt {
            self.links.insert(link.id, link);
        }
        Ok(Some(previous))
    }

    /// Create `count` evenly spaced nodes from `from` to `to`.
    ///
    /// Node ids are `start + i * spacing`; `start` defaults to
    /// [`next_node_id`](Self::next_node_id). Nothing is created when any id or
    /// position is taken.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::ZeroStep`] for a zero count or spacing,
    /// [`ModelEditError::NodeExists`] when an id is taken,
    /// [`ModelEditError::LocationOccupied`] when a position is taken and
    /// [`ModelEditError::IdsExhausted`] when an id would pass `usize::MAX`.
    ///
    /// # Examples
    /// ```
    /// use trusslink::{point, Dimensions, Model};
    ///
    /// let mut model = Model::new(Dimensions::Two);
    /// let ids = model.add_nodes_linear(Some(10), 3, 2, point(0.0, 0.0, 0.0), point(4.0, 0.0, 0.0))?;
    /// assert_eq!(ids, vec![10, 12, 14]);
    /// assert_eq!(model.node(12).map(|node| node.position.x), Some(2.0));
    /// # Ok::<(), trusslink::ModelEditError>(())
    /// ```
    pub fn add_nodes_linear(
        &mut self,
        start: Option<NodeId>,
        count: usize,
        spacing: usize,
        from: Point,
        to: Point,
    ) -> Result<Vec<NodeId>, ModelEditError> {
        if count == 0 {
            return Err(ModelEditError::ZeroStep("node count"));
        }
        if spacing == 0 {
            return Err(ModelEditError::ZeroStep("node spacing"));
        }
        let start = match start {
            Some(start) => start,
            None => self
                .next_node_id()
                .ok_or(ModelEditError::IdsExhausted("node"))?,
        };
        let ids: Vec<NodeId> = (0..count)
            .map(|step| {
                step.checked_mul(spacing)
                    .and_then(|offset| start.checked_add(offset))
            })
            .collect::<Option<_>>()
            .ok_or(ModelEditError::IdsExhausted("node"))?;
        if let Some(&taken) = ids.iter().find(|id| self.nodes.contains_key(id)) {
            return Err(ModelEditError::NodeExists(taken));
        }

        let mut pending: Vec<Node> = Vec::with_capacity(count);
        for (step, &id) in ids.iter().enumerate() {
            let position = self.checked_position(id, interpolate(from, to, step, count))?;
            if let Some(existing) = self.occupant(position, |_| false) {
                return Err(ModelEditError::LocationOccupied { node: id, existing });
            }
            if let Some(twin) = pending.iter().find(|node| node.position == position) {
                return Err(ModelEditError::LocationOccupied {
                    node: id,
                    existing: twin.id,
                });
            }
            pending.push(Node::new(id, position));
        }

        self.invalidate();
        for node in pending {
            self.topology.add_node(node.id);
            self.nodes.insert(node.id, node);
        }
        debug!(count, start, spacing, "created linear node run");
        Ok(ids)
    }

    /// Delete an unlinked node.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownNode`] when `id` is not part of this model
    /// and [`ModelEditError::NodeLinked`] while any link is attached.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, ModelEditError> {
        if !self.nodes.contains_key(&id) {
            return Err(ModelEditError::UnknownNode(id));
        }
        if self.topology.neighbors(id).next().is_some() {
            return Err(ModelEditError::NodeLinked(id));
        }
        self.invalidate();
        self.topology.remove_node(id);
        self.nodes.remove(&id).ok_or(ModelEditError::UnknownNode(id))
    }

    /// Connect two nodes with a new link.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError`] when a node or the material is unknown, both
    /// ends are the same node, the link id is taken, or the nodes are already
    /// linked.
    pub fn add_link(
        &mut self,
        id: LinkId,
        a: NodeId,
        b: NodeId,
        material: MaterialId,
    ) -> Result<(), ModelEditError> {
        let link = self.build_link(id, a, b, material)?;
        self.invalidate();
        self.topology.add_edge(a, b, id);
        self.links.insert(id, link);
        Ok(())
    }

    /// Link every node `n` in `lower..=upper - node_spacing` to `n + node_spacing`.
    ///
    /// Missing nodes and pairs that are already linked are skipped. New link ids
    /// start at `start` (default [`next_link_id`](Self::next_link_id)) and advance
    /// by `link_spacing`; `lower` defaults to 0 and `upper` to the largest node id.
    /// Nothing is created when any link fails.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::NoNodes`] on an empty model,
    /// [`ModelEditError::ZeroStep`] for a zero spacing,
    /// [`ModelEditError::UnknownMaterial`], [`ModelEditError::LinkExists`], and
    /// [`ModelEditError::IdsExhausted`] when a link id would pass `usize::MAX`.
    ///
    /// # Examples
    /// ```
    /// use trusslink::{point, Dimensions, Material, Model};
    ///
    /// let mut model = Model::new(Dimensions::Two);
    /// model.add_material(Material::new(0, 1.0, 1.0, 0.0)?)?;
    /// model.add_nodes_linear(None, 4, 1, point(0.0, 0.0, 0.0), point(3.0, 0.0, 0.0))?;
    /// let links = model.add_links_sequential(None, None, None, 0, 1, 1)?;
    /// assert_eq!(links, vec![0, 1, 2]);
    /// assert_eq!(model.connected_nodes(1)?, vec![0, 2]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn add_links_sequential(
        &mut self,
        start: Option<LinkId>,
        lower: Option<NodeId>,
        upper: Option<NodeId>,
        material: MaterialId,
        node_spacing: usize,
        link_spacing: usize,
    ) -> Result<Vec<LinkId>, ModelEditError> {
        let max_node = *self.nodes.keys().next_back().ok_or(ModelEditError::NoNodes)?;
        if node_spacing == 0 {
            return Err(ModelEditError::ZeroStep("node spacing"));
        }
        if link_spacing == 0 {
            return Err(ModelEditError::ZeroStep("link spacing"));
        }
        if !self.materials.contains_key(&material) {
            return Err(ModelEditError::UnknownMaterial(material));
        }
        let lower = lower.unwrap_or(0);
        let upper = upper.unwrap_or(max_node);
        let mut next = match start {
            Some(start) => Some(start),
            None => self.next_link_id(),
        };

        let mut pending = Vec::new();
        if upper >= node_spacing && lower <= upper - node_spacing {
            let last = upper - node_spacing;
            for &a in self.nodes.range(lower..=last).map(|(id, _)| id) {
                let b = a + node_spacing;
                if !self.nodes.contains_key(&b) || self.topology.contains_edge(a, b) {
                    continue;
                }
                let id = next.ok_or(ModelEditError::IdsExhausted("link"))?;
                pending.push(self.build_link(id, a, b, material)?);
                next = id.checked_add(link_spacing);
            }
        }

        self.invalidate();
        let ids = pending.iter().map(|link| link.id).collect();
        for link in pending {
            self.topology.add_edge(link.node_a, link.node_b, link.id);
            self.links.insert(link.id, link);
        }
        Ok(ids)
    }

    /// Delete a link.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownLink`] when `id` is not part of this model.
    pub fn remove_link(&mut self, id: LinkId) -> Result<Link, ModelEditError> {
        let link = self.links.get(&id).ok_or(ModelEditError::UnknownLink(id))?;
        let (a, b) = (link.node_a, link.node_b);
        self.invalidate();
        self.topology.remove_edge(a, b);
        self.links.remove(&id).ok_or(ModelEditError::UnknownLink(id))
    }

    /// Prescribe displacements at a node, replacing any previous constraints.
    ///
    /// Each entry corresponds to the X, Y and Z axes; `Some(0.0)` fixes the axis.
    /// The Z entry is ignored in a planar model. Returns `true` when earlier
    /// constraints were replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownNode`] when `node` is not part of this
    /// model and [`ModelEditError::NonFiniteValue`] for NaN or infinite values.
    pub fn set_constraints(
        &mut self,
        node: NodeId,
        constraint: Constraint,
    ) -> Result<bool, ModelEditError> {
        if constraint.iter().flatten().any(|value| !value.is_finite()) {
            return Err(ModelEditError::NonFiniteValue(node));
        }
        let dimensions = self.dimensions;
        let target = self.node_mut(node)?;
        let replaced = target.is_constrained();
        target.constraint = constraint;
        if dimensions == Dimensions::Two {
            target.constraint[2] = None;
        }
        Ok(replaced)
    }

    /// Remove every constraint at a node. Returns whether any existed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownNode`] when `node` is not part of this model.
    pub fn clear_constraints(&mut self, node: NodeId) -> Result<bool, ModelEditError> {
        let target = self.node_mut(node)?;
        let had = target.is_constrained();
        target.constraint = [None; 3];
        Ok(had)
    }

    /// Apply a load at a node, replacing any previous load.
    ///
    /// Returns `true` when a nonzero load was replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownNode`] when `node` is not part of this
    /// model and [`ModelEditError::NonFiniteValue`] for NaN or infinite values.
    pub fn set_force(&mut self, node: NodeId, force: Force) -> Result<bool, ModelEditError> {
        if !force.to_vector().iter().all(|value| value.is_finite()) {
            return Err(ModelEditError::NonFiniteValue(node));
        }
        let force = force.restricted_to(self.dimensions);
        let target = self.node_mut(node)?;
        let replaced = target.has_force();
        target.force = force;
        Ok(replaced)
    }

    /// Remove the load at a node. Returns whether a nonzero load existed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownNode`] when `node` is not part of this model.
    pub fn clear_force(&mut self, node: NodeId) -> Result<bool, ModelEditError> {
        let target = self.node_mut(node)?;
        let had = target.has_force();
        target.force = Force::default();
        Ok(had)
    }

    /// Solve the model with default settings and cache the solution.
    ///
    /// # Errors
    ///
    /// See [`Model::solve_with`].
    pub fn solve(&mut self) -> Result<SolveStatus, SolveError> {
        self.solve_with(SolverSettings::default())
    }

    /// Solve the model and cache the solution.
    ///
    /// Any previous solution is discarded first, so a failed solve leaves none.
    /// A solve that misses its constraints still caches its solution.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] when no solution could be produced.
    pub fn solve_with(&mut self, settings: SolverSettings) -> Result<SolveStatus, SolveError> {
        self.solution = None;
        let outcome = Solver::with_settings(self, settings).solve()?;
        self.solution = Some(outcome.solution);
        Ok(outcome.status)
    }

    /// Attach a previously computed solution, as when loading a saved model.
    pub(crate) fn restore_solution(&mut self, solution: Option<Solution>) {
        self.solution = solution;
    }

    /// Drop the cached solution after an edit.
    fn invalidate(&mut self) {
        if self.solution.take().is_some() {
            debug!("model edited; discarding cached solution");
        }
    }

    /// Mutable access to a node for an edit.
    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, ModelEditError> {
        if !self.nodes.contains_key(&id) {
            return Err(ModelEditError::UnknownNode(id));
        }
        self.invalidate();
        self.nodes.get_mut(&id).ok_or(ModelEditError::UnknownNode(id))
    }

    /// Validate a coordinate and drop axes the model does not use.
    fn checked_position(&self, id: NodeId, position: Point) -> Result<Point, ModelEditError> {
        let position = position.restricted_to(self.dimensions);
        if position.to_vector().iter().all(|value| value.is_finite()) {
            Ok(position)
        } else {
            Err(ModelEditError::NonFiniteValue(id))
        }
    }

    /// Id of a node at exactly `position`, ignoring nodes matched by `skip`.
    fn occupant(&self, position: Point, skip: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|node| !skip(node.id) && node.position == position)
            .map(|node| node.id)
    }

    /// Validate and construct a link without inserting it.
    fn build_link(
        &self,
        id: LinkId,
        a: NodeId,
        b: NodeId,
        material: MaterialId,
    ) -> Result<Link, ModelEditError> {
        let start = self.nodes.get(&a).ok_or(ModelEditError::UnknownNode(a))?;
        let end = self.nodes.get(&b).ok_or(ModelEditError::UnknownNode(b))?;
        if a == b {
            return Err(ModelEditError::SelfLink(a));
        }
        let material = *self
            .materials
            .get(&material)
            .ok_or(ModelEditError::UnknownMaterial(material))?;
        if self.links.contains_key(&id) {
            return Err(ModelEditError::LinkExists(id));
        }
        if let Some(&link) = self.topology.edge_weight(a, b) {
            return Err(ModelEditError::NodesAlreadyLinked { a, b, link });
        }
        Link::new(id, start, end, material, self.dimensions)
    }

    /// Recompute a link after one of its nodes moved.
    fn rebuild_link(&self, link: &Link, moved: &Node) -> Result<Link, ModelEditError> {
        let endpoint = |id: NodeId| {
            if id == moved.id {
                Ok(moved)
            } else {
                self.nodes.get(&id).ok_or(ModelEditError::UnknownNode(id))
            }
        };
        Link::new(
            link.id,
            endpoint(link.node_a)?,
            endpoint(link.node_b)?,
            link.material,
            self.dimensions,
        )
    }
}

/// One past the largest key, zero for an empty map, or `None` on overflow.
fn next_id<V>(map: &BTreeMap<usize, V>) -> Option<usize> {
    map.keys().next_back().map_or(Some(0), |&max| max.checked_add(1))
}

/// Point `step` of `count` evenly spaced points from `from` to `to`; the last
/// point lands exactly on `to`.
fn interpolate(from: Point, to: Point, step: usize, count: usize) -> Point {
    if count == 1 {
        return from;
    }
    if step + 1 == count {
        return to;
    }
    let fraction = step as f64 / (count - 1) as f64;
    Point::from(from.to_vector() + (to.to_vector() - from.to_vector()) * fraction)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{force, point};

    fn steel(id: MaterialId) -> Material {
        Material::new(id, 200.0e9, 0.01, 7_850.0).expect("valid material")
    }

    fn triangle() -> Model {
        let mut model = Model::new(Dimensions::Two);
        model.add_material(steel(0)).expect("material added");
        model.add_node(0, point(0.0, 0.0, 0.0)).expect("node added");
        model.add_node(1, point(4.0, 0.0, 0.0)).expect("node added");
        model.add_node(2, point(2.0, 3.0, 0.0)).expect("node added");
        model.add_link(0, 0, 1, 0).expect("link added");
        model.add_link(1, 1, 2, 0).expect("link added");
        model.add_link(2, 2, 0, 0).expect("link added");
        model
    }

    #[test]
    fn link_rules_are_enforced() {
        let mut model = triangle();
        assert_eq!(
            model.add_link(3, 1, 0, 0),
            Err(ModelEditError::NodesAlreadyLinked { a: 1, b: 0, link: 0 })
        );
        assert_eq!(model.add_link(0, 0, 1, 0), Err(ModelEditError::LinkExists(0)));
        assert_eq!(model.add_link(3, 2, 2, 0), Err(ModelEditError::SelfLink(2)));
        assert_eq!(model.add_link(3, 0, 9, 0), Err(ModelEditError::UnknownNode(9)));
        assert_eq!(
            model.add_link(3, 0, 1, 5),
            Err(ModelEditError::UnknownMaterial(5))
        );
        assert_eq!(model.connected_nodes(0), Ok(vec![1, 2]));
    }

    #[test]
    fn linked_nodes_and_used_materials_cannot_be_deleted() {
        let mut model = triangle();
        assert_eq!(model.remove_node(0), Err(ModelEditError::NodeLinked(0)));
        assert_eq!(
            model.remove_material(0),
            Err(ModelEditError::MaterialInUse {
                material: 0,
                link: 0
            })
        );
        model.remove_link(0).expect("link removed");
        model.remove_link(2).expect("link removed");
        assert_eq!(model.connected_nodes(0), Ok(vec![]));
        let removed = model.remove_node(0).expect("node removed");
        assert_eq!(removed.id, 0);
        assert_eq!(model.remove_link(0), Err(ModelEditError::UnknownLink(0)));
    }

    #[test]
    fn replacing_a_material_updates_links() {
        let mut model = triangle();
        let softer = Material::new(0, 100.0e9, 0.02, 0.0).expect("valid");
        let previous = model.add_material(softer).expect("replaced");
        assert_eq!(previous, Some(steel(0)));
        assert!(model.links().all(|link| link.material == softer));
    }

    #[test]
    fn moving_a_node_rebuilds_its_links() {
        let mut model = triangle();
        model
            .set_constraints(2, [Some(0.0), None, None])
            .expect("constraint set");
        let previous = model.add_node(2, point(2.0, 6.0, 0.0)).expect("moved");
        assert_eq!(previous, Some(point(2.0, 3.0, 0.0)));
        assert_relative_eq!(
            model.link(1).expect("exists").length(),
            40.0_f64.sqrt()
        );
        assert_eq!(model.link(0).expect("exists").length(), 4.0);
        assert!(model.node(2).expect("exists").is_constrained());
    }

    #[test]
    fn planar_models_drop_the_third_axis() {
        let mut model = triangle();
        model
            .set_constraints(0, [Some(0.0), Some(0.0), Some(0.0)])
            .expect("constraint set");
        model
            .set_force(2, force(1.0, 2.0, 3.0))
            .expect("force set");
        assert_eq!(model.node(0).expect("exists").constraint_count(), 2);
        assert_eq!(model.node(2).expect("exists").force.z, 0.0);
    }

    #[test]
    fn edits_discard_the_cached_solution() {
        let mut model = triangle();
        model
            .set_constraints(0, [Some(0.0), Some(0.0), None])
            .expect("constraint set");
        model
            .set_constraints(1, [None, Some(0.0), None])
            .expect("constraint set");
        model
            .set_force(2, force(0.0, -1_000.0, 0.0))
            .expect("force set");
        assert!(model.solve().expect("solves").is_success());
        assert!(model.solution().is_some());

        assert!(model.set_force(2, force(0.0, -2_000.0, 0.0)).expect("force set"));
        assert!(model.solution().is_none());
    }

    #[test]
    fn failed_solve_leaves_no_solution() {
        let mut model = triangle();
        model.set_force(2, force(5.0, 0.0, 0.0)).expect("force set");
        let error = model.solve().expect_err("unrestrained");
        assert!(matches!(error, SolveError::Precondition(_)));
        assert!(model.solution().is_none());
    }

    #[test]
    fn linear_runs_are_atomic() {
        let mut model = triangle();
        assert_eq!(
            model.add_nodes_linear(Some(3), 3, 1, point(-2.0, 0.0, 0.0), point(2.0, 0.0, 0.0)),
            Err(ModelEditError::LocationOccupied { node: 4, existing: 0 })
        );
        assert_eq!(
            model.add_nodes_linear(Some(1), 2, 5, point(9.0, 0.0, 0.0), point(9.0, 9.0, 0.0)),
            Err(ModelEditError::NodeExists(1))
        );
        assert_eq!(
            model.add_nodes_linear(None, 2, 1, point(9.0, 0.0, 0.0), point(9.0, 0.0, 0.0)),
            Err(ModelEditError::LocationOccupied { node: 4, existing: 3 })
        );
        assert_eq!(model.node_count(), 3);
    }

    #[test]
    fn sequential_links_skip_existing_pairs() {
        let mut model = triangle();
        model
            .add_nodes_linear(None, 2, 1, point(6.0, 0.0, 0.0), point(8.0, 0.0, 0.0))
            .expect("nodes added");
        let links = model
            .add_links_sequential(Some(10), None, None, 0, 1, 2)
            .expect("links added");
        // 0-1 and 1-2 already exist.
        assert_eq!(links, vec![10, 12]);
        assert_eq!(model.connected_nodes(3), Ok(vec![2, 4]));
        assert_eq!(
            model.add_links_sequential(None, None, None, 0, 0, 1),
            Err(ModelEditError::ZeroStep("node spacing"))
        );
    }

    #[test]
    fn next_ids_follow_the_largest() {
        let mut model = triangle();
        model.add_node(7, point(9.0, 9.0, 0.0)).expect("node added");
        assert_eq!(model.next_node_id(), Some(8));
        assert_eq!(model.next_link_id(), Some(3));
        assert_eq!(model.next_material_id(), Some(1));
    }

    #[test]
    fn ids_at_the_top_of_the_range_are_exhausted() {
        let mut model = triangle();
        model
            .add_node(usize::MAX, point(9.0, 9.0, 0.0))
            .expect("largest id is allowed");
        assert_eq!(model.next_node_id(), None);
        assert_eq!(
            model.add_nodes_linear(None, 2, 1, point(5.0, 0.0, 0.0), point(6.0, 0.0, 0.0)),
            Err(ModelEditError::IdsExhausted("node"))
        );
        assert_eq!(
            model.add_nodes_linear(
                Some(usize::MAX - 1),
                3,
                1,
                point(5.0, 0.0, 0.0),
                point(6.0, 0.0, 0.0)
            ),
            Err(ModelEditError::IdsExhausted("node"))
        );
        assert_eq!(model.node_count(), 4);

        model.add_node(usize::MAX - 1, point(8.0, 9.0, 0.0)).expect("node added");
        assert_eq!(
            model.add_links_sequential(Some(usize::MAX), Some(usize::MAX - 1), None, 0, 1, 1),
            Ok(vec![usize::MAX])
        );
        assert_eq!(model.next_link_id(), None);
    }

    #[test]
    fn sequential_links_reach_the_largest_node_id() {
        let mut model = triangle();
        model.add_node(usize::MAX, point(9.0, 9.0, 0.0)).expect("node added");
        assert_eq!(
            model.add_links_sequential(None, None, Some(usize::MAX), 0, 1, 1),
            Ok(vec![])
        );
        assert_eq!(
            model.add_links_sequential(None, Some(5), Some(usize::MAX), 0, usize::MAX, 1),
            Ok(vec![])
        );
        assert_eq!(
            model.add_links_sequential(None, Some(2), None, 0, usize::MAX - 2, 1),
            Ok(vec![3])
        );
        assert_eq!(model.connected_nodes(usize::MAX), Ok(vec![2]));
    }

    #[test]
    fn sequential_link_ids_stop_at_the_largest() {
        let mut model = Model::new(Dimensions::Two);
        model.add_material(steel(0)).expect("material added");
        model
            .add_nodes_linear(None, 3, 1, point(0.0, 0.0, 0.0), point(2.0, 0.0, 0.0))
            .expect("nodes added");
        assert_eq!(
            model.add_links_sequential(Some(usize::MAX), None, None, 0, 1, 1),
            Err(ModelEditError::IdsExhausted("link"))
        );
        assert_eq!(model.link_count(), 0);
    }
}
