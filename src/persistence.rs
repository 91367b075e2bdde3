//! JSON documents holding a model and its last solution.
//!
//! Links are stored by id and rebuilt through [`Model::add_link`] on load, so a
//! document that breaks an editing rule is rejected rather than half loaded.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::PersistenceError;
use crate::geometry::Dimensions;
use crate::material::Material;
use crate::model::{Model, Units};
use crate::node::Node;
use crate::solution::Solution;
use crate::{LinkId, MaterialId, NodeId};

/// A link as stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Link identifier.
    pub id: LinkId,
    /// Start node.
    pub node_a: NodeId,
    /// End node.
    pub node_b: NodeId,
    /// Material identifier.
    pub material: MaterialId,
}

/// Serialized form of a [`Model`].
///
/// Every field except `dimensions` may be missing; older documents load with
/// empty units, notes and solution data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    /// Format version.
    #[serde(default = "ModelFile::first_version")]
    pub version: u32,
    /// Dimensionality of the model.
    pub dimensions: Dimensions,
    /// Unit labels.
    #[serde(default)]
    pub units: Units,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Material definitions.
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Nodes with their constraints and loads.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Links by id.
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    /// Last solution, if the model was solved when saved.
    #[serde(default)]
    pub solution: Option<Solution>,
}

impl ModelFile {
    /// Version written by this build.
    pub const CURRENT_VERSION: u32 = 1;

    /// Version assumed for documents without one.
    fn first_version() -> u32 {
        1
    }

    /// Capture a model and its cached solution.
    #[must_use]
    pub fn from_model(model: &Model) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            dimensions: model.dimensions(),
            units: model.units().clone(),
            notes: model.notes().to_owned(),
            materials: model.materials().copied().collect(),
            nodes: model.nodes().cloned().collect(),
            links: model
                .links()
                .map(|link| LinkRecord {
                    id: link.id,
                    node_a: link.node_a,
                    node_b: link.node_b,
                    material: link.material.id,
                })
                .collect(),
            solution: model.solution().cloned(),
        }
    }

    /// Rebuild the model, revalidating every material, node and link.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedVersion`] for newer documents and
    /// [`PersistenceError::Edit`] when the contents break a model invariant.
    pub fn into_model(self) -> Result<Model, PersistenceError> {
        if self.version > Self::CURRENT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                supported: Self::CURRENT_VERSION,
            });
        }

        let mut model = Model::new(self.dimensions);
        model.set_units(self.units);
        model.set_notes(self.notes);
        for material in self.materials {
            model.add_material(material)?;
        }
        for node in self.nodes {
            model.add_node(node.id, node.position)?;
            if node.is_constrained() {
                model.set_constraints(node.id, node.constraint)?;
            }
            if node.has_force() {
                model.set_force(node.id, node.force)?;
            }
        }
        for link in self.links {
            model.add_link(link.id, link.node_a, link.node_b, link.material)?;
        }

        match self.solution {
            Some(solution) if solution.dimensions != model.dimensions() => {
                warn!(
                    model = %model.dimensions(),
                    solution = %solution.dimensions,
                    "stored solution does not match the model; discarding it"
                );
            }
            solution => model.restore_solution(solution),
        }
        Ok(model)
    }
}

/// Serialize a model and its cached solution as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PersistenceError::Json`] when serialization fails.
///
/// # Examples
/// ```
/// use trusslink::{persistence, point, Dimensions, Model};
///
/// let mut model = Model::new(Dimensions::Two);
/// model.add_node(3, point(1.0, 2.0, 0.0))?;
/// let text = persistence::to_json(&model)?;
/// let restored = persistence::from_json(&text)?;
/// assert_eq!(restored.node(3), model.node(3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_json(model: &Model) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&ModelFile::from_model(model))?)
}

/// Parse a model document.
///
/// # Errors
///
/// Returns [`PersistenceError`] when the text is not a valid model document.
pub fn from_json(text: &str) -> Result<Model, PersistenceError> {
    let file: ModelFile = serde_json::from_str(text)?;
    file.into_model()
}

/// Write a model document to `path`.
///
/// # Errors
///
/// Returns [`PersistenceError`] when serialization or writing fails.
pub fn save(model: &Model, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    fs::write(path, to_json(model)?)?;
    info!(path = %path.display(), "saved model");
    Ok(())
}

/// Read a model document from `path`.
///
/// # Errors
///
/// Returns [`PersistenceError`] when reading or parsing fails.
pub fn load(path: impl AsRef<Path>) -> Result<Model, PersistenceError> {
    let path = path.as_ref();
    let model = from_json(&fs::read_to_string(path)?)?;
    info!(
        path = %path.display(),
        nodes = model.node_count(),
        links = model.link_count(),
        "loaded model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelEditError;

    const LEGACY: &str = r#"{
        "dimensions": 2,
        "materials": [{ "id": 0, "modulus": 100.0, "area": 1.0 }],
        "nodes": [
            { "id": 0, "position": { "x": 0.0, "y": 0.0 }, "constraint": [0.0, 0.0, null] },
            { "id": 1, "position": { "x": 1.0, "y": 0.0 }, "force": { "x": 1.0, "y": 0.0 } }
        ],
        "links": [{ "id": 0, "node_a": 0, "node_b": 1, "material": 0 }],
        "solution": {
            "dimensions": 2,
            "nodes": {},
            "links": {},
            "extremes": {
                "max_strain": 0.0, "min_strain": 0.0,
                "max_stress": 0.0, "min_stress": 0.0,
                "max_tension": 0.0, "min_tension": 0.0
            }
        }
    }"#;

    #[test]
    fn legacy_documents_load_with_defaults() {
        let model = from_json(LEGACY).expect("legacy document loads");
        assert_eq!(model.units(), &Units::default());
        assert_eq!(model.notes(), "");
        assert_eq!(model.material(0).map(|material| material.density), Some(0.0));
        assert_eq!(model.link(0).map(|link| link.length()), Some(1.0));

        let solution = model.solution().expect("solution restored");
        assert_eq!(solution.mass.total_mass, 0.0);
        assert!(solution.mass.per_material_mass.is_empty());
        assert!(solution.system.is_none());
    }

    #[test]
    fn newer_versions_are_rejected() {
        let error = from_json(r#"{ "version": 9, "dimensions": 3 }"#).expect_err("too new");
        assert!(matches!(
            error,
            PersistenceError::UnsupportedVersion {
                found: 9,
                supported: 1
            }
        ));
    }

    #[test]
    fn broken_links_are_rejected() {
        let text = r#"{
            "dimensions": 2,
            "nodes": [{ "id": 0, "position": { "x": 0.0, "y": 0.0 } }],
            "links": [{ "id": 0, "node_a": 0, "node_b": 5, "material": 0 }]
        }"#;
        let error = from_json(text).expect_err("dangling link");
        assert!(matches!(
            error,
            PersistenceError::Edit(ModelEditError::UnknownNode(5))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            from_json("{ not json"),
            Err(PersistenceError::Json(_))
        ));
    }
}
