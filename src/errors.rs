//! Error types produced while editing, solving or persisting link models.

use thiserror::Error;

use crate::geometry::Axis;
use crate::{LinkId, MaterialId, NodeId};

/// Error returned when a material definition is not physically meaningful.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MaterialPropertyError {
    /// Returned when the cross-sectional area is zero or negative.
    #[error("material {material}: area must be positive (received {area})")]
    NonPositiveArea {
        /// Identifier of the affected material.
        material: MaterialId,
        /// Rejected cross-sectional area.
        area: f64,
    },
    /// Returned when the elastic modulus is zero or negative.
    #[error("material {material}: Young's modulus must be positive (received {modulus})")]
    NonPositiveModulus {
        /// Identifier of the affected material.
        material: MaterialId,
        /// Rejected elastic modulus.
        modulus: f64,
    },
    /// Returned when the density is negative.
    #[error("material {material}: density must not be negative (received {density})")]
    NegativeDensity {
        /// Identifier of the affected material.
        material: MaterialId,
        /// Rejected density.
        density: f64,
    },
    /// Returned when any property is NaN or infinite.
    #[error("material {material}: properties must be finite")]
    NonFinite {
        /// Identifier of the affected material.
        material: MaterialId,
    },
}

/// Error returned when an edit would break a model invariant.
///
/// # Examples
///
/// ```
/// use trusslink::{Dimensions, Model, ModelEditError};
///
/// let mut model = Model::new(Dimensions::Two);
/// let error = model
///     .remove_node(42)
///     .expect_err("unknown node is rejected");
/// assert_eq!(error, ModelEditError::UnknownNode(42));
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum ModelEditError {
    /// Returned when a node cannot be found in the model.
    #[error("node {0} does not exist in this model")]
    UnknownNode(NodeId),
    /// Returned when a link cannot be found in the model.
    #[error("link {0} does not exist in this model")]
    UnknownLink(LinkId),
    /// Returned when a material cannot be found in the model.
    #[error("material {0} does not exist in this model")]
    UnknownMaterial(MaterialId),
    /// Returned when the supplied material properties are invalid.
    #[error(transparent)]
    InvalidMaterial(#[from] MaterialPropertyError),
    /// Returned when a coordinate, constraint or force is NaN or infinite.
    #[error("node {0}: values must be finite")]
    NonFiniteValue(NodeId),
    /// Returned when another node already sits at the requested position.
    #[error("node {existing} already exists at the position requested for node {node}")]
    LocationOccupied {
        /// Node being placed.
        node: NodeId,
        /// Node already occupying the position.
        existing: NodeId,
    },
    /// Returned by bulk creation when a requested node id is taken.
    #[error("node {0} already exists")]
    NodeExists(NodeId),
    /// Returned when deleting a node that still has links attached.
    #[error("node {0} is linked and cannot be deleted")]
    NodeLinked(NodeId),
    /// Returned when both ends of a link are the same node.
    #[error("cannot link node {0} to itself")]
    SelfLink(NodeId),
    /// Returned when the link id is already in use.
    #[error("link {0} already exists")]
    LinkExists(LinkId),
    /// Returned when two nodes are already joined by a link.
    #[error("nodes {a} and {b} are already linked by link {link}")]
    NodesAlreadyLinked {
        /// First node of the requested link.
        a: NodeId,
        /// Second node of the requested link.
        b: NodeId,
        /// Link that already joins them.
        link: LinkId,
    },
    /// Returned when the two end nodes of a link coincide.
    #[error("link {0} has zero length")]
    ZeroLengthLink(LinkId),
    /// Returned when deleting a material that links still reference.
    #[error("material {material} is used by link {link} and cannot be deleted")]
    MaterialInUse {
        /// Material that was to be deleted.
        material: MaterialId,
        /// One link that references it.
        link: LinkId,
    },
    /// Returned by bulk operations that need existing nodes.
    #[error("no nodes exist")]
    NoNodes,
    /// Returned when a bulk operation receives a zero spacing or count.
    #[error("{0} must be non-zero")]
    ZeroStep(&'static str),
    /// Returned when a generated id would exceed the largest representable id.
    #[error("no {0} ids left above the largest one in use")]
    IdsExhausted(&'static str),
}

/// Failure detected before any matrix work is attempted.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PreconditionError {
    /// Solver settings are out of range.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The model has no nodes.
    #[error("model has no nodes to solve")]
    EmptyModel,
    /// A link references a node missing from the snapshot.
    #[error("link {link} references missing node {node}")]
    DanglingLink {
        /// Offending link.
        link: LinkId,
        /// Node id that is not part of the snapshot.
        node: NodeId,
    },
    /// A load acts along an axis that no node restrains.
    #[error("problem is insufficiently constrained along {}", axis_list(.axes))]
    InsufficientlyConstrained {
        /// Every axis carrying load without any restraint.
        axes: Vec<Axis>,
    },
    /// Not enough constraints and links to stabilise the nodes.
    #[error(
        "unstable structure: {constraints} constraints + {links} links < {dimensions} x {nodes} nodes"
    )]
    Unstable {
        /// Number of prescribed displacement components.
        constraints: usize,
        /// Number of links.
        links: usize,
        /// Number of nodes.
        nodes: usize,
        /// Degrees of freedom per node.
        dimensions: usize,
    },
}

/// Failure raised while assembling or solving the linear system.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NumericError {
    /// Matrix and vector sizes disagree.
    #[error("system dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected number of rows.
        expected: usize,
        /// Number of rows actually supplied.
        found: usize,
    },
    /// The penalised stiffness matrix could not be factorised.
    #[error("stiffness matrix is singular; check supports and connectivity")]
    SingularSystem,
    /// The node numbering needs a larger system than the solver may allocate.
    #[error(
        "node id {max_node} needs more than the limit of {limit} degrees of freedom; renumber nodes densely or raise the limit"
    )]
    SystemTooLarge {
        /// Largest node id in the model.
        max_node: NodeId,
        /// Configured limit on the system size.
        limit: usize,
    },
    /// A solved or assembled value is NaN or infinite.
    #[error("non-finite value at degree of freedom {dof}")]
    NonFinite {
        /// Global degree of freedom holding the value.
        dof: usize,
    },
}

/// Error returned when a solve produces no solution.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// A check rejected the model before assembly.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// Assembly or the linear solve failed.
    #[error("solve failed: {0}")]
    Numeric(#[from] NumericError),
}

/// Error returned when solver settings are out of range.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SettingsError {
    /// The penalty multiplier is not a positive finite number.
    #[error("penalty multiplier must be positive and finite (received {0})")]
    PenaltyMultiplier(f64),
    /// The singular row placeholder is not a nonzero finite number.
    #[error("singular row placeholder must be nonzero and finite (received {0})")]
    SingularRowPlaceholder(f64),
    /// The constraint tolerance factor is not a positive finite number.
    #[error("constraint tolerance factor must be positive and finite (received {0})")]
    ToleranceFactor(f64),
    /// The exaggeration fraction is negative or not finite.
    #[error("exaggeration fraction must be non-negative and finite (received {0})")]
    ExaggerationFraction(f64),
    /// The system size limit is zero.
    #[error("maximum system size must be at least one degree of freedom")]
    MaxDofs,
}

/// Error returned when saving or loading a model file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid model JSON.
    #[error("malformed model file: {0}")]
    Json(#[from] serde_json::Error),
    /// The stored model violates an editing invariant.
    #[error("invalid model file: {0}")]
    Edit(#[from] ModelEditError),
    /// The document was written by a newer format.
    #[error("unsupported model file version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
        /// Newest version this build reads.
        supported: u32,
    },
}

/// Render axes as a comma separated list.
fn axis_list(axes: &[Axis]) -> String {
    axes.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
