//! Fundamental geometric types for link models.
//!
//! Every vector type carries three components. In a two dimensional model the
//! `z` component is always zero and is never written into the global system.

use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Dimensionality of a model, fixed for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dimensions {
    /// Planar model using the X and Y axes.
    Two,
    /// Spatial model using the X, Y and Z axes.
    Three,
}

impl Dimensions {
    /// Number of translational degrees of freedom per node.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Axes active in a model of this dimensionality, in DOF order.
    #[must_use]
    pub fn axes(self) -> &'static [Axis] {
        match self {
            Self::Two => &[Axis::X, Axis::Y],
            Self::Three => &[Axis::X, Axis::Y, Axis::Z],
        }
    }
}

impl TryFrom<u8> for Dimensions {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("dimensions must be 2 or 3 (received {other})")),
        }
    }
}

impl From<Dimensions> for u8 {
    fn from(value: Dimensions) -> Self {
        match value {
            Dimensions::Two => 2,
            Dimensions::Three => 3,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.count())
    }
}

/// A global coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Global X axis.
    X,
    /// Global Y axis.
    Y,
    /// Global Z axis.
    Z,
}

impl Axis {
    /// Offset of this axis inside a node's block of degrees of freedom.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// Implements the shared component helpers for the three vector types.
macro_rules! components {
    ($name:ident) => {
        impl $name {
            /// Return the component along `axis`.
            #[must_use]
            pub const fn component(self, axis: Axis) -> f64 {
                match axis {
                    Axis::X => self.x,
                    Axis::Y => self.y,
                    Axis::Z => self.z,
                }
            }

            /// Build a value from per-axis components, leaving unused axes at zero.
            ///
            /// Components beyond the third are ignored.
            #[must_use]
            pub fn from_components(components: &[f64]) -> Self {
                let value = |idx: usize| components.get(idx).copied().unwrap_or(0.0);
                Self::new(value(0), value(1), value(2))
            }

            /// Return a copy with every axis outside `dimensions` zeroed.
            #[must_use]
            pub fn restricted_to(self, dimensions: Dimensions) -> Self {
                match dimensions {
                    Dimensions::Two => Self::new(self.x, self.y, 0.0),
                    Dimensions::Three => self,
                }
            }

            /// Convert into an algebraic vector.
            #[must_use]
            pub fn to_vector(self) -> Vector3<f64> {
                Vector3::new(self.x, self.y, self.z)
            }

            /// Euclidean magnitude.
            #[must_use]
            pub fn magnitude(self) -> f64 {
                self.to_vector().norm()
            }
        }

        impl From<Vector3<f64>> for $name {
            fn from(value: Vector3<f64>) -> Self {
                Self::new(value.x, value.y, value.z)
            }
        }

        impl From<$name> for Vector3<f64> {
            fn from(value: $name) -> Self {
                value.to_vector()
            }
        }
    };
}

/// Position in space, in model length units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Coordinate along the global X axis.
    pub x: f64,
    /// Coordinate along the global Y axis.
    pub y: f64,
    /// Coordinate along the global Z axis.
    #[serde(default)]
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Translate the point by a displacement.
    #[must_use]
    pub fn displaced(self, displacement: Displacement) -> Self {
        Self::from(self.to_vector() + displacement.to_vector())
    }
}

components!(Point);

/// Applied load or reaction at a node, in model force units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Component acting along the global X axis.
    pub x: f64,
    /// Component acting along the global Y axis.
    pub y: f64,
    /// Component acting along the global Z axis.
    #[serde(default)]
    pub z: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Whether any component is nonzero.
    #[must_use]
    pub fn is_nonzero(self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.z != 0.0
    }
}

components!(Force);

/// Translation of a node, in model length units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Component along the global X axis.
    pub x: f64,
    /// Component along the global Y axis.
    pub y: f64,
    /// Component along the global Z axis.
    #[serde(default)]
    pub z: f64,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Scale every component by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::from(self.to_vector() * factor)
    }
}

components!(Displacement);

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trusslink::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use trusslink::force;
///
/// let load = force(1.0, 0.0, -5.0);
/// assert_eq!(load.z, -5.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64, z: f64) -> Force {
    Force::new(x, y, z)
}

/// Convenience helper for creating [`Displacement`] instances.
#[must_use]
pub const fn displacement(x: f64, y: f64, z: f64) -> Displacement {
    Displacement::new(x, y, z)
}
