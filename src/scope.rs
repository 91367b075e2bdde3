//! Bounding extent of a model, used to scale display-only quantities.

use crate::geometry::{Dimensions, Point};

/// Padding added to every axis extent so flat or single-node models keep a
/// nonzero size.
const EXTENT_BUFFER: f64 = 0.05;

/// Axis-aligned bounds of a set of node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scope {
    /// Smallest coordinate on each axis.
    pub min: Point,
    /// Largest coordinate on each axis.
    pub max: Point,
    /// Characteristic length: diagonal of the buffered bounding box.
    pub model_size: f64,
}

impl Scope {
    /// Compute the scope of `positions`, or `None` when there are none.
    ///
    /// # Examples
    /// ```
    /// use trusslink::{point, Dimensions, Scope};
    ///
    /// let scope = Scope::of([point(0.0, 0.0, 0.0), point(2.95, 3.95, 0.0)], Dimensions::Two)
    ///     .expect("non-empty");
    /// assert!((scope.model_size - 5.0).abs() < 1.0e-12);
    /// ```
    pub fn of(positions: impl IntoIterator<Item = Point>, dimensions: Dimensions) -> Option<Self> {
        let mut positions = positions
            .into_iter()
            .map(|position| position.restricted_to(dimensions).to_vector());
        let first = positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), position| {
            (min.inf(&position), max.sup(&position))
        });
        let mut extent = max - min;
        for axis in dimensions.axes() {
            extent[axis.index()] += EXTENT_BUFFER;
        }
        Some(Self {
            min: Point::from(min),
            max: Point::from(max),
            model_size: extent.norm(),
        })
    }
}
