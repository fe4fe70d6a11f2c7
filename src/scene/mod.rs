// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Pixel-space shapes, the named groups they are drawn in, and the overlay store
that a display reads from.
 */

#[cfg(test)]
mod tests;

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use vec1::Vec1;

use crate::{
    coord::{Angle, PixelPoint},
    math::{bezier_smooth, rotate, rotate_point},
};

/// A single drawable primitive in image pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// A closed boundary; the last vertex joins back to the first.
    Polygon { vertices: Vec1<PixelPoint> },

    /// An open line. [`build_footprint`](crate::footprint::build_footprint)
    /// draws only closed outlines; renderers accept open curves (e.g. a patrol
    /// arc traced as a single edge) for shapes built by other callers.
    Path { vertices: Vec1<PixelPoint> },

    Circle { centre: PixelPoint, radius: f64 },
}

impl Shape {
    /// Rigidly rotate the shape about `pivot`; see [`rotate`].
    pub fn rotated(&self, angle: Angle, pivot: PixelPoint) -> Shape {
        match self {
            Shape::Polygon { vertices } => Shape::Polygon {
                vertices: rotate_vec1(vertices, angle, pivot),
            },
            Shape::Path { vertices } => Shape::Path {
                vertices: rotate_vec1(vertices, angle, pivot),
            },
            Shape::Circle { centre, radius } => Shape::Circle {
                centre: rotate_point(*centre, angle, pivot),
                radius: *radius,
            },
        }
    }

    /// Densify polygon and path boundaries to `factor` points per vertex
    /// along a smooth curve through the existing vertices. Circles are
    /// already smooth.
    pub fn smoothed(&self, factor: usize) -> Shape {
        match self {
            Shape::Polygon { vertices } => Shape::Polygon {
                vertices: smooth_vec1(vertices, factor, true),
            },
            Shape::Path { vertices } => Shape::Path {
                vertices: smooth_vec1(vertices, factor, false),
            },
            Shape::Circle { .. } => self.clone(),
        }
    }

    /// The vertices of polygons and paths; empty for circles.
    pub fn vertices(&self) -> &[PixelPoint] {
        match self {
            Shape::Polygon { vertices } | Shape::Path { vertices } => vertices.as_slice(),
            Shape::Circle { .. } => &[],
        }
    }

    /// The smallest axis-aligned box `(min, max)` containing the shape.
    pub fn bounding_box(&self) -> (PixelPoint, PixelPoint) {
        match self {
            Shape::Circle { centre, radius } => (
                PixelPoint::new(centre.x - radius, centre.y - radius),
                PixelPoint::new(centre.x + radius, centre.y + radius),
            ),
            Shape::Polygon { vertices } | Shape::Path { vertices } => {
                let first = *vertices.first();
                vertices.iter().fold((first, first), |(min, max), p| {
                    (
                        PixelPoint::new(min.x.min(p.x), min.y.min(p.y)),
                        PixelPoint::new(max.x.max(p.x), max.y.max(p.y)),
                    )
                })
            }
        }
    }
}

fn rotate_vec1(vertices: &Vec1<PixelPoint>, angle: Angle, pivot: PixelPoint) -> Vec1<PixelPoint> {
    let first = rotate_point(*vertices.first(), angle, pivot);
    let mut rotated = Vec1::with_capacity(first, vertices.len());
    rotated.extend(rotate(&vertices[1..], angle, pivot));
    rotated
}

fn smooth_vec1(vertices: &Vec1<PixelPoint>, factor: usize, closed: bool) -> Vec1<PixelPoint> {
    let smooth = bezier_smooth(vertices.as_slice(), vertices.len() * factor, closed);
    // Smoothing never drops below the control point count.
    Vec1::try_from_vec(smooth).unwrap_or_else(|_| vertices.clone())
}

/// The names of everything the footprint draws. Their string forms are
/// stable; a display looks shapes up by them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeName {
    /// The full detector field.
    Window,

    /// A user-requested detector window, numbered from 1.
    ExtraWindow(usize),

    PatrolArc,

    CompoFreeRegion,

    Injector,

    Pickoff,
}

impl std::fmt::Display for ShapeName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ShapeName::Window => write!(f, "window"),
            ShapeName::ExtraWindow(n) => write!(f, "window_{n}"),
            ShapeName::PatrolArc => write!(f, "patrol_arc"),
            ShapeName::CompoFreeRegion => write!(f, "compo_free_region"),
            ShapeName::Injector => write!(f, "injector"),
            ShapeName::Pickoff => write!(f, "pickoff"),
        }
    }
}

impl Serialize for ShapeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named group of shapes that is drawn, rotated and replaced as one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompoundShape {
    pub name: ShapeName,
    pub shapes: Vec<Shape>,
}

impl CompoundShape {
    pub fn new(name: ShapeName, shapes: Vec<Shape>) -> CompoundShape {
        CompoundShape { name, shapes }
    }

    pub fn rotated(&self, angle: Angle, pivot: PixelPoint) -> CompoundShape {
        CompoundShape {
            name: self.name,
            shapes: self.shapes.iter().map(|s| s.rotated(angle, pivot)).collect(),
        }
    }

    pub fn smoothed(&self, factor: usize) -> CompoundShape {
        CompoundShape {
            name: self.name,
            shapes: self.shapes.iter().map(|s| s.smoothed(factor)).collect(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.shapes.iter().map(|s| s.vertices().len()).sum()
    }
}

/// Compound shapes keyed by their names, in draw order.
pub type Footprint = IndexMap<String, CompoundShape>;

/// The set of compound shapes currently on display.
///
/// Readers take a cheap [`Arc`] snapshot; [`Overlay::replace`] swaps in a new
/// set under a single write lock, so a reader sees either the old shapes or
/// the new ones, never a mixture.
#[derive(Debug, Default)]
pub struct Overlay {
    shapes: RwLock<Arc<Footprint>>,
}

impl Overlay {
    pub fn new() -> Overlay {
        Overlay::default()
    }

    /// Remove any shapes sharing a name with those in `footprint`, then add
    /// the new ones. Shapes with other names stay, so a redraw with fewer
    /// windows or in CCD mode leaves e.g. `window_2` or `pickoff` behind; use
    /// [`Overlay::replace_all`] for a full redraw.
    pub fn replace(&self, footprint: Footprint) {
        let mut guard = self.shapes.write().unwrap_or_else(|e| e.into_inner());
        let mut next: Footprint = guard
            .iter()
            .filter(|(name, _)| !footprint.contains_key(*name))
            .map(|(name, shape)| (name.clone(), shape.clone()))
            .collect();
        next.extend(footprint);
        *guard = Arc::new(next);
    }

    /// Swap in `footprint` as the complete set of shapes.
    pub fn replace_all(&self, footprint: Footprint) {
        let mut guard = self.shapes.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(footprint);
    }

    /// Remove everything.
    pub fn clear(&self) {
        let mut guard = self.shapes.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(Footprint::new());
    }

    /// The shapes as they are right now.
    pub fn snapshot(&self) -> Arc<Footprint> {
        let guard = self.shapes.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }
}
