// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rendering footprints to image files. Only available with the "plotting"
//! feature.

use std::path::Path;

use log::{debug, trace};
use plotters::{
    prelude::*,
    style::{Color, RGBColor},
};
use thiserror::Error;

use crate::{
    coord::PixelPoint,
    scene::{Footprint, Shape, ShapeName},
    wcs::Projection,
};

/// Circles are drawn as polygons with this many sides.
const CIRCLE_SIDES: usize = 72;

/// Fraction of the footprint's extent left blank around it when the image
/// size is unknown.
const MARGIN: f64 = 0.1;

fn colour(name: ShapeName) -> RGBColor {
    match name {
        ShapeName::Window | ShapeName::ExtraWindow(_) => BLUE,
        ShapeName::PatrolArc => GREEN,
        ShapeName::CompoFreeRegion => RGBColor(255, 165, 0),
        ShapeName::Injector => RED,
        ShapeName::Pickoff => MAGENTA,
    }
}

/// Draw `footprint` over a blank chart covering the image of `projection` (or
/// the footprint itself, if the image size is unknown), and write it to
/// `output` as an image `width` pixels wide. A cross marks `centre`.
pub fn render_footprint<P: Projection + ?Sized>(
    footprint: &Footprint,
    projection: &P,
    centre: PixelPoint,
    output: &Path,
    width: u32,
) -> Result<(), DrawError> {
    let (min, max) = match projection.image_size() {
        Some((nx, ny)) => (
            PixelPoint::new(0.5, 0.5),
            PixelPoint::new(nx as f64 + 0.5, ny as f64 + 0.5),
        ),
        None => {
            let (min, max) = footprint
                .values()
                .flat_map(|c| c.shapes.iter())
                .map(Shape::bounding_box)
                .reduce(|(a_min, a_max), (b_min, b_max)| {
                    (
                        PixelPoint::new(a_min.x.min(b_min.x), a_min.y.min(b_min.y)),
                        PixelPoint::new(a_max.x.max(b_max.x), a_max.y.max(b_max.y)),
                    )
                })
                .ok_or(DrawError::Empty)?;
            let pad = MARGIN * (max.x - min.x).max(max.y - min.y);
            (
                PixelPoint::new(min.x - pad, min.y - pad),
                PixelPoint::new(max.x + pad, max.y + pad),
            )
        }
    };
    let (span_x, span_y) = (max.x - min.x, max.y - min.y);
    if !(span_x > 0.0 && span_y > 0.0) {
        return Err(DrawError::Empty);
    }
    let height = ((width as f64 * span_y / span_x).round() as u32).max(1);
    debug!(
        "Rendering {} compound shapes to {} ({width}x{height})",
        footprint.len(),
        output.display()
    );

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(min.x..max.x, min.y..max.y)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    for compound in footprint.values() {
        let colour = colour(compound.name);
        trace!("Drawing {}", compound.name);
        for shape in &compound.shapes {
            let outline: Vec<(f64, f64)> = match shape {
                Shape::Polygon { vertices } => vertices.iter().map(|p| (p.x, p.y)).collect(),
                Shape::Path { vertices } => {
                    let path: Vec<(f64, f64)> = vertices.iter().map(|p| (p.x, p.y)).collect();
                    chart
                        .draw_series(std::iter::once(PathElement::new(path, colour.stroke_width(2))))
                        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
                    continue;
                }
                Shape::Circle { centre, radius } => (0..CIRCLE_SIDES)
                    .map(|i| {
                        let (s, c) =
                            (i as f64 * std::f64::consts::TAU / CIRCLE_SIDES as f64).sin_cos();
                        (centre.x + radius * c, centre.y + radius * s)
                    })
                    .collect(),
            };

            let mut closed = outline.clone();
            if let Some(first) = outline.first() {
                closed.push(*first);
            }
            chart
                .draw_series(std::iter::once(Polygon::new(outline, colour.mix(0.25).filled())))
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;
            chart
                .draw_series(std::iter::once(PathElement::new(closed, colour.stroke_width(2))))
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        }
    }

    // Mark the pointing centre.
    let arm = 0.02 * span_x.min(span_y);
    chart
        .draw_series([
            PathElement::new(
                vec![(centre.x - arm, centre.y), (centre.x + arm, centre.y)],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![(centre.x, centre.y - arm), (centre.x, centre.y + arm)],
                BLACK.stroke_width(1),
            ),
        ])
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    root.present()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    Ok(())
}

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("There is nothing to draw")]
    Empty,

    #[error("Error from the plotters library: {0}")]
    Plotters(Box<dyn std::error::Error>),
}
