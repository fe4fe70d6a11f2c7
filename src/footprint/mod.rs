// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Building the instrument footprint for a pointing.

[`build_footprint`] takes the sky outlines from [`shapes`], projects them onto
an image, turns the pickoff baffle to the arm angle, rotates everything about
the pointing centre by the position angle and smooths the curved boundaries.
 */

mod error;
mod free_region;
mod instrument;
pub mod shapes;

pub use error::FootprintError;
pub use free_region::{CalibrationLoadError, FreeRegionTable};
pub use instrument::{
    ArmSettings, InjectorSide, Instrument, InstrumentConstants, InstrumentMode, WindowSpec,
};

use log::{debug, trace};
use vec1::Vec1;

use crate::{
    constants::SMOOTHING_FACTOR,
    coord::{Angle, PixelPoint, Pointing, SkyPoint},
    scene::{CompoundShape, Footprint, Shape, ShapeName},
    wcs::{sky_parity, Projection, ProjectionError},
};

/// Compute every shape of the instrument footprint, in pixels, in draw order.
///
/// In [`InstrumentMode::Ccd`] only the detector windows are drawn. The
/// rotation sense of the position angle follows the image: the footprint turns
/// from north through east whether or not the image is mirrored.
pub fn build_footprint<P: Projection + ?Sized>(
    pointing: &Pointing,
    projection: &P,
    instrument: &Instrument,
    settings: &ArmSettings,
) -> Result<Footprint, FootprintError> {
    let constants = &instrument.constants;
    let centre = pointing.centre();
    if !settings.pickoff_angle.is_finite() {
        return Err(FootprintError::InvalidArmAngle(settings.pickoff_angle));
    }
    for window in &settings.windows {
        window.validate(constants)?;
    }

    let centre_px = projection.pixel_of(centre)?;
    if !projection.contains(centre_px) {
        let (nx, ny) = projection.image_size().unwrap_or_default();
        return Err(ProjectionError::OutsideImage {
            x: centre_px.x,
            y: centre_px.y,
            nx,
            ny,
        }
        .into());
    }
    let parity = sky_parity(projection, centre)?;
    let rotation = parity.pixel_rotation(pointing.position_angle());
    debug!("Pointing {centre} is at pixel {centre_px}; image parity {parity:?}, rotating by {rotation}");

    let mut compounds = vec![CompoundShape::new(
        ShapeName::Window,
        vec![polygon(projection, &shapes::detector_field(centre, constants), ShapeName::Window)?],
    )];
    for (i, window) in settings.windows.iter().enumerate() {
        let name = ShapeName::ExtraWindow(i + 1);
        compounds.push(CompoundShape::new(
            name,
            vec![polygon(projection, &shapes::window_field(centre, window, constants), name)?],
        ));
    }

    if settings.mode == InstrumentMode::Compo {
        compounds.push(CompoundShape::new(
            ShapeName::PatrolArc,
            vec![polygon(projection, &shapes::patrol_arc(centre, constants), ShapeName::PatrolArc)?],
        ));
        compounds.push(CompoundShape::new(
            ShapeName::CompoFreeRegion,
            vec![polygon(
                projection,
                &shapes::free_region(centre, &instrument.free_region),
                ShapeName::CompoFreeRegion,
            )?],
        ));

        let side = settings.injector_side;
        let (mirror_centre, mirror_radius) = shapes::injector_mirror(centre, side, constants);
        compounds.push(CompoundShape::new(
            ShapeName::Injector,
            vec![
                polygon(
                    projection,
                    &shapes::injector_vignetting(centre, side, constants),
                    ShapeName::Injector,
                )?,
                circle(projection, mirror_centre, mirror_radius)?,
            ],
        ));

        let theta = settings.pickoff_angle;
        let (baffle, baffle_centre) = shapes::pickoff_baffle(centre, theta, constants);
        let baffle_centre_px = projection.pixel_of(baffle_centre)?;
        let (mirror_centre, mirror_radius) = shapes::pickoff_mirror(centre, theta, constants);
        compounds.push(CompoundShape::new(
            ShapeName::Pickoff,
            vec![
                polygon(projection, &baffle, ShapeName::Pickoff)?
                    .rotated(parity.pixel_rotation(theta), baffle_centre_px),
                circle(projection, mirror_centre, mirror_radius)?,
            ],
        ));
    }

    let footprint: Footprint = compounds
        .into_iter()
        .map(|compound| {
            let mut compound = compound.rotated(rotation, centre_px);
            if matches!(
                compound.name,
                ShapeName::PatrolArc | ShapeName::CompoFreeRegion
            ) {
                compound = compound.smoothed(SMOOTHING_FACTOR);
            }
            debug!(
                "{}: {} shape(s), {} vertices",
                compound.name,
                compound.shapes.len(),
                compound.num_vertices()
            );
            trace!("{}: {:?}", compound.name, compound.shapes);
            (compound.name.to_string(), compound)
        })
        .collect();
    Ok(footprint)
}

/// Project sky points into a closed pixel polygon.
fn polygon<P: Projection + ?Sized>(
    projection: &P,
    points: &[SkyPoint],
    name: ShapeName,
) -> Result<Shape, FootprintError> {
    let pixels = points
        .iter()
        .map(|p| projection.pixel_of(*p))
        .collect::<Result<Vec<PixelPoint>, _>>()?;
    let vertices =
        Vec1::try_from_vec(pixels).map_err(|_| FootprintError::EmptyShape(name.to_string()))?;
    Ok(Shape::Polygon { vertices })
}

/// Project a sky circle; the radius is converted with the local plate scale at
/// the projected centre.
fn circle<P: Projection + ?Sized>(
    projection: &P,
    centre: SkyPoint,
    radius: Angle,
) -> Result<Shape, FootprintError> {
    let centre = projection.pixel_of(centre)?;
    let scale = projection.pixel_scale_at(centre)?;
    Ok(Shape::Circle {
        centre,
        radius: radius.to_degrees() / scale,
    })
}
