// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Mapping sky coordinates onto image pixels.

Footprint geometry only ever sees an image through the [`Projection`] trait.
[`TanWcs`] is a FITS gnomonic WCS (what a real finder image carries), and
[`LinearWcs`] is a plain scaling of degrees, useful for checking geometry by
hand.
 */

mod error;
mod linear;
mod tan;

pub use error::ProjectionError;
pub use linear::LinearWcs;
pub use tan::TanWcs;

use crate::{
    constants::PARITY_PROBE,
    coord::{Angle, PixelPoint, SkyPoint},
};

/// Anything that can place sky positions on an image.
pub trait Projection {
    /// The pixel position of `sky`. Never returns non-finite values; those are
    /// reported as [`ProjectionError::NonFinite`].
    fn pixel_of(&self, sky: SkyPoint) -> Result<PixelPoint, ProjectionError>;

    /// The sky position of `pixel`.
    fn sky_of(&self, pixel: PixelPoint) -> Result<SkyPoint, ProjectionError>;

    /// The image size in pixels `(nx, ny)`, if it is known.
    fn image_size(&self) -> Option<(u32, u32)> {
        None
    }

    /// The local plate scale [degrees per pixel] at `pixel`, measured as the
    /// geometric mean of the angular lengths of a one-pixel step along each
    /// image axis.
    fn pixel_scale_at(&self, pixel: PixelPoint) -> Result<f64, ProjectionError> {
        let here = self.sky_of(pixel)?;
        let step_x = self.sky_of(PixelPoint::new(pixel.x + 1.0, pixel.y))?;
        let step_y = self.sky_of(PixelPoint::new(pixel.x, pixel.y + 1.0))?;
        let scale = (here.separation(&step_x).to_degrees() * here.separation(&step_y).to_degrees())
            .sqrt();
        if scale.is_finite() && scale > 0.0 {
            Ok(scale)
        } else {
            Err(ProjectionError::NonFinite)
        }
    }

    /// Is `pixel` on the image? Projections without a known size contain
    /// everything. FITS pixel centres run from 1 to NAXIS, so the image edges
    /// are half a pixel beyond those.
    fn contains(&self, pixel: PixelPoint) -> bool {
        match self.image_size() {
            None => true,
            Some((nx, ny)) => {
                (0.5..=nx as f64 + 0.5).contains(&pixel.x)
                    && (0.5..=ny as f64 + 0.5).contains(&pixel.y)
            }
        }
    }
}

/// How north and east are arranged on an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    /// East is 90° counter-clockwise from north (a north-up, east-left chart,
    /// as seen on the sky).
    EastCounterClockwise,

    /// East is clockwise from north (a mirror-imaged chart).
    EastClockwise,
}

impl Parity {
    /// The sign that turns a position angle (north through east) into a
    /// counter-clockwise pixel-space rotation.
    pub fn sign(self) -> f64 {
        match self {
            Parity::EastCounterClockwise => 1.0,
            Parity::EastClockwise => -1.0,
        }
    }

    /// Convert a position angle into a pixel-space rotation angle for
    /// [`rotate`](crate::math::rotate).
    pub fn pixel_rotation(self, position_angle: Angle) -> Angle {
        position_angle * self.sign()
    }
}

/// Measure the image parity at `centre` by projecting small steps north and
/// east.
pub fn sky_parity<P: Projection + ?Sized>(
    projection: &P,
    centre: SkyPoint,
) -> Result<Parity, ProjectionError> {
    let origin = projection.pixel_of(centre)?;
    let north = projection.pixel_of(centre.offset(Angle::ZERO, PARITY_PROBE))?;
    let east = projection.pixel_of(centre.offset(PARITY_PROBE, Angle::ZERO))?;
    let (nx, ny) = (north.x - origin.x, north.y - origin.y);
    let (ex, ey) = (east.x - origin.x, east.y - origin.y);
    let cross = nx * ey - ny * ex;
    if !cross.is_finite() || cross == 0.0 {
        return Err(ProjectionError::Singular);
    }
    Ok(if cross > 0.0 {
        Parity::EastCounterClockwise
    } else {
        Parity::EastClockwise
    })
}
