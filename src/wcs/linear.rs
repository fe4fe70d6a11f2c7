// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use super::{Projection, ProjectionError};
use crate::coord::{PixelPoint, SkyPoint};

/// A projection that just scales RA and Dec degrees into pixels, without any
/// cos(Dec) compression. RA increases with x and Dec increases with y (so
/// east is clockwise from north).
///
/// RA differences are taken relative to `crval` the short way around the
/// 0°/360° wrap, so points near the reference never jump across the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearWcs {
    pub crval: SkyPoint,
    pub crpix: PixelPoint,
    pub pixels_per_degree: f64,
}

impl LinearWcs {
    /// Pixel = degrees × `pixels_per_degree`.
    pub fn identity(pixels_per_degree: f64) -> LinearWcs {
        LinearWcs {
            crval: SkyPoint::default(),
            crpix: PixelPoint::default(),
            pixels_per_degree,
        }
    }
}

impl Projection for LinearWcs {
    fn pixel_of(&self, sky: SkyPoint) -> Result<PixelPoint, ProjectionError> {
        if self.pixels_per_degree == 0.0 {
            return Err(ProjectionError::Singular);
        }
        let mut d_ra = sky.ra - self.crval.ra;
        if d_ra > 180.0 {
            d_ra -= 360.0;
        } else if d_ra < -180.0 {
            d_ra += 360.0;
        }
        let pixel = PixelPoint {
            x: self.crpix.x + d_ra * self.pixels_per_degree,
            y: self.crpix.y + (sky.dec - self.crval.dec) * self.pixels_per_degree,
        };
        if pixel.is_finite() {
            Ok(pixel)
        } else {
            Err(ProjectionError::NonFinite)
        }
    }

    fn sky_of(&self, pixel: PixelPoint) -> Result<SkyPoint, ProjectionError> {
        if self.pixels_per_degree == 0.0 {
            return Err(ProjectionError::Singular);
        }
        if !pixel.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        Ok(SkyPoint::new(
            self.crval.ra + (pixel.x - self.crpix.x) / self.pixels_per_degree,
            self.crval.dec + (pixel.y - self.crpix.y) / self.pixels_per_degree,
        ))
    }

    fn pixel_scale_at(&self, _pixel: PixelPoint) -> Result<f64, ProjectionError> {
        if self.pixels_per_degree == 0.0 || !self.pixels_per_degree.is_finite() {
            return Err(ProjectionError::Singular);
        }
        Ok(1.0 / self.pixels_per_degree.abs())
    }
}
