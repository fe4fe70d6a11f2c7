// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The FITS TAN (gnomonic) projection.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Projection, ProjectionError};
use crate::coord::{Angle, PixelPoint, SkyPoint};

/// A TAN WCS. Pixel coordinates are 1-indexed as in FITS headers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TanWcs {
    /// Reference sky position (CRVAL1, CRVAL2) [degrees].
    pub crval: [f64; 2],

    /// Reference pixel (CRPIX1, CRPIX2).
    pub crpix: [f64; 2],

    /// Matrix from pixel offsets to intermediate world coordinates
    /// [degrees/pixel]; `cd[0] = [CD1_1, CD1_2]`, `cd[1] = [CD2_1, CD2_2]`.
    pub cd: [[f64; 2]; 2],

    /// Image size (NAXIS1, NAXIS2) [pixels].
    #[serde(default)]
    pub naxis: Option<[u32; 2]>,
}

impl TanWcs {
    /// A WCS for a blank chart centred on `centre`, `fov` on a side, with
    /// square pixels of angular size `scale`. North is up and east is left.
    pub fn blank_field(centre: SkyPoint, fov: Angle, scale: Angle) -> Result<TanWcs, ProjectionError> {
        let scale_deg = scale.to_degrees();
        if scale_deg <= 0.0 || !scale_deg.is_finite() {
            return Err(ProjectionError::Singular);
        }
        let npix = (fov.to_degrees() / scale_deg).round();
        if !(npix.is_finite() && npix >= 1.0 && npix <= u32::MAX as f64) {
            return Err(ProjectionError::NonFinite);
        }
        let npix = npix as u32;
        debug!("Blank field WCS: {npix}x{npix} pixels at {scale_deg}°/pixel around {centre}");

        // Pixel x runs opposite to RA, y runs with Dec.
        let cdbase = [-1.0, 1.0];
        Ok(TanWcs {
            crval: [centre.ra, centre.dec],
            crpix: [npix as f64 / 2.0, npix as f64 / 2.0],
            cd: [[cdbase[0] * scale_deg, 0.0], [0.0, cdbase[1] * scale_deg]],
            naxis: Some([npix, npix]),
        })
    }

    fn determinant(&self) -> f64 {
        self.cd[0][0] * self.cd[1][1] - self.cd[0][1] * self.cd[1][0]
    }
}

impl Projection for TanWcs {
    fn pixel_of(&self, sky: SkyPoint) -> Result<PixelPoint, ProjectionError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(ProjectionError::Singular);
        }

        let (ra0, dec0) = (self.crval[0].to_radians(), self.crval[1].to_radians());
        let (ra, dec) = (sky.ra.to_radians(), sky.dec.to_radians());
        let (s_dec0, c_dec0) = dec0.sin_cos();
        let (s_dec, c_dec) = dec.sin_cos();
        let (s_dra, c_dra) = (ra - ra0).sin_cos();

        let cos_c = s_dec0 * s_dec + c_dec0 * c_dec * c_dra;
        if cos_c <= 0.0 {
            return Err(ProjectionError::BehindTangentPlane {
                ra: sky.ra,
                dec: sky.dec,
            });
        }
        // Intermediate world coordinates [degrees]; x increases to the east.
        let x = (c_dec * s_dra / cos_c).to_degrees();
        let y = ((c_dec0 * s_dec - s_dec0 * c_dec * c_dra) / cos_c).to_degrees();

        let u = (self.cd[1][1] * x - self.cd[0][1] * y) / det;
        let v = (-self.cd[1][0] * x + self.cd[0][0] * y) / det;
        let pixel = PixelPoint::new(u + self.crpix[0], v + self.crpix[1]);
        if pixel.is_finite() {
            Ok(pixel)
        } else {
            Err(ProjectionError::NonFinite)
        }
    }

    fn sky_of(&self, pixel: PixelPoint) -> Result<SkyPoint, ProjectionError> {
        if !pixel.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        let u = pixel.x - self.crpix[0];
        let v = pixel.y - self.crpix[1];
        let xi = (self.cd[0][0] * u + self.cd[0][1] * v).to_radians();
        let eta = (self.cd[1][0] * u + self.cd[1][1] * v).to_radians();

        let (ra0, dec0) = (self.crval[0].to_radians(), self.crval[1].to_radians());
        let rho = xi.hypot(eta);
        if rho == 0.0 {
            return Ok(SkyPoint::new(self.crval[0], self.crval[1]));
        }
        let c = rho.atan();
        let (s_c, c_c) = c.sin_cos();
        let (s_dec0, c_dec0) = dec0.sin_cos();
        let dec = (c_c * s_dec0 + eta * s_c * c_dec0 / rho).clamp(-1.0, 1.0).asin();
        let ra = ra0 + (xi * s_c).atan2(rho * c_dec0 * c_c - eta * s_dec0 * s_c);

        let sky = SkyPoint::new(ra.to_degrees(), dec.to_degrees());
        if sky.ra.is_finite() && sky.dec.is_finite() {
            Ok(sky)
        } else {
            Err(ProjectionError::NonFinite)
        }
    }

    fn image_size(&self) -> Option<(u32, u32)> {
        self.naxis.map(|[nx, ny]| (nx, ny))
    }
}
