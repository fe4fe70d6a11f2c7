// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{coord::Angle, wcs::ProjectionError};

/// Errors associated with building an instrument footprint.
#[derive(Error, Debug)]
pub enum FootprintError {
    #[error("Pointing RA={ra}°, Dec={dec}° is out of range (0° <= RA < 360°, -90° <= Dec <= 90°)")]
    InvalidPointing { ra: f64, dec: f64 },

    #[error("Position angle {0} is not a finite number")]
    InvalidPositionAngle(Angle),

    #[error("Pickoff arm angle {0} is not a finite number")]
    InvalidArmAngle(Angle),

    #[error("Detector window {window} doesn't fit on the {nx}x{ny} detector (windows start at pixel 1 and must be at least 1 pixel wide)")]
    InvalidWindow { window: String, nx: u32, ny: u32 },

    #[error("Couldn't parse '{0}' as a detector window; expected 'xstart,ystart,nx,ny' in unbinned pixels")]
    BadWindowString(String),

    #[error("Shape {0} ended up with no vertices")]
    EmptyShape(String),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
