// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("The WCS transform is singular (zero determinant or zero pixel scale)")]
    Singular,

    #[error("Sky position RA={ra}°, Dec={dec}° is at least 90° from the tangent point and cannot be projected")]
    BehindTangentPlane { ra: f64, dec: f64 },

    #[error("The projection produced a non-finite pixel or sky position")]
    NonFinite,

    #[error("Pixel {x}, {y} is outside the {nx}x{ny} image")]
    OutsideImage { x: f64, y: f64, nx: u32, ny: u32 },
}
