// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::Serialize;

use super::{Angle, SkyPoint};
use crate::footprint::FootprintError;

/// A telescope pointing: where the rotator centre is on the sky, and the
/// position angle of the instrument (east of north).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pointing {
    centre: SkyPoint,
    position_angle: Angle,
}

impl Pointing {
    /// Validate and make a new pointing. The RA must be in [0°, 360°) and the
    /// Dec in [-90°, 90°]; the position angle is wrapped into [0°, 360°).
    pub fn new(
        ra_deg: f64,
        dec_deg: f64,
        position_angle: Angle,
    ) -> Result<Pointing, FootprintError> {
        if !(0.0..360.0).contains(&ra_deg) || !(-90.0..=90.0).contains(&dec_deg) {
            return Err(FootprintError::InvalidPointing {
                ra: ra_deg,
                dec: dec_deg,
            });
        }
        if !position_angle.is_finite() {
            return Err(FootprintError::InvalidPositionAngle(position_angle));
        }
        Ok(Pointing {
            centre: SkyPoint::new(ra_deg, dec_deg),
            position_angle: position_angle.normalised(),
        })
    }

    pub fn centre(&self) -> SkyPoint {
        self.centre
    }

    /// The position angle, normalised to [0°, 360°).
    pub fn position_angle(&self) -> Angle {
        self.position_angle
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_valid_pointing() {
        let p = Pointing::new(150.0, -30.0, Angle::from_degrees(-90.0)).unwrap();
        assert_abs_diff_eq!(p.centre().ra, 150.0);
        assert_abs_diff_eq!(p.centre().dec, -30.0);
        assert_abs_diff_eq!(p.position_angle().to_degrees(), 270.0);
    }

    #[test]
    fn test_tiny_negative_position_angle_wraps_to_zero() {
        let p = Pointing::new(10.0, 10.0, Angle::from_degrees(-1e-14)).unwrap();
        let pa = p.position_angle().to_degrees();
        assert!((0.0..360.0).contains(&pa), "{pa}");
    }

    #[test]
    fn test_invalid_pointings_are_rejected() {
        for (ra, dec) in [
            (360.0, 0.0),
            (-0.1, 0.0),
            (10.0, 90.5),
            (10.0, -91.0),
            (f64::NAN, 0.0),
            (0.0, f64::NAN),
        ] {
            let result = Pointing::new(ra, dec, Angle::ZERO);
            assert!(
                matches!(result, Err(FootprintError::InvalidPointing { .. })),
                "({ra}, {dec}) should be invalid"
            );
        }

        let result = Pointing::new(10.0, 10.0, Angle::from_degrees(f64::INFINITY));
        assert!(matches!(
            result,
            Err(FootprintError::InvalidPositionAngle(_))
        ));
    }
}
