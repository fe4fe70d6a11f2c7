// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Positions on the sky and small tangent-plane offsets between them.

A [`SkyPoint`] is not a vector: RA degrees shrink by cos(Dec) and wrap at
0°/360°, so all displacements go through [`SkyPoint::offset`] and
[`SkyPoint::offset_to`].
 */

use serde::{Deserialize, Serialize};

use super::{angle::wrap_degrees, Angle};
use crate::sexagesimal::{degrees_to_sexagesimal_dms, degrees_to_sexagesimal_hms};

/// A right ascension and declination. All units are in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkyPoint {
    /// Right ascension [degrees], in [0, 360)
    pub ra: f64,
    /// Declination [degrees], in [-90, 90]
    pub dec: f64,
}

impl SkyPoint {
    /// Make a new `SkyPoint` from values in degrees. The RA is wrapped into
    /// [0, 360).
    pub fn new(ra: f64, dec: f64) -> SkyPoint {
        SkyPoint {
            ra: wrap_degrees(ra),
            dec,
        }
    }

    /// The point reached by moving `d_ra` east and `d_dec` north of `self`, in
    /// true angular distance. The RA displacement is divided by cos(Dec) of
    /// `self`, so a fixed offset subtends a fixed angle regardless of
    /// declination.
    ///
    /// Offsets must be small (all instrument fields here are sub-degree) and
    /// `self` must be well away from the poles.
    pub fn offset(&self, d_ra: Angle, d_dec: Angle) -> SkyPoint {
        let cos_dec = self.dec.to_radians().cos();
        SkyPoint::new(
            self.ra + d_ra.to_degrees() / cos_dec,
            self.dec + d_dec.to_degrees(),
        )
    }

    /// The (east, north) offsets that [`SkyPoint::offset`] needs to map `self`
    /// onto `other`. The RA difference goes the short way around the 0°/360°
    /// wrap.
    pub fn offset_to(&self, other: &SkyPoint) -> (Angle, Angle) {
        let mut d_ra = other.ra - self.ra;
        if d_ra > 180.0 {
            d_ra -= 360.0;
        } else if d_ra < -180.0 {
            d_ra += 360.0;
        }
        let cos_dec = self.dec.to_radians().cos();
        (
            Angle::from_degrees(d_ra * cos_dec),
            Angle::from_degrees(other.dec - self.dec),
        )
    }

    /// Calculate the great-circle distance between two points (haversine).
    pub fn separation(&self, b: &SkyPoint) -> Angle {
        let (ra1, dec1) = (self.ra.to_radians(), self.dec.to_radians());
        let (ra2, dec2) = (b.ra.to_radians(), b.dec.to_radians());
        let s_d_dec = ((dec2 - dec1) / 2.0).sin();
        let s_d_ra = ((ra2 - ra1) / 2.0).sin();
        let h = s_d_dec * s_d_dec + dec1.cos() * dec2.cos() * s_d_ra * s_d_ra;
        Angle::from_radians(2.0 * h.sqrt().min(1.0).asin())
    }
}

impl std::fmt::Display for SkyPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({}, {})",
            degrees_to_sexagesimal_hms(self.ra),
            degrees_to_sexagesimal_dms(self.dec)
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_zero_offset_is_identity() {
        for (ra, dec) in [(0.0, 0.0), (10.0, 20.0), (359.999, -45.0), (180.0, 80.0)] {
            let p = SkyPoint::new(ra, dec);
            assert_eq!(p.offset(Angle::ZERO, Angle::ZERO), p);
        }
    }

    #[test]
    fn test_offset_scales_with_cos_dec() {
        let p = SkyPoint::new(10.0, 60.0);
        let q = p.offset(Angle::from_arcmin(1.0), Angle::ZERO);
        assert_abs_diff_eq!(q.ra - p.ra, 2.0 / 60.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.dec, 60.0);
        // A fixed arc length is a fixed angular separation.
        assert_abs_diff_eq!(p.separation(&q).to_arcmin(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_offset_across_ra_wrap() {
        let p = SkyPoint::new(359.99, 0.0);
        let q = p.offset(Angle::from_degrees(0.02), Angle::ZERO);
        assert_abs_diff_eq!(q.ra, 0.01, epsilon = 1e-10);

        let r = q.offset(Angle::from_degrees(-0.02), Angle::ZERO);
        assert_abs_diff_eq!(r.ra, 359.99, epsilon = 1e-10);

        // Continuous: the separation of the points straddling the wrap is the
        // offset itself.
        assert_abs_diff_eq!(p.separation(&q).to_degrees(), 0.02, epsilon = 1e-9);
    }

    #[test]
    fn test_ra_just_below_zero_wraps_into_range() {
        let p = SkyPoint::new(0.0, 0.0).offset(Angle::from_degrees(-1e-15), Angle::ZERO);
        assert!((0.0..360.0).contains(&p.ra), "{}", p.ra);
        assert!((0.0..360.0).contains(&SkyPoint::new(-1e-14, 0.0).ra));
    }

    #[test]
    fn test_offset_round_trip() {
        // Error bound: < 1e-6 degrees for offsets below 0.5 degrees.
        let offsets = [
            (0.0, 0.0),
            (0.1, -0.2),
            (-0.49, 0.49),
            (0.3, 0.3),
            (-0.25, -0.4),
        ];
        for (ra, dec) in [(0.1, -30.0), (150.0, -30.0), (359.9, 45.0), (250.0, 10.0)] {
            let p = SkyPoint::new(ra, dec);
            for (d_ra, d_dec) in offsets {
                let q = p.offset(Angle::from_degrees(d_ra), Angle::from_degrees(d_dec));
                let (back_ra, back_dec) = p.offset_to(&q);
                assert_abs_diff_eq!(back_ra.to_degrees(), d_ra, epsilon = 1e-6);
                assert_abs_diff_eq!(back_dec.to_degrees(), d_dec, epsilon = 1e-6);

                // Undoing the offset from the intermediate point uses the
                // cos(Dec) scaling there.
                let (inv_ra, inv_dec) = q.offset_to(&p);
                let r = q.offset(inv_ra, inv_dec);
                assert_abs_diff_eq!(r.ra, p.ra, epsilon = 1e-6);
                assert_abs_diff_eq!(r.dec, p.dec, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_separation() {
        let a = SkyPoint::new(0.0, 0.0);
        let b = SkyPoint::new(90.0, 0.0);
        assert_abs_diff_eq!(a.separation(&b).to_degrees(), 90.0, epsilon = 1e-10);
        let c = SkyPoint::new(0.0, 1.0);
        assert_abs_diff_eq!(a.separation(&c).to_degrees(), 1.0, epsilon = 1e-10);
    }
}
