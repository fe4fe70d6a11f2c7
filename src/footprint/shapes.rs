// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Instrument outlines in true sky coordinates.

Every function here is pure: it takes the rotator centre (and sometimes an arm
setting) and gives back sky positions, built by applying tangent-plane
offsets with [`SkyPoint::offset`]. Offsets are (east, north) pairs. Nothing
here knows about the position angle; the whole assembly is rotated later in
pixel space.
 */

use super::{FreeRegionTable, InjectorSide, InstrumentConstants, WindowSpec};
use crate::{
    constants::{PATROL_ARC_HALF_SPAN, PATROL_ARC_SAMPLES},
    coord::{Angle, SkyPoint},
    math::linspace,
};

/// The corners of a detector window with its lower-left corner at
/// `lower_left`, in the order LL, LR, UR, UL.
pub fn detector_window(lower_left: SkyPoint, width: Angle, height: Angle) -> [SkyPoint; 4] {
    [
        lower_left,
        lower_left.offset(width, Angle::ZERO),
        lower_left.offset(width, height),
        lower_left.offset(Angle::ZERO, height),
    ]
}

/// The lower-left corner of the full detector, which is centred on the
/// rotator centre.
pub fn detector_lower_left(centre: SkyPoint, constants: &InstrumentConstants) -> SkyPoint {
    centre.offset(
        -(constants.detector_width() * 0.5),
        -(constants.detector_height() * 0.5),
    )
}

/// The corners of the full detector.
pub fn detector_field(centre: SkyPoint, constants: &InstrumentConstants) -> [SkyPoint; 4] {
    detector_window(
        detector_lower_left(centre, constants),
        constants.detector_width(),
        constants.detector_height(),
    )
}

/// The corners of a window on the detector.
pub fn window_field(
    centre: SkyPoint,
    window: &WindowSpec,
    constants: &InstrumentConstants,
) -> [SkyPoint; 4] {
    detector_window(
        window.lower_left(detector_lower_left(centre, constants), constants),
        constants.plate_scale * window.nx as f64,
        constants.plate_scale * window.ny as f64,
    )
}

/// The offset of the pickoff mirror centre from the rotator centre when the
/// arm is at angle `theta`. The mirror centre moves on a circle of radius α
/// about the arm pivot, which sits β south of the rotator centre.
pub fn field_stop_centre(theta: Angle, constants: &InstrumentConstants) -> (Angle, Angle) {
    let (s, c) = theta.sin_cos();
    let alpha = constants.arm_length.to_degrees();
    let beta = constants.pivot_offset.to_degrees();
    (
        Angle::from_degrees(alpha * s),
        Angle::from_degrees(alpha * c - beta),
    )
}

/// The band swept by the pickoff mirror as the arm swings through its range.
///
/// The arm angle is sampled [`PATROL_ARC_SAMPLES`] times over
/// ±[`PATROL_ARC_HALF_SPAN`]. The boundary is the inner edge (arm length less
/// the mirror radius) in increasing angle, then the outer edge (arm length
/// plus the mirror radius) in decreasing angle, so it closes on itself.
pub fn patrol_arc(centre: SkyPoint, constants: &InstrumentConstants) -> Vec<SkyPoint> {
    let half_span = PATROL_ARC_HALF_SPAN.to_degrees();
    let thetas = linspace(-half_span, half_span, PATROL_ARC_SAMPLES);
    let alpha = constants.arm_length.to_degrees();
    let beta = constants.pivot_offset.to_degrees();
    let half_size = constants.pickoff_size.to_degrees() / 2.0;

    let edge = |r: f64, theta: f64| {
        let (s, c) = theta.to_radians().sin_cos();
        centre.offset(
            Angle::from_degrees(r * s),
            Angle::from_degrees(r * c - beta),
        )
    };

    let inner = thetas.iter().map(|&t| edge(alpha - half_size, t));
    let outer = thetas.iter().rev().map(|&t| edge(alpha + half_size, t));
    inner.chain(outer).collect()
}

/// The unvignetted region, one point per table row.
pub fn free_region(centre: SkyPoint, table: &FreeRegionTable) -> Vec<SkyPoint> {
    table
        .offsets()
        .map(|(d_ra, d_dec)| centre.offset(d_ra, d_dec))
        .collect()
}

/// The root of the injector arm, east (right) or west (left) of the rotator
/// centre [degrees].
fn injector_root(side: InjectorSide, constants: &InstrumentConstants) -> f64 {
    side.sign() * constants.injector_root_offset.to_degrees()
}

/// The shadow the injector arm casts on the field: a quadrilateral running
/// outwards from the arm root, widening and tilted along its length. Left and
/// right are mirror images east-west.
pub fn injector_vignetting(
    centre: SkyPoint,
    side: InjectorSide,
    constants: &InstrumentConstants,
) -> [SkyPoint; 4] {
    let s = side.sign();
    let x0 = injector_root(side, constants);
    let length = constants.injector_length.to_degrees();
    let w_in = constants.injector_half_width_inner.to_degrees();
    let w_out = constants.injector_half_width_outer.to_degrees();
    let rise = length * constants.injector_tilt.tan();
    let x1 = x0 + s * length;

    [(x0, -w_in), (x1, -w_out + rise), (x1, w_out + rise), (x0, w_in)].map(|(x, y)| {
        centre.offset(Angle::from_degrees(x), Angle::from_degrees(y))
    })
}

/// The injector mirror, half a pickoff mirror inboard of the arm root, and
/// its radius.
pub fn injector_mirror(
    centre: SkyPoint,
    side: InjectorSide,
    constants: &InstrumentConstants,
) -> (SkyPoint, Angle) {
    let x = injector_root(side, constants) - side.sign() * constants.pickoff_size.to_degrees() / 2.0;
    (
        centre.offset(Angle::from_degrees(x), Angle::ZERO),
        constants.injector_mirror_diameter * 0.5,
    )
}

/// The pickoff arm baffle as an unrotated rectangle (long side north-south)
/// centred on the field stop, and that centre. The caller turns it to the arm
/// angle once it is in pixels.
pub fn pickoff_baffle(
    centre: SkyPoint,
    theta: Angle,
    constants: &InstrumentConstants,
) -> ([SkyPoint; 4], SkyPoint) {
    let (fx, fy) = field_stop_centre(theta, constants);
    let (fx, fy) = (fx.to_degrees(), fy.to_degrees());
    let hw = constants.baffle_width.to_degrees() / 2.0;
    let hh = constants.baffle_height.to_degrees() / 2.0;
    let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(x, y)| {
        centre.offset(Angle::from_degrees(fx + x), Angle::from_degrees(fy + y))
    });
    let baffle_centre = centre.offset(Angle::from_degrees(fx), Angle::from_degrees(fy));
    (corners, baffle_centre)
}

/// The pickoff mirror at the field stop, and its radius.
pub fn pickoff_mirror(
    centre: SkyPoint,
    theta: Angle,
    constants: &InstrumentConstants,
) -> (SkyPoint, Angle) {
    let (fx, fy) = field_stop_centre(theta, constants);
    (centre.offset(fx, fy), constants.pickoff_size * 0.5)
}
