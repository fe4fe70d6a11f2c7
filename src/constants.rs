// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Every angular constant carries its unit; see [`Angle`]. Plain `f64`s here are
counts, scale factors or already-documented pixel quantities.
 */

use crate::coord::Angle;

/// The field of view of a finder chart.
pub const CHART_FOV: Angle = Angle::from_arcmin(10.0);

/// Blank (synthetic) fields span this multiple of [`CHART_FOV`].
pub const BLANK_FIELD_FOV_FACTOR: f64 = 3.0;

/// The pixel scale of a blank (synthetic) field [degrees/pixel].
pub const BLANK_FIELD_SCALE_DEG: f64 = 0.000047;

/// HiPERCAM plate scale on the GTC.
pub const PLATE_SCALE: Angle = Angle::from_arcsec(0.081);

/// Unbinned detector image-area size [pixels].
pub const DETECTOR_NX: u32 = 2048;
/// Unbinned detector image-area size [pixels].
pub const DETECTOR_NY: u32 = 1024;

/// The patrol arc is sampled at this many arm angles.
pub const PATROL_ARC_SAMPLES: usize = 40;

/// The arm angles of the patrol arc span ±this.
pub const PATROL_ARC_HALF_SPAN: Angle = Angle::from_degrees(80.0);

/// Smoothed boundaries have this many points per control point.
pub const SMOOTHING_FACTOR: usize = 4;

/// Step used to measure the orientation of an image's sky axes.
pub const PARITY_PROBE: Angle = Angle::from_arcsec(1.0);

/// Size of the COMPO pickoff mirror.
pub const COMPO_PICKOFF_SIZE: Angle = Angle::from_arcsec(24.0);

/// Length of the COMPO pickoff arm, i.e. the radius of the circle the mirror
/// centre describes about the arm pivot.
pub const COMPO_ARM_LENGTH: Angle = Angle::from_arcmin(5.1851);

/// The pickoff arm pivot lies this far south of the rotator centre.
pub const COMPO_PIVOT_OFFSET: Angle = Angle::from_arcmin(5.4628);

/// Width of the pickoff arm baffle.
pub const COMPO_BAFFLE_WIDTH: Angle = Angle::from_arcsec(36.0);

/// Height of the pickoff arm baffle (along the arm).
pub const COMPO_BAFFLE_HEIGHT: Angle = Angle::from_arcsec(72.0);

/// Distance of the injector arm root from the rotator centre.
pub const COMPO_INJECTOR_ROOT_OFFSET: Angle = Angle::from_arcmin(1.5);

/// Length of the injector arm shadow.
pub const COMPO_INJECTOR_LENGTH: Angle = Angle::from_arcmin(2.5);

/// Half-width of the injector shadow at the arm root.
pub const COMPO_INJECTOR_HALF_WIDTH_INNER: Angle = Angle::from_arcsec(15.0);

/// Half-width of the injector shadow at the far end of the arm.
pub const COMPO_INJECTOR_HALF_WIDTH_OUTER: Angle = Angle::from_arcsec(28.0);

/// Tilt of the injector shadow relative to the detector rows.
pub const COMPO_INJECTOR_TILT: Angle = Angle::from_degrees(4.0);

/// Diameter of the injector mirror.
pub const COMPO_INJECTOR_MIRROR_DIAMETER: Angle = Angle::from_arcsec(30.0);
