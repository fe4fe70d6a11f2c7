// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed properties of the instrument, and the settings of its moving
//! parts.

use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{CalibrationLoadError, FootprintError, FreeRegionTable};
use crate::{
    constants::*,
    coord::{Angle, SkyPoint},
};

/// Optical and mechanical sizes, all as angles on the sky.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstrumentConstants {
    /// Diameter of the pickoff mirror.
    pub pickoff_size: Angle,

    /// Radius of the circle described by the pickoff mirror centre (α).
    pub arm_length: Angle,

    /// Distance of the arm pivot south of the rotator centre (β).
    pub pivot_offset: Angle,

    pub baffle_width: Angle,
    pub baffle_height: Angle,

    pub injector_root_offset: Angle,
    pub injector_length: Angle,
    pub injector_half_width_inner: Angle,
    pub injector_half_width_outer: Angle,
    pub injector_tilt: Angle,
    pub injector_mirror_diameter: Angle,

    /// Size of one unbinned detector pixel.
    pub plate_scale: Angle,

    /// Unbinned detector size [pixels].
    pub detector_nx: u32,
    /// Unbinned detector size [pixels].
    pub detector_ny: u32,
}

impl InstrumentConstants {
    pub const COMPO: InstrumentConstants = InstrumentConstants {
        pickoff_size: COMPO_PICKOFF_SIZE,
        arm_length: COMPO_ARM_LENGTH,
        pivot_offset: COMPO_PIVOT_OFFSET,
        baffle_width: COMPO_BAFFLE_WIDTH,
        baffle_height: COMPO_BAFFLE_HEIGHT,
        injector_root_offset: COMPO_INJECTOR_ROOT_OFFSET,
        injector_length: COMPO_INJECTOR_LENGTH,
        injector_half_width_inner: COMPO_INJECTOR_HALF_WIDTH_INNER,
        injector_half_width_outer: COMPO_INJECTOR_HALF_WIDTH_OUTER,
        injector_tilt: COMPO_INJECTOR_TILT,
        injector_mirror_diameter: COMPO_INJECTOR_MIRROR_DIAMETER,
        plate_scale: PLATE_SCALE,
        detector_nx: DETECTOR_NX,
        detector_ny: DETECTOR_NY,
    };

    /// The angular width of the whole detector.
    pub fn detector_width(&self) -> Angle {
        self.plate_scale * self.detector_nx as f64
    }

    /// The angular height of the whole detector.
    pub fn detector_height(&self) -> Angle {
        self.plate_scale * self.detector_ny as f64
    }
}

/// Everything about the instrument that doesn't change between pointings.
/// Load it once and share it.
#[derive(Clone, Debug, PartialEq)]
pub struct Instrument {
    pub constants: InstrumentConstants,
    pub free_region: FreeRegionTable,
}

impl Instrument {
    /// COMPO with the free-region table compiled into this crate.
    pub fn packaged() -> Result<Instrument, CalibrationLoadError> {
        Ok(Instrument {
            constants: InstrumentConstants::COMPO,
            free_region: FreeRegionTable::packaged()?,
        })
    }

    /// COMPO with a free-region table read from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Instrument, CalibrationLoadError> {
        Ok(Instrument {
            constants: InstrumentConstants::COMPO,
            free_region: FreeRegionTable::from_file(path)?,
        })
    }
}

/// Which side of the field the injector arm is deployed on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum InjectorSide {
    #[strum(serialize = "left")]
    Left,

    #[default]
    #[strum(serialize = "right")]
    Right,
}

impl InjectorSide {
    /// +1 for right (east), -1 for left.
    pub fn sign(self) -> f64 {
        match self {
            InjectorSide::Left => -1.0,
            InjectorSide::Right => 1.0,
        }
    }
}

/// What is being drawn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentMode {
    /// Only the detector windows.
    #[strum(serialize = "ccd")]
    Ccd,

    /// The detector windows and the COMPO arms.
    #[default]
    #[strum(serialize = "compo")]
    Compo,
}

/// A detector window in unbinned pixels. `xstart` and `ystart` count from 1
/// at the detector's lower-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub xstart: u32,
    pub ystart: u32,
    pub nx: u32,
    pub ny: u32,
}

impl WindowSpec {
    /// Check that the window lies on a detector of the given size.
    pub fn validate(&self, constants: &InstrumentConstants) -> Result<(), FootprintError> {
        let fits = |start: u32, n: u32, size: u32| {
            start >= 1 && n >= 1 && u64::from(start) - 1 + u64::from(n) <= u64::from(size)
        };
        if fits(self.xstart, self.nx, constants.detector_nx)
            && fits(self.ystart, self.ny, constants.detector_ny)
        {
            Ok(())
        } else {
            Err(FootprintError::InvalidWindow {
                window: self.to_string(),
                nx: constants.detector_nx,
                ny: constants.detector_ny,
            })
        }
    }

    /// The sky position of the window's lower-left corner, given the
    /// detector's lower-left corner.
    pub fn lower_left(&self, detector_lower_left: SkyPoint, constants: &InstrumentConstants) -> SkyPoint {
        detector_lower_left.offset(
            constants.plate_scale * (self.xstart as f64 - 1.0),
            constants.plate_scale * (self.ystart as f64 - 1.0),
        )
    }
}

impl std::fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.xstart, self.ystart, self.nx, self.ny)
    }
}

impl FromStr for WindowSpec {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<WindowSpec, FootprintError> {
        let bad = || FootprintError::BadWindowString(s.to_string());
        let fields = s
            .split(',')
            .map(|f| f.trim().parse::<u32>().map_err(|_| bad()))
            .collect::<Result<Vec<u32>, _>>()?;
        match fields.as_slice() {
            [xstart, ystart, nx, ny] => Ok(WindowSpec {
                xstart: *xstart,
                ystart: *ystart,
                nx: *nx,
                ny: *ny,
            }),
            _ => Err(bad()),
        }
    }
}

/// The moving parts.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ArmSettings {
    /// The pickoff arm angle θ; 0 points the arm due north of its pivot and
    /// positive angles swing it east.
    pub pickoff_angle: Angle,

    pub injector_side: InjectorSide,

    pub mode: InstrumentMode,

    /// Windows to draw in addition to the full detector.
    pub windows: Vec<WindowSpec>,
}
