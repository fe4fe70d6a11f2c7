// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all finder-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::{common::InputArgsError, plot::PlotArgsError};
use crate::{
    footprint::{CalibrationLoadError, FootprintError},
    sexagesimal::SexagesimalError,
    unit_parsing::UnitParseError,
    wcs::ProjectionError,
};

const ANGLE_HINT: &str = "Angles may carry a unit (deg, arcmin, arcsec or rad), e.g. '45deg'. RA may be decimal degrees, 'hh:mm:ss.s' or 'XXhYYmZZs'; Dec may be decimal degrees, 'dd:mm:ss.s' or 'XXdYYmZZs'.";

/// The *only* publicly visible error from the finder binary.
#[derive(Error, Debug)]
pub enum FinderError {
    /// An error with the user's pointing, angles or windows.
    #[error("{0}\n\n{ANGLE_HINT}")]
    Input(String),

    /// An error building the footprint.
    #[error("{0}")]
    Footprint(String),

    /// An error reading the free-region table.
    #[error("{0}\n\nThe free-region table must have two whitespace-separated columns (RA and Dec offsets in arcseconds); lines starting with '#' are ignored.")]
    Calibration(String),

    /// An error with the image WCS.
    #[error("{0}\n\nWCS files are TOML or JSON with the keys 'crval', 'crpix', 'cd' and (optionally) 'naxis'.")]
    Wcs(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// An error related to drawing a chart.
    #[error("{0}")]
    Plot(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<InputArgsError> for FinderError {
    fn from(e: InputArgsError) -> Self {
        match e {
            InputArgsError::NoPointing
            | InputArgsError::Ra { .. }
            | InputArgsError::Dec { .. }
            | InputArgsError::Angle { .. }
            | InputArgsError::InjectorSide(_)
            | InputArgsError::Mode(_) => Self::Input(e.to_string()),
            InputArgsError::Footprint(e) => Self::from(e),
            InputArgsError::WcsFile { .. } | InputArgsError::WcsExtension(_) => {
                Self::Wcs(e.to_string())
            }
            InputArgsError::Calibration(e) => Self::from(e),
            InputArgsError::Acquisition(_) | InputArgsError::IO(_) => Self::Generic(e.to_string()),
        }
    }
}

impl From<PlotArgsError> for FinderError {
    fn from(e: PlotArgsError) -> Self {
        Self::Plot(e.to_string())
    }
}

// Library code errors.

impl From<FootprintError> for FinderError {
    fn from(e: FootprintError) -> Self {
        match e {
            FootprintError::InvalidPointing { .. }
            | FootprintError::InvalidPositionAngle(_)
            | FootprintError::InvalidArmAngle(_)
            | FootprintError::InvalidWindow { .. }
            | FootprintError::BadWindowString(_) => Self::Input(e.to_string()),
            FootprintError::EmptyShape(_) => Self::Footprint(e.to_string()),
            FootprintError::Projection(e) => Self::from(e),
        }
    }
}

impl From<ProjectionError> for FinderError {
    fn from(e: ProjectionError) -> Self {
        Self::Wcs(e.to_string())
    }
}

impl From<CalibrationLoadError> for FinderError {
    fn from(e: CalibrationLoadError) -> Self {
        Self::Calibration(e.to_string())
    }
}

impl From<SexagesimalError> for FinderError {
    fn from(e: SexagesimalError) -> Self {
        Self::Input(e.to_string())
    }
}

impl From<UnitParseError> for FinderError {
    fn from(e: UnitParseError) -> Self {
        Self::Input(e.to_string())
    }
}

#[cfg(feature = "plotting")]
impl From<crate::plotting::DrawError> for FinderError {
    fn from(e: crate::plotting::DrawError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<serde_json::Error> for FinderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for FinderError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for FinderError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
