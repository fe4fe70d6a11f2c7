// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Angles that always carry their unit.

Geometry code never accepts a bare `f64` where an angle is meant; an [`Angle`]
remembers the unit it was made with and converts only when asked.
 */

use std::ops::{Mul, Neg};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The units an [`Angle`] can be expressed in. Parsing is case insensitive and
/// accepts common aliases.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[strum(to_string = "deg", serialize = "d", serialize = "degrees", serialize = "°")]
    Degrees,

    #[strum(to_string = "arcmin", serialize = "amin", serialize = "'", serialize = "′")]
    Arcmin,

    #[strum(to_string = "arcsec", serialize = "asec", serialize = "\"", serialize = "″")]
    Arcsec,

    #[strum(to_string = "rad", serialize = "radians")]
    Radians,
}

impl AngleUnit {
    /// How many degrees are in one of this unit.
    fn degrees_per_unit(self) -> f64 {
        match self {
            AngleUnit::Degrees => 1.0,
            AngleUnit::Arcmin => 1.0 / 60.0,
            AngleUnit::Arcsec => 1.0 / 3600.0,
            AngleUnit::Radians => 1.0_f64.to_degrees(),
        }
    }
}

/// An angle paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    value: f64,
    unit: AngleUnit,
}

impl Angle {
    pub const ZERO: Angle = Angle::from_degrees(0.0);

    pub const fn new(value: f64, unit: AngleUnit) -> Angle {
        Angle { value, unit }
    }

    pub const fn from_degrees(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Degrees)
    }

    pub const fn from_arcmin(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Arcmin)
    }

    pub const fn from_arcsec(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Arcsec)
    }

    pub const fn from_radians(value: f64) -> Angle {
        Angle::new(value, AngleUnit::Radians)
    }

    /// The number as it was given, in [`Angle::unit`]s.
    pub fn value(self) -> f64 {
        self.value
    }

    pub fn unit(self) -> AngleUnit {
        self.unit
    }

    pub fn to_degrees(self) -> f64 {
        match self.unit {
            AngleUnit::Radians => self.value.to_degrees(),
            u => self.value * u.degrees_per_unit(),
        }
    }

    pub fn to_radians(self) -> f64 {
        match self.unit {
            AngleUnit::Radians => self.value,
            _ => self.to_degrees().to_radians(),
        }
    }

    pub fn to_arcmin(self) -> f64 {
        match self.unit {
            AngleUnit::Arcmin => self.value,
            _ => self.to_degrees() * 60.0,
        }
    }

    pub fn to_arcsec(self) -> f64 {
        match self.unit {
            AngleUnit::Arcsec => self.value,
            _ => self.to_degrees() * 3600.0,
        }
    }

    /// Express this angle in another unit.
    pub fn to_unit(self, unit: AngleUnit) -> Angle {
        let value = match unit {
            AngleUnit::Degrees => self.to_degrees(),
            AngleUnit::Arcmin => self.to_arcmin(),
            AngleUnit::Arcsec => self.to_arcsec(),
            AngleUnit::Radians => self.to_radians(),
        };
        Angle { value, unit }
    }

    pub fn sin_cos(self) -> (f64, f64) {
        self.to_radians().sin_cos()
    }

    pub fn tan(self) -> f64 {
        self.to_radians().tan()
    }

    /// Wrap into [0°, 360°). The result is in degrees.
    pub fn normalised(self) -> Angle {
        Angle::from_degrees(wrap_degrees(self.to_degrees()))
    }

    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }
}

/// Wrap a value in degrees into [0, 360). `rem_euclid` rounds tiny negative
/// values up to exactly 360, which is folded back to 0.
pub(crate) fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::ZERO
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::new(-self.value, self.unit)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::new(self.value * rhs, self.unit)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}
