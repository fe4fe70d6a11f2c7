// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;

pub use error::UnitParseError;

use std::str::FromStr;

use crate::coord::{Angle, AngleUnit};

/// Parse a string that may have a unit of angle attached to it. A naked number
/// comes back without a unit; it is up to the caller to decide whether that is
/// acceptable.
pub fn parse_angle(s: &str) -> Result<(f64, Option<AngleUnit>), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, None));
    };

    // That didn't work; the unit is whatever follows the numerical component.
    let trimmed = s.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(trimmed.len());
    let (prefix, suffix) = trimmed.split_at(split);
    let suffix = suffix.trim();
    match AngleUnit::from_str(suffix) {
        Ok(unit) => {
            let number: f64 = match prefix.trim().parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotAngleUnitButCantParse {
                        input: s.to_string(),
                        unit: unit.into(),
                    })
                }
            };
            Ok((number, Some(unit)))
        }

        // If we made it this far, we don't know how to parse the string.
        Err(_) => Err(UnitParseError::Unknown {
            input: s.to_string(),
            unit_type: "angle",
        }),
    }
}

/// Parse a string into an [`Angle`]. If the string has no unit, `default_unit`
/// is used; if that is `None` too, the string is rejected.
pub fn parse_angle_with_default(
    s: &str,
    default_unit: Option<AngleUnit>,
) -> Result<Angle, UnitParseError> {
    match parse_angle(s)? {
        (number, Some(unit)) => Ok(Angle::new(number, unit)),
        (number, None) => match default_unit {
            Some(unit) => Ok(Angle::new(number, unit)),
            None => Err(UnitParseError::MissingUnit(s.to_string())),
        },
    }
}
