// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Code for handling conversion to and from sexagesimal.

Pointings are usually typed in as "hh:mm:ss.s" / "±dd:mm:ss" or
"12h30m00s" / "-30d00m00s"; plain decimal degrees are also accepted.
 */

use thiserror::Error;

/// Parse a right ascension. Accepts decimal degrees, "hh:mm:ss.s" or
/// "XXhYYmZZs". The result is in degrees.
///
/// # Examples
///
/// ```
/// # use hcam_finder::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// assert_abs_diff_eq!(parse_ra("10:00:00")?, 150.0);
/// assert_abs_diff_eq!(parse_ra("150.0")?, 150.0);
/// # Ok(())
/// # }
/// ```
pub fn parse_ra(s: &str) -> Result<f64, SexagesimalError> {
    let s = s.trim();
    if let Ok(f) = s.parse::<f64>() {
        return Ok(f);
    }
    if s.contains(':') {
        sexagesimal_hms_colon_str_to_degrees(s)
    } else if s.contains('h') {
        sexagesimal_hms_string_to_degrees(s)
    } else {
        Err(SexagesimalError::Unrecognised(s.to_string()))
    }
}

/// Parse a declination. Accepts decimal degrees, "±dd:mm:ss.s" or
/// "±XXdYYmZZs". The result is in degrees.
pub fn parse_dec(s: &str) -> Result<f64, SexagesimalError> {
    let s = s.trim();
    if let Ok(f) = s.parse::<f64>() {
        return Ok(f);
    }
    if s.contains(':') {
        sexagesimal_colon_str_to_degrees(s)
    } else if s.contains('d') {
        sexagesimal_dms_string_to_degrees(s)
    } else {
        Err(SexagesimalError::Unrecognised(s.to_string()))
    }
}

/// Split off a leading sign. The sign can't be carried by the first field,
/// because "-00" parses to a positive zero.
fn split_sign(s: &str) -> (bool, &str) {
    let s = s.trim();
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    }
}

fn colon_fields(s: &str) -> Result<[f64; 3], SexagesimalError> {
    let mut split = Vec::with_capacity(3);
    for elem in s.split(':') {
        split.push(elem.trim().parse()?);
    }
    match split.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(SexagesimalError::WrongFieldCount(s.to_string())),
    }
}

/// Convert a sexagesimal-formatted string delimited by colons to a float
/// \[degrees\]. The input is assumed to be in "degrees minutes seconds".
///
/// # Examples
///
/// ```
/// # use hcam_finder::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = sexagesimal_colon_str_to_degrees("-22:58:52.56")?;
/// assert_abs_diff_eq!(f, -22.981267, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn sexagesimal_colon_str_to_degrees(s: &str) -> Result<f64, SexagesimalError> {
    let (negative, unsigned) = split_sign(s);
    let [d, m, s] = colon_fields(unsigned)?;
    Ok(apply_sign(negative, sexagesimal_dms_to_degrees(d, m, s)))
}

/// Convert a sexagesimal-formatted string delimited by colons to a float
/// \[degrees\]. The input is assumed to be in "hours minutes seconds".
pub fn sexagesimal_hms_colon_str_to_degrees(s: &str) -> Result<f64, SexagesimalError> {
    let (negative, unsigned) = split_sign(s);
    let [h, m, s] = colon_fields(unsigned)?;
    Ok(apply_sign(negative, sexagesimal_hms_to_degrees(h, m, s)))
}

fn apply_sign(negative: bool, f: f64) -> f64 {
    if negative {
        -f
    } else {
        f
    }
}

pub fn sexagesimal_dms_to_degrees(d: f64, m: f64, s: f64) -> f64 {
    let (negative, d_abs) = if d < 0.0 { (true, d.abs()) } else { (false, d) };
    let num = d_abs + m / 60.0 + s / 3600.0;
    apply_sign(negative, num)
}

pub fn sexagesimal_hms_to_degrees(h: f64, m: f64, s: f64) -> f64 {
    sexagesimal_dms_to_degrees(15.0 * h, 15.0 * m, 15.0 * s)
}

/// Split "AxBmCs" into its three numbers, where `first` is the delimiter of the
/// first field ('h' or 'd').
fn lettered_fields(s: &str, first: char) -> Result<[f64; 3], SexagesimalError> {
    let (a, rest) = s.split_once(first).ok_or_else(|| match first {
        'h' => SexagesimalError::MissingH(s.to_string()),
        _ => SexagesimalError::MissingD(s.to_string()),
    })?;
    let (b, rest) = rest
        .split_once('m')
        .ok_or_else(|| SexagesimalError::MissingM(s.to_string()))?;
    let (c, _) = rest
        .split_once('s')
        .ok_or_else(|| SexagesimalError::MissingS(s.to_string()))?;
    Ok([a.trim().parse()?, b.trim().parse()?, c.trim().parse()?])
}

/// Convert a sexagesimal-formatted string in "degrees minutes seconds" to a
/// float \[degrees\].
///
/// # Examples
///
/// ```
/// # use hcam_finder::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = sexagesimal_dms_string_to_degrees("-11d49m01.062s")?;
/// assert_abs_diff_eq!(f, -11.81696167, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn sexagesimal_dms_string_to_degrees(dms: &str) -> Result<f64, SexagesimalError> {
    let (negative, unsigned) = split_sign(dms);
    let [d, m, s] = lettered_fields(unsigned, 'd')?;
    Ok(apply_sign(negative, sexagesimal_dms_to_degrees(d, m, s)))
}

/// Convert a sexagesimal-formatted string in "hours minutes seconds" to a
/// float \[degrees\].
///
/// # Examples
///
/// ```
/// # use hcam_finder::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = sexagesimal_hms_string_to_degrees("11h34m23.7854s")?;
/// assert_abs_diff_eq!(f, 173.59910583333334, epsilon = 1e-10);
/// # Ok(())
/// # }
/// ```
pub fn sexagesimal_hms_string_to_degrees(hms: &str) -> Result<f64, SexagesimalError> {
    let (negative, unsigned) = split_sign(hms);
    let [h, m, s] = lettered_fields(unsigned, 'h')?;
    Ok(apply_sign(negative, sexagesimal_hms_to_degrees(h, m, s)))
}

/// Convert a number in degrees to a sexagesimal-formatted string in "degrees
/// minutes seconds".
///
/// # Examples
///
/// ```
/// # use hcam_finder::sexagesimal::*;
/// let dms = degrees_to_sexagesimal_dms(-165.0169619);
/// assert_eq!(dms, "-165d01m01.0628s");
/// ```
pub fn degrees_to_sexagesimal_dms(f: f64) -> String {
    let negative = f < 0.0;
    let f_abs = f.abs();
    let degrees = f_abs.floor();
    let minutes = (f_abs - degrees) * 60.0;
    let seconds = (minutes - minutes.floor()) * 60.0;

    format!(
        "{sign}{deg}d{min:02}m{sec:02}.{frac:04}s",
        sign = if negative { "-" } else { "" },
        deg = degrees as u16,
        min = minutes.floor() as u8,
        sec = seconds.floor() as u8,
        // The 4 in 1e4 gives that many decimal places.
        frac = ((seconds - seconds.floor()) * 1e4) as u32,
    )
}

/// Convert a number in degrees to a sexagesimal-formatted string in "hours
/// minutes seconds".
///
/// # Examples
///
/// ```
/// # use hcam_finder::sexagesimal::*;
/// let hms = degrees_to_sexagesimal_hms(-177.254425);
/// assert_eq!(hms, "-11h49m01.0619s");
/// ```
pub fn degrees_to_sexagesimal_hms(f: f64) -> String {
    let negative = f < 0.0;
    let f_abs = f.abs();
    let hours = (f_abs / 15.0).floor();
    let minutes = ((f_abs / 15.0 - hours) * 60.0).floor();
    let seconds = (((f_abs / 15.0 - hours) * 60.0) - minutes) * 60.0;

    format!(
        "{sign}{hrs}h{min:02}m{sec:02}.{frac:04}s",
        sign = if negative { "-" } else { "" },
        hrs = hours as u8,
        min = minutes as u8,
        sec = seconds.floor() as u8,
        // The 4 in 1e4 gives that many decimal places.
        frac = ((seconds - seconds.floor()) * 1e4) as u32,
    )
}

#[derive(Error, Debug)]
pub enum SexagesimalError {
    /// Three numbers (fields) are expected; this error is used when the number
    /// of fields is not three.
    #[error("Did not get three sexagesimal fields: {0}")]
    WrongFieldCount(String),

    #[error("Did not find 'h' when attempting to read sexagesimal string: {0}")]
    MissingH(String),

    #[error("Did not find 'd' when attempting to read sexagesimal string: {0}")]
    MissingD(String),

    #[error("Did not find 'm' when attempting to read sexagesimal string: {0}")]
    MissingM(String),

    #[error("Did not find 's' when attempting to read sexagesimal string: {0}")]
    MissingS(String),

    #[error("'{0}' is neither decimal degrees nor a recognised sexagesimal format")]
    Unrecognised(String),

    #[error("{0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::*;

    #[test]
    fn test_sex2float_1() {
        let result = sexagesimal_colon_str_to_degrees("-22:58:52.56");
        assert!(result.is_ok());
        assert_abs_diff_eq!(result.unwrap(), -22.981266666666667, epsilon = 1e-10);
    }

    #[test]
    fn test_sex2float_2() {
        let result = sexagesimal_colon_str_to_degrees("12:30:45");
        assert!(result.is_ok());
        assert_abs_diff_eq!(result.unwrap(), 12.5125, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_zero_degrees_keeps_sign() {
        let result = sexagesimal_colon_str_to_degrees("-00:30:00");
        assert_abs_diff_eq!(result.unwrap(), -0.5, epsilon = 1e-12);
        let result = sexagesimal_dms_string_to_degrees("-0d30m00s");
        assert_abs_diff_eq!(result.unwrap(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_ra_and_dec() {
        assert_abs_diff_eq!(parse_ra("10:00:00").unwrap(), 150.0, epsilon = 1e-10);
        assert_abs_diff_eq!(parse_ra("10h00m00s").unwrap(), 150.0, epsilon = 1e-10);
        assert_abs_diff_eq!(parse_ra(" 150.5 ").unwrap(), 150.5);
        assert_abs_diff_eq!(parse_dec("-30:00:00").unwrap(), -30.0, epsilon = 1e-10);
        assert_abs_diff_eq!(parse_dec("+30d30m00s").unwrap(), 30.5, epsilon = 1e-10);
        assert_abs_diff_eq!(parse_dec("-30").unwrap(), -30.0);
    }

    #[test]
    fn test_bad_strings() {
        assert!(matches!(
            parse_ra("10:00"),
            Err(SexagesimalError::WrongFieldCount(_))
        ));
        assert!(matches!(
            parse_ra("ten"),
            Err(SexagesimalError::Unrecognised(_))
        ));
        assert!(matches!(
            parse_dec("10d30"),
            Err(SexagesimalError::MissingM(_))
        ));
        assert!(matches!(
            parse_dec("1x:00:00"),
            Err(SexagesimalError::ParseFloat(_))
        ));
    }

    #[test]
    fn test_round_trip_strings() {
        let hms = degrees_to_sexagesimal_hms(150.0);
        assert_eq!(hms, "10h00m00.0000s");
        assert_abs_diff_eq!(parse_ra(&hms).unwrap(), 150.0, epsilon = 1e-6);

        let dms = degrees_to_sexagesimal_dms(-30.5);
        assert_eq!(dms, "-30d30m00.0000s");
        assert_abs_diff_eq!(parse_dec(&dms).unwrap(), -30.5, epsilon = 1e-6);
    }
}
