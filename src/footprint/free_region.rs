// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The table of offsets outlining where the pickoff arm can patrol without
//! vignetting.
//!
//! The table is plain text: one `Δra Δdec` row per line in arcseconds,
//! separated by whitespace. Blank lines and lines starting with `#` are
//! ignored.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::debug;
use thiserror::Error;

use crate::coord::Angle;

/// The table compiled into the binary.
const PACKAGED_TABLE: &str = include_str!("../../data/guider_hole_arcseconds.txt");

/// A polygon needs at least this many vertices.
const MIN_ROWS: usize = 3;

/// Offsets from the rotator centre, in arcseconds, in boundary order.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeRegionTable {
    rows: Vec<[f64; 2]>,
}

impl FreeRegionTable {
    /// The table shipped with this crate.
    pub fn packaged() -> Result<FreeRegionTable, CalibrationLoadError> {
        Self::parse(&mut PACKAGED_TABLE.as_bytes())
    }

    /// Read a table from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FreeRegionTable, CalibrationLoadError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|err| CalibrationLoadError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        let table = Self::parse(&mut BufReader::new(f)).map_err(|e| match e {
            CalibrationLoadError::Io { err, .. } => CalibrationLoadError::Io {
                path: path.to_path_buf(),
                err,
            },
            e => e,
        })?;
        debug!("Read {} free-region rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a table from a buffer.
    pub fn parse<T: BufRead>(buf: &mut T) -> Result<FreeRegionTable, CalibrationLoadError> {
        let parse_float = |string: &str, line_num: u32| -> Result<f64, CalibrationLoadError> {
            match string.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(f),
                _ => Err(CalibrationLoadError::ParseFloat {
                    line_num,
                    string: string.to_string(),
                }),
            }
        };

        let mut rows = vec![];
        let mut line = String::new();
        let mut line_num: u32 = 0;
        loop {
            line.clear();
            let n = buf
                .read_line(&mut line)
                .map_err(|err| CalibrationLoadError::Io {
                    path: PathBuf::from("<buffer>"),
                    err,
                })?;
            if n == 0 {
                break;
            }
            line_num += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let items: Vec<&str> = trimmed.split_ascii_whitespace().collect();
            match items.as_slice() {
                [d_ra, d_dec] => rows.push([parse_float(d_ra, line_num)?, parse_float(d_dec, line_num)?]),
                _ => {
                    return Err(CalibrationLoadError::WrongColumnCount {
                        line_num,
                        count: items.len(),
                    })
                }
            }
        }

        if rows.len() < MIN_ROWS {
            return Err(CalibrationLoadError::TooFewRows(rows.len()));
        }
        Ok(FreeRegionTable { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The (east, north) offset of each boundary point.
    pub fn offsets(&self) -> impl Iterator<Item = (Angle, Angle)> + '_ {
        self.rows
            .iter()
            .map(|[d_ra, d_dec]| (Angle::from_arcsec(*d_ra), Angle::from_arcsec(*d_dec)))
    }
}

#[derive(Error, Debug)]
pub enum CalibrationLoadError {
    #[error("Couldn't read free-region table {}: {}", .path.display(), .err)]
    Io { path: PathBuf, err: std::io::Error },

    #[error("Free-region table line {line_num}: Couldn't parse '{string}' as a number")]
    ParseFloat { line_num: u32, string: String },

    #[error("Free-region table line {line_num}: Expected 2 columns (Δra Δdec in arcsec), but found {count}")]
    WrongColumnCount { line_num: u32, count: usize },

    #[error("The free-region table has {0} rows, but at least 3 are needed to outline a region")]
    TooFewRows(usize),
}
