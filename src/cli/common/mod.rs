// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Both the `footprint` and
//! `plot` subcommands need a pointing, the arm settings and an image WCS, so
//! those arguments are shared between them.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    str::FromStr,
    time::{Duration, Instant},
};

use clap::Parser;
use console::style;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    acquire::{Acquisition, CancelToken, Poll},
    constants::{BLANK_FIELD_FOV_FACTOR, BLANK_FIELD_SCALE_DEG, CHART_FOV},
    coord::{Angle, AngleUnit, Pointing, SkyPoint},
    footprint::{
        build_footprint, ArmSettings, CalibrationLoadError, FootprintError, InjectorSide, Instrument,
        InstrumentMode, WindowSpec,
    },
    sexagesimal::{
        degrees_to_sexagesimal_dms, degrees_to_sexagesimal_hms, parse_dec, parse_ra,
        SexagesimalError,
    },
    unit_parsing::{parse_angle_with_default, UnitParseError},
    scene::Overlay,
    wcs::{Projection, TanWcs},
};

/// Pointings closer than this to a pole [degrees] get a warning; RA offsets
/// blow up there.
const POLE_WARNING_DEG: f64 = 85.0;

/// How often to report on a WCS that's still being prepared.
const ACQUIRE_POLL: Duration = Duration::from_millis(500);

/// Give up preparing the WCS after this long.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(60);

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref INJECTOR_SIDE_HELP: String =
        format!("The side of the field the injector arm is deployed on. Supported values: {}. Default: {}", InjectorSide::iter().join(", "), InjectorSide::default());

    static ref MODE_HELP: String =
        format!("Which parts of the instrument to draw. Supported values: {}. Default: {}", InstrumentMode::iter().join(", "), InstrumentMode::default());

    static ref WCS_HELP: String =
        format!("A TOML or JSON file describing the chart's TAN WCS (crval, crpix, cd and optionally naxis). If this isn't given, a blank {:.0}' field centred on the pointing is used", (CHART_FOV * BLANK_FIELD_FOV_FACTOR).to_arcmin());
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

impl ArgFileTypes {
    /// The type of a file, judged by its extension.
    pub(super) fn of(path: &Path) -> Option<ArgFileTypes> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok())
    }
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        match ArgFileTypes::of(&$arg_file) {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FinderError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FinderError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            None => {
                return Err(FinderError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Where the telescope points, how the COMPO arms are set, and which image
/// the footprint is drawn on.
#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct FootprintInputArgs {
    /// The RA of the pointing. Decimal degrees, "hh:mm:ss.s" or "XXhYYmZZs".
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(super) ra: Option<String>,

    /// The Dec of the pointing. Decimal degrees, "dd:mm:ss.s" or "XXdYYmZZs".
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(super) dec: Option<String>,

    /// The instrument position angle, east of north. Without a unit, degrees
    /// are assumed. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(super) pa: Option<String>,

    /// The pickoff arm angle; 0 points the arm north of its pivot, positive
    /// angles swing it east. Without a unit, degrees are assumed. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "COMPO")]
    pub(super) pickoff_angle: Option<String>,

    #[clap(long, help = INJECTOR_SIDE_HELP.as_str(), help_heading = "COMPO")]
    pub(super) injector_side: Option<String>,

    #[clap(long, help = MODE_HELP.as_str(), help_heading = "COMPO")]
    pub(super) mode: Option<String>,

    /// A detector window to draw as well as the full detector, as
    /// "xstart,ystart,nx,ny" in unbinned pixels from the detector's lower-left
    /// corner. May be given many times.
    #[clap(long = "window", multiple_occurrences(true), help_heading = "DETECTOR")]
    pub(super) windows: Option<Vec<String>>,

    #[clap(long, help = WCS_HELP.as_str(), parse(from_os_str), help_heading = "CHART")]
    pub(super) wcs: Option<PathBuf>,

    /// A free-region table to use instead of the built-in one. Two columns
    /// of RA and Dec offsets [arcsec].
    #[clap(long, parse(from_os_str), help_heading = "CHART")]
    pub(super) free_region_table: Option<PathBuf>,
}

impl FootprintInputArgs {
    /// Merge with file arguments, preferring `self`'s values.
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            ra: self.ra.or(other.ra),
            dec: self.dec.or(other.dec),
            pa: self.pa.or(other.pa),
            pickoff_angle: self.pickoff_angle.or(other.pickoff_angle),
            injector_side: self.injector_side.or(other.injector_side),
            mode: self.mode.or(other.mode),
            windows: self.windows.or(other.windows),
            wcs: self.wcs.or(other.wcs),
            free_region_table: self.free_region_table.or(other.free_region_table),
        }
    }

    pub(super) fn parse(self) -> Result<FootprintParams, InputArgsError> {
        let Self {
            ra,
            dec,
            pa,
            pickoff_angle,
            injector_side,
            mode,
            windows,
            wcs,
            free_region_table,
        } = self;

        let (ra, dec) = match (ra, dec) {
            (Some(ra), Some(dec)) => (ra, dec),
            _ => return Err(InputArgsError::NoPointing),
        };
        let ra_deg = parse_ra(&ra).map_err(|err| InputArgsError::Ra { input: ra, err })?;
        let dec_deg = parse_dec(&dec).map_err(|err| InputArgsError::Dec { input: dec, err })?;
        let pa = parse_angle_arg("--pa", pa)?;
        let pointing = Pointing::new(ra_deg, dec_deg, pa)?;
        if dec_deg.abs() > POLE_WARNING_DEG {
            format!("The pointing is within {}° of a pole; RA offsets are unreliable there and the footprint may be distorted", 90.0 - POLE_WARNING_DEG).warn();
        }

        let mode = match mode {
            None => InstrumentMode::default(),
            Some(s) => InstrumentMode::from_str(&s).map_err(|_| InputArgsError::Mode(s))?,
        };
        if mode == InstrumentMode::Ccd && (pickoff_angle.is_some() || injector_side.is_some()) {
            "The COMPO arm settings are ignored when only the CCD is drawn".warn();
        }
        let settings = ArmSettings {
            pickoff_angle: parse_angle_arg("--pickoff-angle", pickoff_angle)?,
            injector_side: match injector_side {
                None => InjectorSide::default(),
                Some(s) => {
                    InjectorSide::from_str(&s).map_err(|_| InputArgsError::InjectorSide(s))?
                }
            },
            mode,
            windows: windows
                .unwrap_or_default()
                .iter()
                .map(|w| WindowSpec::from_str(w))
                .collect::<Result<_, _>>()?,
        };

        let instrument = match &free_region_table {
            Some(path) => {
                debug!("Reading free-region table {}", path.display());
                Instrument::load(path)?
            }
            None => Instrument::packaged()?,
        };
        let wcs = match wcs {
            Some(path) => WcsSource::File(path),
            None => WcsSource::BlankField,
        };

        let mut printer = InfoPrinter::new("Pointing".into());
        printer.push_block(vec![
            style("      RA           Dec").bold().to_string().into(),
            format!(
                "{:>8.4}°    {:>8.4}°",
                pointing.centre().ra,
                pointing.centre().dec
            )
            .into(),
            format!(
                "{} {}",
                degrees_to_sexagesimal_hms(pointing.centre().ra),
                degrees_to_sexagesimal_dms(pointing.centre().dec)
            )
            .into(),
        ]);
        printer.push_line(format!("Position angle {}", pointing.position_angle()).into());
        let mut instrument_block = vec![format!("Mode: {mode}").into()];
        if mode == InstrumentMode::Compo {
            instrument_block.push(format!("Pickoff angle: {}", settings.pickoff_angle).into());
            instrument_block.push(format!("Injector side: {}", settings.injector_side).into());
        }
        for window in &settings.windows {
            instrument_block.push(format!("Window: {window}").into());
        }
        printer.push_block(instrument_block);
        printer.push_line(
            match &free_region_table {
                Some(path) => format!("Free-region table: {}", path.display()),
                None => "Free-region table: built in".to_string(),
            }
            .into(),
        );
        printer.push_line(match &wcs {
            WcsSource::File(path) => format!("Chart WCS: {}", path.display()).into(),
            WcsSource::BlankField => "Chart WCS: blank field".into(),
        });
        printer.display();

        Ok(FootprintParams {
            pointing,
            settings,
            instrument,
            wcs,
        })
    }
}

/// Parse an optional angle argument, assuming degrees if there's no unit. An
/// absent argument is zero.
fn parse_angle_arg(arg: &'static str, value: Option<String>) -> Result<Angle, InputArgsError> {
    match value {
        None => Ok(Angle::from_degrees(0.0)),
        Some(s) => parse_angle_with_default(&s, Some(AngleUnit::Degrees))
            .map_err(|err| InputArgsError::Angle { arg, err }),
    }
}

/// Everything needed to compute a footprint.
#[derive(Debug)]
pub(super) struct FootprintParams {
    pub(super) pointing: Pointing,
    pub(super) settings: ArmSettings,
    pub(super) instrument: Instrument,
    pub(super) wcs: WcsSource,
}

impl FootprintParams {
    /// Get the chart's WCS and put the footprint on it.
    pub(super) fn draw(self) -> Result<Chart, InputArgsError> {
        let FootprintParams {
            pointing,
            settings,
            instrument,
            wcs,
        } = self;
        let wcs = wcs.acquire(pointing.centre())?;
        let footprint = build_footprint(&pointing, &wcs, &instrument, &settings)?;
        let overlay = Overlay::new();
        overlay.replace_all(footprint);

        let shapes = overlay.snapshot();
        info!(
            "Drew {} shapes with {} vertices",
            shapes.len(),
            shapes.values().map(|c| c.num_vertices()).sum::<usize>()
        );
        let off_chart: Vec<Cow<'static, str>> = shapes
            .iter()
            .filter(|(_, compound)| {
                compound.shapes.iter().any(|shape| {
                    let (min, max) = shape.bounding_box();
                    !(wcs.contains(min) && wcs.contains(max))
                })
            })
            .map(|(name, _)| name.clone().into())
            .collect();
        if !off_chart.is_empty() {
            let mut block: Vec<Cow<'static, str>> =
                vec!["These shapes extend beyond the edge of the chart:".into()];
            block.extend(off_chart);
            block.warn();
        }

        Ok(Chart {
            pointing,
            wcs,
            overlay,
        })
    }
}

/// A footprint drawn on a chart.
#[derive(Debug)]
pub(super) struct Chart {
    pub(super) pointing: Pointing,
    pub(super) wcs: TanWcs,
    pub(super) overlay: Overlay,
}

/// Where a chart's WCS comes from.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum WcsSource {
    File(PathBuf),

    /// A synthetic north-up, east-left field centred on the pointing.
    BlankField,
}

impl WcsSource {
    fn prepare(&self, centre: SkyPoint, cancel: &CancelToken) -> Result<TanWcs, InputArgsError> {
        let wcs = match self {
            WcsSource::File(path) => read_wcs_file(path)?,
            WcsSource::BlankField => TanWcs::blank_field(
                centre,
                CHART_FOV * BLANK_FIELD_FOV_FACTOR,
                Angle::from_degrees(BLANK_FIELD_SCALE_DEG),
            )
            .map_err(FootprintError::from)?,
        };
        if cancel.is_cancelled() {
            return Err(InputArgsError::Acquisition("cancelled".to_string()));
        }
        Ok(wcs)
    }

    /// Prepare the WCS on a background thread, reporting progress until it's
    /// ready.
    pub(super) fn acquire(self, centre: SkyPoint) -> Result<TanWcs, InputArgsError> {
        let start = Instant::now();
        let mut job = Acquisition::spawn("chart-wcs", move |cancel| self.prepare(centre, cancel))?;
        loop {
            match job.wait(ACQUIRE_POLL) {
                Poll::Ready(result) => {
                    trace!("Chart WCS ready after {:?}", start.elapsed());
                    return result;
                }
                Poll::Pending if start.elapsed() > ACQUIRE_TIMEOUT => {
                    job.cancel();
                    return Err(InputArgsError::Acquisition(format!(
                        "timed out after {}s",
                        ACQUIRE_TIMEOUT.as_secs()
                    )));
                }
                Poll::Pending => debug!("Still preparing the chart WCS..."),
                Poll::Cancelled => {
                    return Err(InputArgsError::Acquisition("cancelled".to_string()))
                }
                Poll::Lost => {
                    return Err(InputArgsError::Acquisition(
                        "the worker thread died".to_string(),
                    ))
                }
            }
        }
    }
}

/// Read a [`TanWcs`] from a TOML or JSON file.
pub(super) fn read_wcs_file(path: &Path) -> Result<TanWcs, InputArgsError> {
    debug!("Reading WCS from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let wcs_file = |err: String| InputArgsError::WcsFile {
        path: path.to_path_buf(),
        err,
    };
    match ArgFileTypes::of(path) {
        Some(ArgFileTypes::Toml) => toml::from_str(&contents).map_err(|e| wcs_file(e.to_string())),
        Some(ArgFileTypes::Json) => {
            serde_json::from_str(&contents).map_err(|e| wcs_file(e.to_string()))
        }
        None => Err(InputArgsError::WcsExtension(path.to_path_buf())),
    }
}

#[derive(Error, Debug)]
pub(super) enum InputArgsError {
    #[error("Both --ra and --dec must be given")]
    NoPointing,

    #[error("Couldn't parse RA '{input}': {err}")]
    Ra {
        input: String,
        err: SexagesimalError,
    },

    #[error("Couldn't parse Dec '{input}': {err}")]
    Dec {
        input: String,
        err: SexagesimalError,
    },

    #[error("Couldn't parse {arg}: {err}")]
    Angle {
        arg: &'static str,
        err: UnitParseError,
    },

    #[error("'{0}' isn't an injector side; expected left or right")]
    InjectorSide(String),

    #[error("'{0}' isn't an instrument mode; expected ccd or compo")]
    Mode(String),

    #[error("Couldn't decode a WCS from {}:\n{err}", .path.display())]
    WcsFile { path: PathBuf, err: String },

    #[error("WCS file {0:?} doesn't have a recognised file extension (toml or json)")]
    WcsExtension(PathBuf),

    #[error("Couldn't prepare the chart WCS: {0}")]
    Acquisition(String),

    #[error(transparent)]
    Footprint(#[from] FootprintError),

    #[error(transparent)]
    Calibration(#[from] CalibrationLoadError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
