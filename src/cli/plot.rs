// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drawing a footprint onto a chart image.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{FootprintInputArgs, ARG_FILE_HELP};
use crate::FinderError;

#[cfg(feature = "plotting")]
const DEFAULT_OUTPUT: &str = "finder_chart.png";
#[cfg(feature = "plotting")]
const DEFAULT_WIDTH: u32 = 1000;

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PlotArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "footprint")]
    #[serde(default)]
    pub(super) input_args: FootprintInputArgs,

    /// The image to write. The format follows the extension. Default:
    /// finder_chart.png
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    /// The width of the image [pixels]; the height follows the chart's
    /// aspect ratio. Default: 1000
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) width: Option<u32>,
}

impl PlotArgs {
    /// Consolidate the command-line and file arguments, preferring the former.
    pub(super) fn merge(self) -> Result<PlotArgs, FinderError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PlotArgs {
                args_file: _,
                input_args,
                output,
                width,
            } = unpack_arg_file!(arg_file);

            Ok(PlotArgs {
                args_file: None,
                input_args: cli_args.input_args.merge(input_args),
                output: cli_args.output.or(output),
                width: cli_args.width.or(width),
            })
        } else {
            Ok(cli_args)
        }
    }

    #[cfg(not(feature = "plotting"))]
    pub(super) fn run(self, _dry_run: bool) -> Result<(), FinderError> {
        // Plotting is an optional feature. If it isn't available, the user
        // needs to compile with it.
        trace!("{:#?}", self);
        Err(FinderError::from(PlotArgsError::NoPlottingFeature))
    }

    #[cfg(feature = "plotting")]
    pub(super) fn run(self, dry_run: bool) -> Result<(), FinderError> {
        use log::info;

        use super::common::display_warnings;
        use crate::{plotting::render_footprint, wcs::Projection};

        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let PlotArgs {
            args_file: _,
            input_args,
            output,
            width,
        } = self;
        let width = width.unwrap_or(DEFAULT_WIDTH);
        if width == 0 {
            return Err(PlotArgsError::ZeroWidth.into());
        }
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let params = input_args.parse()?;

        if dry_run {
            display_warnings();
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let chart = params.draw()?;
        display_warnings();
        let centre = chart.wcs.pixel_of(chart.pointing.centre())?;
        render_footprint(&chart.overlay.snapshot(), &chart.wcs, centre, &output, width)?;
        info!("Finder chart written to {}", output.display());
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(super) enum PlotArgsError {
    #[cfg(not(feature = "plotting"))]
    #[error("hfinder was not compiled with the \"plotting\" feature; charts can't be drawn")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("The chart width must be at least 1 pixel")]
    ZeroWidth,
}
