// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing a footprint out as JSON.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, FootprintInputArgs, ARG_FILE_HELP};
use crate::{coord::Pointing, scene::Footprint, wcs::TanWcs, FinderError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct FootprintArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "footprint")]
    #[serde(default)]
    pub(super) input_args: FootprintInputArgs,

    /// The file to write the footprint to. If this isn't given, the footprint
    /// is written to stdout.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    /// Write the JSON on a single line rather than indenting it.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) compact: bool,
}

/// What gets written out.
#[derive(Serialize)]
struct FootprintOutput<'a> {
    pointing: &'a Pointing,
    wcs: &'a TanWcs,
    shapes: &'a Footprint,
}

impl FootprintArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct, preferring CLI parameters over those in the
    /// file.
    pub(super) fn merge(self) -> Result<FootprintArgs, FinderError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let FootprintArgs {
                args_file: _,
                input_args,
                output,
                compact,
            } = unpack_arg_file!(arg_file);

            Ok(FootprintArgs {
                args_file: None,
                input_args: cli_args.input_args.merge(input_args),
                output: cli_args.output.or(output),
                compact: cli_args.compact || compact,
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FinderError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let FootprintArgs {
            args_file: _,
            input_args,
            output,
            compact,
        } = self;
        let params = input_args.parse()?;

        if dry_run {
            display_warnings();
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let chart = params.draw()?;
        display_warnings();
        let shapes = chart.overlay.snapshot();
        let out = FootprintOutput {
            pointing: &chart.pointing,
            wcs: &chart.wcs,
            shapes: &shapes,
        };

        let mut writer: Box<dyn Write> = match &output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(std::io::stdout().lock()),
        };
        if compact {
            serde_json::to_writer(&mut writer, &out)?;
        } else {
            serde_json::to_writer_pretty(&mut writer, &out)?;
        }
        writeln!(writer)?;
        writer.flush()?;

        if let Some(path) = output {
            info!("Footprint written to {}", path.display());
        }
        Ok(())
    }
}
