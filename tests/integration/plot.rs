// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests for the plot subcommand.

use tempfile::TempDir;

use crate::{get_cmd_output, hfinder};

#[test]
fn test_plot_png() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("chart.png");
    let cmd = hfinder()
        .args([
            "plot",
            "--ra",
            "150",
            "--dec",
            "-30",
            "--pa",
            "30",
            "--width",
            "300",
            "-o",
            &format!("{}", output.display()),
        ])
        .ok();
    let ok = cmd.is_ok();
    let (_, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stderr}");
    let bytes = std::fs::read(&output).unwrap();
    // PNG signature.
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn test_plot_zero_width() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("chart.png");
    let cmd = hfinder()
        .args([
            "plot",
            "--ra",
            "150",
            "--dec",
            "-30",
            "--width",
            "0",
            "-o",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("at least 1 pixel"), "{stderr}");
}
