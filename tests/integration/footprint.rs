// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests for the footprint subcommand.

use std::io::Write;

use approx::assert_abs_diff_eq;
use indexmap::IndexMap;
use indoc::indoc;
use serde_json::Value;
use tempfile::TempDir;

use crate::{get_cmd_output, hfinder, make_file_in_dir};

/// The shape names in the order they were written. A plain `Value` map sorts
/// its keys, so the shapes are read into an `IndexMap`.
fn shape_names(json: &str) -> Vec<String> {
    #[derive(serde::Deserialize)]
    struct Shapes {
        shapes: IndexMap<String, Value>,
    }
    let shapes: Shapes = serde_json::from_str(json).unwrap();
    shapes.shapes.into_iter().map(|(name, _)| name).collect()
}

#[test]
fn test_footprint_to_stdout() {
    let cmd = hfinder()
        .args([
            "footprint",
            "--ra",
            "10:00:00",
            "--dec",
            "-30:00:00",
            "--pa",
            "45",
            "--pickoff-angle",
            "10deg",
        ])
        .ok();
    let ok = cmd.is_ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stderr}");

    // Log messages go elsewhere; stdout is pure JSON.
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        shape_names(&stdout),
        [
            "window",
            "patrol_arc",
            "compo_free_region",
            "injector",
            "pickoff"
        ]
    );
    assert_abs_diff_eq!(json["pointing"]["centre"]["ra"].as_f64().unwrap(), 150.0, epsilon = 1e-9);
    assert_eq!(json["shapes"]["window"]["name"], "window");
    assert_eq!(json["shapes"]["window"]["shapes"][0]["kind"], "polygon");
    assert_eq!(
        json["shapes"]["window"]["shapes"][0]["vertices"]
            .as_array()
            .unwrap()
            .len(),
        4
    );
    assert_eq!(json["shapes"]["pickoff"]["shapes"][1]["kind"], "circle");
}

#[test]
fn test_footprint_ccd_mode_with_windows_to_file() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("footprint.json");
    let cmd = hfinder()
        .args([
            "footprint",
            "--ra",
            "150",
            "--dec",
            "20",
            "--mode",
            "ccd",
            "--window",
            "1,1,100,100",
            "--window",
            "201,201,50,50",
            "--compact",
            "-o",
            &format!("{}", output.display()),
        ])
        .ok();
    let ok = cmd.is_ok();
    let (_, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stderr}");

    let json = std::fs::read_to_string(&output).unwrap();
    assert_eq!(shape_names(&json), ["window", "window_1", "window_2"]);
}

#[test]
fn test_footprint_arg_file_and_save_toml() {
    let tmp_dir = TempDir::new().unwrap();
    let (arg_file, mut f) = make_file_in_dir("args.toml", tmp_dir.path());
    f.write_all(
        indoc! {r#"
            [footprint]
            ra = "12h30m00s"
            dec = "-45d00m00s"
            pa = "0.25rad"
            injector_side = "left"
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);
    let output = tmp_dir.path().join("footprint.json");
    let saved = tmp_dir.path().join("saved.toml");

    let cmd = hfinder()
        .args([
            "footprint",
            &format!("{}", arg_file.display()),
            "--dec",
            "-40",
            "-o",
            &format!("{}", output.display()),
            "--save-toml",
            &format!("{}", saved.display()),
        ])
        .ok();
    let ok = cmd.is_ok();
    let (_, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stderr}");

    let json: Value = serde_json::from_reader(std::fs::File::open(&output).unwrap()).unwrap();
    assert_abs_diff_eq!(json["pointing"]["centre"]["ra"].as_f64().unwrap(), 187.5, epsilon = 1e-9);
    // The CLI Dec beats the file's.
    assert_abs_diff_eq!(json["pointing"]["centre"]["dec"].as_f64().unwrap(), -40.0, epsilon = 1e-9);

    let saved = std::fs::read_to_string(saved).unwrap();
    assert!(saved.contains("injector_side = \"left\""), "{saved}");
    assert!(saved.contains("dec = \"-40\""), "{saved}");
}

#[test]
fn test_footprint_dry_run() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("footprint.json");
    let cmd = hfinder()
        .args([
            "footprint",
            "--ra",
            "150",
            "--dec",
            "-30",
            "-o",
            &format!("{}", output.display()),
            "--dry-run",
        ])
        .ok();
    let ok = cmd.is_ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stderr}");
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!output.exists());
}

#[test]
fn test_footprint_errors() {
    let cmd = hfinder().args(["footprint", "--ra", "150"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("--ra and --dec"), "{stderr}");

    let cmd = hfinder()
        .args(["footprint", "--ra", "150", "--dec", "-95"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("out of range"), "{stderr}");

    let cmd = hfinder()
        .args(["footprint", "--ra", "150", "--dec", "-30", "--window", "2000,1,100,100"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("doesn't fit"), "{stderr}");

    let tmp_dir = TempDir::new().unwrap();
    let (table, mut f) = make_file_in_dir("table.txt", tmp_dir.path());
    f.write_all(b"10 20\n30 forty\n").unwrap();
    drop(f);
    let cmd = hfinder()
        .args([
            "footprint",
            "--ra",
            "150",
            "--dec",
            "-30",
            "--free-region-table",
            &format!("{}", table.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("free-region table"), "{stderr}");
}

#[test]
fn test_footprint_with_wcs_file() {
    let tmp_dir = TempDir::new().unwrap();
    let (wcs_file, mut f) = make_file_in_dir("chart.json", tmp_dir.path());
    f.write_all(
        br#"{"crval": [150.0, -30.0], "crpix": [1000.0, 1000.0], "cd": [[-5e-5, 0.0], [0.0, 5e-5]], "naxis": [2000, 2000]}"#,
    )
    .unwrap();
    drop(f);

    let cmd = hfinder()
        .args([
            "footprint",
            "--ra",
            "150",
            "--dec",
            "-30",
            "--wcs",
            &format!("{}", wcs_file.display()),
        ])
        .ok();
    let ok = cmd.is_ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stderr}");
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["wcs"]["naxis"][0], 2000);

    // A pointing off the chart is an error.
    let cmd = hfinder()
        .args([
            "footprint",
            "--ra",
            "160",
            "--dec",
            "-30",
            "--wcs",
            &format!("{}", wcs_file.display()),
        ])
        .ok();
    assert!(cmd.is_err());
}
