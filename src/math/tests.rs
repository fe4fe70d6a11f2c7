// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

fn some_points() -> Vec<PixelPoint> {
    vec![
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(10.0, 0.0),
        PixelPoint::new(12.5, 7.25),
        PixelPoint::new(-3.0, 4.0),
        PixelPoint::new(100.0, -250.0),
    ]
}

#[test]
fn test_linspace() {
    let l = linspace(-80.0, 80.0, 40);
    assert_eq!(l.len(), 40);
    assert_abs_diff_eq!(l[0], -80.0);
    assert_abs_diff_eq!(l[39], 80.0, epsilon = 1e-12);
    assert_abs_diff_eq!(l[1] - l[0], 160.0 / 39.0, epsilon = 1e-12);
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(3.0, 1.0, 1), vec![3.0]);
}

#[test]
fn test_zero_rotation_is_identity() {
    let points = some_points();
    for pivot in [
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(512.0, 512.0),
        PixelPoint::new(-7.0, 3.5),
    ] {
        let rotated = rotate(&points, Angle::ZERO, pivot);
        for (a, b) in points.iter().zip(rotated.iter()) {
            assert_abs_diff_eq!(a.x, b.x);
            assert_abs_diff_eq!(a.y, b.y);
        }
    }
}

#[test]
fn test_rotation_preserves_distances() {
    let points = some_points();
    let pivot = PixelPoint::new(256.0, -12.0);
    for angle in [1.0, 33.3, 90.0, 180.0, 271.0, -45.0, 1000.0] {
        let rotated = rotate(&points, Angle::from_degrees(angle), pivot);
        for i in 0..points.len() {
            for j in i + 1..points.len() {
                assert_abs_diff_eq!(
                    points[i].distance(&points[j]),
                    rotated[i].distance(&rotated[j]),
                    epsilon = 1e-9
                );
            }
            // And the distance to the pivot.
            assert_abs_diff_eq!(
                points[i].distance(&pivot),
                rotated[i].distance(&pivot),
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_rotation_is_counter_clockwise() {
    let p = rotate_point(
        PixelPoint::new(1.0, 0.0),
        Angle::from_degrees(90.0),
        PixelPoint::new(0.0, 0.0),
    );
    assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);

    let p = rotate_point(
        PixelPoint::new(11.0, 5.0),
        Angle::from_radians(std::f64::consts::PI),
        PixelPoint::new(10.0, 5.0),
    );
    assert_abs_diff_eq!(p.x, 9.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-12);
}

#[test]
fn test_smooth_passes_through_control_points() {
    let points = some_points();

    // Closed: 5 segments, 4 samples each.
    let smooth = bezier_smooth(&points, 20, true);
    assert_eq!(smooth.len(), 20);
    for (i, p) in points.iter().enumerate() {
        assert_abs_diff_eq!(smooth[4 * i].x, p.x, epsilon = 1e-9);
        assert_abs_diff_eq!(smooth[4 * i].y, p.y, epsilon = 1e-9);
    }

    // Open: 4 segments; the ends are pinned.
    let smooth = bezier_smooth(&points, 17, false);
    assert_eq!(smooth.len(), 17);
    assert_abs_diff_eq!(smooth[0].x, points[0].x);
    assert_abs_diff_eq!(smooth[0].y, points[0].y);
    assert_abs_diff_eq!(smooth[16].x, points[4].x, epsilon = 1e-9);
    assert_abs_diff_eq!(smooth[16].y, points[4].y, epsilon = 1e-9);
    for (i, p) in points.iter().enumerate() {
        assert_abs_diff_eq!(smooth[4 * i].x, p.x, epsilon = 1e-9);
        assert_abs_diff_eq!(smooth[4 * i].y, p.y, epsilon = 1e-9);
    }
}

#[test]
fn test_smooth_circle_stays_on_circle() {
    // 40 points on a circle of radius 100 pixels; the densified curve should
    // deviate from the true circle by much less than a pixel.
    let r = 100.0;
    let points: Vec<PixelPoint> = linspace(0.0, 360.0, 41)
        .into_iter()
        .take(40)
        .map(|theta: f64| {
            let (s, c) = theta.to_radians().sin_cos();
            PixelPoint::new(r * c, r * s)
        })
        .collect();
    let smooth = bezier_smooth(&points, 160, true);
    let origin = PixelPoint::new(0.0, 0.0);
    for p in smooth {
        assert!((p.distance(&origin) - r).abs() < 0.05, "{p}");
    }
}

#[test]
fn test_smooth_degenerate_inputs() {
    let two = vec![PixelPoint::new(0.0, 0.0), PixelPoint::new(1.0, 1.0)];
    assert_eq!(bezier_smooth(&two, 100, false), two);

    let points = some_points();
    assert_eq!(bezier_smooth(&points, 3, true), points);
}
