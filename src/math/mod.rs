// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics: rigid rotations and curve smoothing in pixel
//! space.

#[cfg(test)]
mod tests;

use crate::coord::{Angle, PixelPoint};

/// `n` evenly spaced numbers from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Rotate `points` about `pivot` by `angle`. A positive angle is
/// counter-clockwise with x increasing to the right and y increasing upwards
/// (the FITS pixel convention). This is an isometry.
pub fn rotate(points: &[PixelPoint], angle: Angle, pivot: PixelPoint) -> Vec<PixelPoint> {
    let (s, c) = angle.sin_cos();
    points
        .iter()
        .map(|p| {
            let dx = p.x - pivot.x;
            let dy = p.y - pivot.y;
            PixelPoint {
                x: pivot.x + c * dx - s * dy,
                y: pivot.y + s * dx + c * dy,
            }
        })
        .collect()
}

/// Rotate a single point; see [`rotate`].
pub fn rotate_point(point: PixelPoint, angle: Angle, pivot: PixelPoint) -> PixelPoint {
    rotate(&[point], angle, pivot)[0]
}

/// Densify a polygon or path into `out_count` points along a smooth curve that
/// passes through every control point.
///
/// The curve is a uniform Catmull-Rom spline written as cubic Bezier segments
/// (control points `P1 + (P2 - P0) / 6` and `P2 - (P3 - P1) / 6`). Closed
/// curves wrap around; open curves start and end on the first and last control
/// points. When `out_count` is a multiple of the segment count, every control
/// point appears in the output unchanged.
///
/// Fewer than 3 control points, or fewer output points than control points,
/// give back the control points.
pub fn bezier_smooth(points: &[PixelPoint], out_count: usize, closed: bool) -> Vec<PixelPoint> {
    let n = points.len();
    if n < 3 || out_count < n {
        return points.to_vec();
    }

    let num_segments = if closed { n } else { n - 1 };
    let get = |i: isize| -> PixelPoint {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else {
            points[i.clamp(0, n as isize - 1) as usize]
        }
    };

    // Closed curves don't repeat their first point.
    let denominator = if closed { out_count } else { out_count - 1 };
    (0..out_count)
        .map(|k| {
            let t_global = k as f64 * num_segments as f64 / denominator as f64;
            let segment = (t_global.floor() as usize).min(num_segments - 1);
            let t = t_global - segment as f64;

            let i = segment as isize;
            let (p0, p1, p2, p3) = (get(i - 1), get(i), get(i + 1), get(i + 2));
            let b1 = PixelPoint::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
            let b2 = PixelPoint::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
            cubic_bezier(p1, b1, b2, p2, t)
        })
        .collect()
}

fn cubic_bezier(p0: PixelPoint, p1: PixelPoint, p2: PixelPoint, p3: PixelPoint, t: f64) -> PixelPoint {
    let one_minus = 1.0 - t;
    let a = one_minus * one_minus * one_minus;
    let b = 3.0 * one_minus * one_minus * t;
    let c = 3.0 * one_minus * t * t;
    let d = t * t * t;
    PixelPoint {
        x: a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        y: a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    }
}
