// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use vec1::vec1;

use super::*;

fn square() -> Shape {
    Shape::Polygon {
        vertices: vec1![
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(2.0, 0.0),
            PixelPoint::new(2.0, 2.0),
            PixelPoint::new(0.0, 2.0)
        ],
    }
}

fn compound(name: ShapeName, x: f64) -> CompoundShape {
    CompoundShape::new(
        name,
        vec![Shape::Circle {
            centre: PixelPoint::new(x, 0.0),
            radius: 1.0,
        }],
    )
}

fn footprint(shapes: Vec<CompoundShape>) -> Footprint {
    shapes.into_iter().map(|c| (c.name.to_string(), c)).collect()
}

#[test]
fn test_shape_names() {
    assert_eq!(ShapeName::Window.to_string(), "window");
    assert_eq!(ShapeName::ExtraWindow(3).to_string(), "window_3");
    assert_eq!(ShapeName::PatrolArc.to_string(), "patrol_arc");
    assert_eq!(ShapeName::CompoFreeRegion.to_string(), "compo_free_region");
    assert_eq!(ShapeName::Injector.to_string(), "injector");
    assert_eq!(ShapeName::Pickoff.to_string(), "pickoff");
}

#[test]
fn test_rotate_circle_keeps_radius() {
    let c = Shape::Circle {
        centre: PixelPoint::new(1.0, 0.0),
        radius: 3.5,
    };
    match c.rotated(Angle::from_degrees(90.0), PixelPoint::new(0.0, 0.0)) {
        Shape::Circle { centre, radius } => {
            assert_abs_diff_eq!(centre.x, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(centre.y, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(radius, 3.5);
        }
        s => panic!("expected a circle, got {s:?}"),
    }
}

#[test]
fn test_rotate_polygon() {
    let rotated = square().rotated(Angle::from_degrees(180.0), PixelPoint::new(1.0, 1.0));
    let expected = [(2.0, 2.0), (0.0, 2.0), (0.0, 0.0), (2.0, 0.0)];
    assert_eq!(rotated.vertices().len(), 4);
    for (p, (x, y)) in rotated.vertices().iter().zip(expected) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-12);
    }
}

#[test]
fn test_smoothed_counts() {
    assert_eq!(square().smoothed(4).vertices().len(), 16);
    let path = Shape::Path {
        vertices: vec1![
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(1.0, 1.0),
            PixelPoint::new(2.0, 0.0)
        ],
    };
    assert_eq!(path.smoothed(4).vertices().len(), 12);
    let circle = Shape::Circle {
        centre: PixelPoint::new(0.0, 0.0),
        radius: 1.0,
    };
    assert_eq!(circle.smoothed(4), circle);
}

#[test]
fn test_bounding_box() {
    let (min, max) = square().bounding_box();
    assert_eq!(min, PixelPoint::new(0.0, 0.0));
    assert_eq!(max, PixelPoint::new(2.0, 2.0));

    let (min, max) = Shape::Circle {
        centre: PixelPoint::new(10.0, -5.0),
        radius: 2.0,
    }
    .bounding_box();
    assert_eq!(min, PixelPoint::new(8.0, -7.0));
    assert_eq!(max, PixelPoint::new(12.0, -3.0));
}

#[test]
fn test_shape_json() {
    let json = serde_json::to_value(compound(ShapeName::ExtraWindow(2), 1.0)).unwrap();
    assert_eq!(json["name"], "window_2");
    assert_eq!(json["shapes"][0]["kind"], "circle");
    assert_eq!(json["shapes"][0]["radius"], 1.0);

    let json = serde_json::to_value(square()).unwrap();
    assert_eq!(json["kind"], "polygon");
    assert_eq!(json["vertices"].as_array().unwrap().len(), 4);
}

#[test]
fn test_overlay_replace() {
    let overlay = Overlay::new();
    assert!(overlay.snapshot().is_empty());

    overlay.replace(footprint(vec![
        compound(ShapeName::Window, 0.0),
        compound(ShapeName::PatrolArc, 0.0),
    ]));
    let before = overlay.snapshot();
    assert_eq!(before.len(), 2);

    overlay.replace(footprint(vec![
        compound(ShapeName::PatrolArc, 5.0),
        compound(ShapeName::Pickoff, 5.0),
    ]));
    let after = overlay.snapshot();
    let names: Vec<&str> = after.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, ["window", "patrol_arc", "pickoff"]);
    assert_eq!(after["patrol_arc"], compound(ShapeName::PatrolArc, 5.0));

    // Old snapshots are unaffected.
    assert_eq!(before["patrol_arc"], compound(ShapeName::PatrolArc, 0.0));
    assert!(!before.contains_key("pickoff"));

    overlay.clear();
    assert!(overlay.snapshot().is_empty());
}

#[test]
fn test_overlay_replace_all_drops_stale_names() {
    let overlay = Overlay::new();
    overlay.replace(footprint(vec![
        compound(ShapeName::Window, 0.0),
        compound(ShapeName::ExtraWindow(2), 0.0),
        compound(ShapeName::Pickoff, 0.0),
    ]));

    // A CCD-only redraw with no extra windows.
    let redraw = footprint(vec![compound(ShapeName::Window, 1.0)]);
    overlay.replace(redraw.clone());
    assert_eq!(overlay.snapshot().len(), 3);

    overlay.replace_all(redraw);
    let shapes = overlay.snapshot();
    let names: Vec<&str> = shapes.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, ["window"]);
    assert_eq!(shapes["window"], compound(ShapeName::Window, 1.0));
}

#[test]
fn test_overlay_concurrent_readers_see_whole_footprints() {
    let overlay = Arc::new(Overlay::new());
    let names = [ShapeName::Window, ShapeName::PatrolArc, ShapeName::Injector];

    std::thread::scope(|s| {
        let writer = Arc::clone(&overlay);
        s.spawn(move || {
            for i in 0..200 {
                writer.replace(footprint(
                    names.iter().map(|n| compound(*n, i as f64)).collect(),
                ));
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&overlay);
            s.spawn(move || {
                for _ in 0..200 {
                    let snapshot = reader.snapshot();
                    // All shapes in a snapshot come from the same replace.
                    let xs: Vec<f64> = snapshot
                        .values()
                        .map(|c| match c.shapes[0] {
                            Shape::Circle { centre, .. } => centre.x,
                            _ => unreachable!(),
                        })
                        .collect();
                    assert!(xs.windows(2).all(|w| w[0] == w[1]), "{xs:?}");
                }
            });
        }
    });
}
