//! Reference placements and the cross-variant comparisons they are derived from.

use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_4;
use std::path::PathBuf;

use xr_panels_layout::{
    arc_layout, compare, equivalent_right_angle_degrees, normalize_rotation, octagon_layout,
    right_angle_layout, right_angle_tangent_layout, LayoutParameters, LayoutVariant,
    OctagonGeometry, PanelPlacement, PanelSlot, PanelSlots,
};
use xr_panels_testkit::assert_json_snapshot;

fn reference_params() -> LayoutParameters {
    LayoutParameters::default()
        .with_angle(45.0)
        .with_distances(0.3182, 0.7682)
}

fn snapshot_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name)
}

#[test]
fn arc_at_45_degrees_matches_worked_example() {
    let slots = arc_layout(&reference_params()).map(|p| p.rounded(4));
    assert_eq!(
        slots.into_array(),
        [
            PanelPlacement::new(-0.5432, -0.5432, -0.7854),
            PanelPlacement::new(0.0, -0.3182, 0.0),
            PanelPlacement::new(0.5432, -0.5432, 0.7854),
        ]
    );
}

#[test]
fn left_x_moves_with_sin_of_angle() {
    let params = reference_params();
    let left_x: Vec<f64> = [30.0, 45.0, 60.0]
        .into_iter()
        .map(|angle| arc_layout(&params.with_angle(angle)).left.x)
        .collect();

    assert!((left_x[0] - left_x[1]).abs() > 1e-4);
    assert!((left_x[1] - left_x[2]).abs() > 1e-4);
    // Left panels swing further out as the angle grows.
    assert!(left_x[0] > left_x[1] && left_x[1] > left_x[2]);
}

#[test]
fn arc_reproduces_octagon_center_and_side_radius() {
    let octagon = octagon_layout(&LayoutParameters::default());
    let arc = arc_layout(&reference_params());
    let comparison = compare(&arc, &octagon);

    assert!(comparison.slots[PanelSlot::Center].within(1e-4));
    for side in [PanelSlot::Left, PanelSlot::Right] {
        assert!((arc[side].distance() - octagon[side].distance()).abs() < 1e-4);
        assert!(
            (normalize_rotation(arc[side].rotation_y).abs()
                - normalize_rotation(octagon[side].rotation_y).abs())
            .abs()
                < 1e-4
        );
    }
}

#[test]
fn arc_side_bearing_differs_from_octagon() {
    // The octagon puts its side midpoints level with the viewer (bearing 90°)
    // facing inward at 45°; the arc puts them at bearing 45°.
    let octagon = octagon_layout(&LayoutParameters::default());
    let arc = arc_layout(&reference_params());
    let comparison = compare(&arc, &octagon);

    assert_eq!(
        comparison.mismatched(1e-4),
        vec![PanelSlot::Left, PanelSlot::Right]
    );
    assert!(octagon.left.z.abs() < 1e-9);
    assert!((octagon.left.rotation_y - FRAC_PI_4).abs() < 1e-9);
    assert!((arc.left.rotation_y + FRAC_PI_4).abs() < 1e-12);
}

#[test]
fn tangent_right_angle_matches_octagon_positions_only_with_reduced_width() {
    let octagon = octagon_layout(&LayoutParameters::default());
    let angle = equivalent_right_angle_degrees(0.3182, 0.7682);
    assert!((angle - 67.5).abs() < 1e-3);

    let reduced = LayoutParameters::default()
        .with_panel(0.6682, 0.1)
        .with_angle(67.5);
    let tangent = right_angle_tangent_layout(&reduced);
    let comparison = compare(&tangent, &octagon);
    for delta in comparison.slots.into_array() {
        assert!(delta.position_delta < 1e-3, "{delta:?}");
    }
    // Side yaw is the swing angle (67.5°), not the octagon's 45°.
    assert!(comparison.slots[PanelSlot::Left].rotation_delta > 0.3);

    let default_width = LayoutParameters::default().with_angle(67.5);
    let tangent = right_angle_tangent_layout(&default_width);
    assert!(compare(&tangent, &octagon).max_position_delta() > 0.1);
}

#[test]
fn hinged_right_angle_does_not_coincide_with_octagon_at_67_5() {
    let octagon = octagon_layout(&LayoutParameters::default());
    let hinged = right_angle_layout(&LayoutParameters::default().with_angle(67.5));
    assert!(!compare(&hinged, &octagon).matches(1e-2));
}

#[test]
fn octagon_geometry_is_regular() {
    for width in [0.3, 0.8, 1.6] {
        let octagon = OctagonGeometry::for_panel_width(width);
        let vertices = octagon.vertices();
        for i in 0..8 {
            let r = vertices[i].length();
            assert!((r - octagon.circumradius()).abs() < 1e-12 * octagon.circumradius().max(1.0));
            let edge = vertices[i].distance(vertices[(i + 1) % 8]);
            assert!((edge - (width + 0.10)).abs() < 1e-12);
        }
    }
}

#[test]
fn default_layouts_snapshot() {
    let params = LayoutParameters::default();
    let layouts: BTreeMap<&str, PanelSlots<PanelPlacement>> = LayoutVariant::ALL
        .into_iter()
        .map(|variant| (variant.name(), variant.solve(&params).map(|p| p.rounded(4))))
        .collect();
    assert_json_snapshot(snapshot_path("default_layouts.json"), &layouts)
        .expect("default layouts snapshot");
}
