//! Property-based tests for layout invariants
//!
//! For every variant and any sane parameters:
//! - Left and right placements mirror each other across `x = 0`
//! - The center panel sits on the forward axis, facing the viewer
//! - Output is a pure function of the input

use proptest::prelude::*;
use xr_panels_layout::{
    normalize_rotation, LayoutContainer, LayoutParameters, LayoutVariant, OctagonGeometry,
    PanelSlot,
};

fn variant() -> impl Strategy<Value = LayoutVariant> {
    prop_oneof![
        Just(LayoutVariant::Arc),
        Just(LayoutVariant::RightAngle),
        Just(LayoutVariant::Octagon),
    ]
}

fn params() -> impl Strategy<Value = LayoutParameters> {
    (
        0.05f64..5.0,
        0.0f64..1.0,
        0.05f64..10.0,
        0.05f64..10.0,
        -720.0f64..720.0,
    )
        .prop_map(|(panel_width, gap, center, side, angle)| {
            LayoutParameters::default()
                .with_panel(panel_width, gap)
                .with_distances(center, side)
                .with_angle(angle)
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    /// Property: side panels are mirror images of each other
    #[test]
    fn sides_mirror_across_forward_axis(variant in variant(), params in params()) {
        let slots = variant.solve(&params);
        prop_assert!(close(slots.left.x, -slots.right.x), "{:?}", slots);
        prop_assert!(close(slots.left.z, slots.right.z), "{:?}", slots);
        prop_assert!(
            close(
                normalize_rotation(slots.left.rotation_y),
                normalize_rotation(-slots.right.rotation_y)
            ) || close(slots.left.rotation_y.abs(), std::f64::consts::PI),
            "{:?}",
            slots
        );
    }

    /// Property: the center panel is straight ahead and unrotated
    #[test]
    fn center_panel_faces_viewer(variant in variant(), params in params()) {
        let center = variant.solve(&params).center;
        prop_assert_eq!(center.x, 0.0);
        prop_assert!(center.rotation_y.abs() < 1e-9);

        let expected = match variant {
            LayoutVariant::Octagon => {
                OctagonGeometry::for_panel_width(params.panel_width).center_distance()
            }
            _ => params.center_distance,
        };
        prop_assert!(close(center.z, -expected));
    }

    /// Property: the angle is only meaningful modulo a full turn
    #[test]
    fn angle_is_periodic(variant in variant(), params in params(), turns in -3i32..3) {
        let shifted = params.with_angle(params.angle_degrees + 360.0 * f64::from(turns));
        let a = variant.solve(&params);
        let b = variant.solve(&shifted);
        for slot in PanelSlot::ALL {
            prop_assert!((a[slot].x - b[slot].x).abs() < 1e-6);
            prop_assert!((a[slot].z - b[slot].z).abs() < 1e-6);
        }
    }

    /// Property: the container never exposes more than three groups
    #[test]
    fn container_binds_at_most_three(count in 0usize..8, variant in variant()) {
        let container = LayoutContainer::with_children(
            variant,
            LayoutParameters::default(),
            0..count,
        );
        let groups: Vec<_> = container.groups().collect();
        prop_assert_eq!(groups.len(), count.min(3));
        for (index, group) in groups.iter().enumerate() {
            prop_assert_eq!(*group.content, index);
            prop_assert_eq!(group.slot.index(), index);
        }
    }
}
