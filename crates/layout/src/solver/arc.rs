use super::center_placement;
use crate::params::LayoutParameters;
use crate::placement::{PanelPlacement, PanelSlots};

/// Side panels on a circle of radius `side_distance` at `±angle` from the
/// forward axis; center panel straight ahead at `center_distance`.
pub fn arc_layout(params: &LayoutParameters) -> PanelSlots<PanelPlacement> {
    let angle = params.angle_radians();
    let x = params.side_distance * angle.sin();
    let z = -params.side_distance * angle.cos();

    let right = PanelPlacement::new(x, z, angle);
    PanelSlots::new(right.mirrored(), center_placement(params), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PanelSlot;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 5e-5
    }

    #[test]
    fn reference_arc_at_45_degrees() {
        let params = LayoutParameters::default().with_distances(0.3182, 0.7682);
        let slots = arc_layout(&params.with_angle(45.0));

        let left = slots[PanelSlot::Left];
        assert!(close(left.x, -0.5432));
        assert!(close(left.z, -0.5432));
        assert!(close(left.rotation_y, -0.7854));

        assert_eq!(slots.center, PanelPlacement::new(0.0, -0.3182, 0.0));

        let right = slots[PanelSlot::Right];
        assert!(close(right.x, 0.5432));
        assert!(close(right.z, -0.5432));
        assert!(close(right.rotation_y, 0.7854));
    }

    #[test]
    fn side_panels_stay_on_the_side_circle() {
        let params = LayoutParameters::default();
        for angle in [-120.0, -30.0, 0.0, 15.0, 60.0, 170.0] {
            let slots = arc_layout(&params.with_angle(angle));
            assert!((slots.left.distance() - params.side_distance).abs() < 1e-12);
            assert!((slots.right.distance() - params.side_distance).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_angle_stacks_sides_behind_center() {
        let slots = arc_layout(&LayoutParameters::default().with_angle(0.0));
        assert_eq!(slots.left.x, 0.0);
        assert_eq!(slots.right.x, 0.0);
        assert_eq!(slots.right.z, -0.7682);
    }
}
