use super::center_placement;
use crate::params::LayoutParameters;
use crate::placement::{PanelPlacement, PanelSlots};

/// Side panels butted against the center panel at a chosen angle, as if
/// hinged along a shared vertical edge.
///
/// The side panels start one [`LayoutParameters::horizontal_distance`] away
/// from the center panel and are swung by `angle`; they are not placed on a
/// common circle.
pub fn right_angle_layout(params: &LayoutParameters) -> PanelSlots<PanelPlacement> {
    let angle = params.angle_radians();
    let horizontal = params.horizontal_distance();

    let swing = horizontal * angle.sin();
    let z = swing - params.panel_width / 2.0 - params.center_distance;

    let left = PanelPlacement::new(-swing, z, angle);
    PanelSlots::new(left, center_placement(params), left.mirrored())
}
