//! Numerical comparison between layout variants.
//!
//! Used to check how closely the closed-form arc and right-angle layouts
//! reproduce the octagon-derived placements, and to report where they do not.

use crate::params::LayoutParameters;
use crate::placement::{PanelPlacement, PanelSlot, PanelSlots};
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Wrap a rotation into `[-π, π]`. An exact half turn comes back as `-π`.
/// Non-finite input is returned unchanged.
pub fn normalize_rotation(rotation: f64) -> f64 {
    if !rotation.is_finite() {
        return rotation;
    }
    (rotation + PI).rem_euclid(TAU) - PI
}

/// Right-angle layout in its tangent form: side panels keep a fixed
/// `x = ∓horizontal_distance` and move in depth by
/// `horizontal_distance · tan(90° - angle)`.
///
/// At `angle = 0` the tangent has a pole and the side depth is infinite or
/// enormous; it is propagated, not clamped.
pub fn right_angle_tangent_layout(params: &LayoutParameters) -> PanelSlots<PanelPlacement> {
    let angle = params.angle_radians();
    let horizontal = params.horizontal_distance();
    let z = -params.center_distance + horizontal * (FRAC_PI_2 - angle).tan();

    let left = PanelPlacement::new(-horizontal, z, angle);
    PanelSlots::new(
        left,
        PanelPlacement::new(0.0, -params.center_distance, 0.0),
        left.mirrored(),
    )
}

/// Angle (degrees) at which the tangent-form right-angle layout brings its
/// side panels level with the viewer (`z = 0`):
/// `center_distance = horizontal_distance · tan(90° - angle)`.
pub fn equivalent_right_angle_degrees(center_distance: f64, horizontal_distance: f64) -> f64 {
    90.0 - (center_distance / horizontal_distance).atan().to_degrees()
}

/// Difference between two placements of the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotDelta {
    /// Which slot.
    pub slot: PanelSlot,
    /// Euclidean distance between the two positions.
    pub position_delta: f64,
    /// Shortest angular distance between the two rotations, in `[0, π]`.
    pub rotation_delta: f64,
}

impl SlotDelta {
    /// Whether both deltas are within `tolerance`.
    pub fn within(&self, tolerance: f64) -> bool {
        self.position_delta <= tolerance && self.rotation_delta <= tolerance
    }
}

/// Per-slot differences between two layouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutComparison {
    /// Deltas in slot order.
    pub slots: PanelSlots<SlotDelta>,
}

impl LayoutComparison {
    /// Whether every slot is within `tolerance`.
    pub fn matches(&self, tolerance: f64) -> bool {
        self.slots.iter().all(|(_, delta)| delta.within(tolerance))
    }

    /// Slots that differ by more than `tolerance`.
    pub fn mismatched(&self, tolerance: f64) -> Vec<PanelSlot> {
        self.slots
            .iter()
            .filter(|(_, delta)| !delta.within(tolerance))
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Largest position delta across all slots.
    pub fn max_position_delta(&self) -> f64 {
        self.slots
            .iter()
            .map(|(_, delta)| delta.position_delta)
            .fold(0.0, f64::max)
    }
}

/// Compare two layouts slot by slot.
pub fn compare(
    a: &PanelSlots<PanelPlacement>,
    b: &PanelSlots<PanelPlacement>,
) -> LayoutComparison {
    let slots = PanelSlots::from_fn(|slot| {
        let (pa, pb) = (a[slot], b[slot]);
        SlotDelta {
            slot,
            position_delta: (pa.x - pb.x).hypot(pa.z - pb.z),
            rotation_delta: normalize_rotation(pa.rotation_y - pb.rotation_y).abs(),
        }
    });
    tracing::trace!(?slots, "compared layouts");
    LayoutComparison { slots }
}
