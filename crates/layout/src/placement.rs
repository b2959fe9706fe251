//! Panel placements and the fixed three-slot container they live in.

use glam::{DAffine3, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Pose of one panel on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelPlacement {
    /// Lateral offset (positive to the viewer's right).
    pub x: f64,
    /// Depth offset (negative is in front of the viewer).
    pub z: f64,
    /// Yaw about +Y in radians.
    pub rotation_y: f64,
}

impl PanelPlacement {
    /// Create a placement.
    pub const fn new(x: f64, z: f64, rotation_y: f64) -> Self {
        Self { x, z, rotation_y }
    }

    /// Mirror across the `x = 0` plane.
    pub fn mirrored(self) -> Self {
        Self::new(-self.x, self.z, -self.rotation_y)
    }

    /// Translation `(x, 0, z)`.
    pub fn translation(&self) -> DVec3 {
        DVec3::new(self.x, 0.0, self.z)
    }

    /// Yaw as a quaternion.
    pub fn rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.rotation_y)
    }

    /// Parent transform: rotate about +Y, then translate.
    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(self.rotation(), self.translation())
    }

    /// Distance from the viewer on the ground plane.
    pub fn distance(&self) -> f64 {
        self.x.hypot(self.z)
    }

    /// Copy rounded to `decimals` places, with negative zero folded to zero.
    pub fn rounded(&self, decimals: i32) -> Self {
        let scale = 10f64.powi(decimals);
        let round = |v: f64| (v * scale).round() / scale + 0.0;
        Self::new(round(self.x), round(self.z), round(self.rotation_y))
    }
}

/// One of the three panel positions in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSlot {
    /// Viewer's left.
    Left,
    /// Straight ahead.
    Center,
    /// Viewer's right.
    Right,
}

impl PanelSlot {
    /// All slots in source order.
    pub const ALL: [PanelSlot; 3] = [PanelSlot::Left, PanelSlot::Center, PanelSlot::Right];

    /// Ordinal index (0..3).
    pub const fn index(self) -> usize {
        match self {
            PanelSlot::Left => 0,
            PanelSlot::Center => 1,
            PanelSlot::Right => 2,
        }
    }

    /// Slot for an ordinal index, if in range.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PanelSlot::Left),
            1 => Some(PanelSlot::Center),
            2 => Some(PanelSlot::Right),
            _ => None,
        }
    }

    /// Label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            PanelSlot::Left => "left",
            PanelSlot::Center => "center",
            PanelSlot::Right => "right",
        }
    }
}

/// Exactly one value per [`PanelSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelSlots<T> {
    /// Left slot.
    pub left: T,
    /// Center slot.
    pub center: T,
    /// Right slot.
    pub right: T,
}

impl<T> PanelSlots<T> {
    /// Build from explicit values.
    pub const fn new(left: T, center: T, right: T) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    /// Build by evaluating `f` for every slot.
    pub fn from_fn(mut f: impl FnMut(PanelSlot) -> T) -> Self {
        Self::new(
            f(PanelSlot::Left),
            f(PanelSlot::Center),
            f(PanelSlot::Right),
        )
    }

    /// Apply `f` to every value.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PanelSlots<U> {
        PanelSlots::new(f(self.left), f(self.center), f(self.right))
    }

    /// Borrow every value.
    pub fn as_ref(&self) -> PanelSlots<&T> {
        PanelSlots::new(&self.left, &self.center, &self.right)
    }

    /// Iterate `(slot, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelSlot, &T)> {
        PanelSlot::ALL.into_iter().map(move |slot| (slot, &self[slot]))
    }

    /// Values in source order.
    pub fn into_array(self) -> [T; 3] {
        [self.left, self.center, self.right]
    }
}

impl<T> Index<PanelSlot> for PanelSlots<T> {
    type Output = T;

    fn index(&self, slot: PanelSlot) -> &T {
        match slot {
            PanelSlot::Left => &self.left,
            PanelSlot::Center => &self.center,
            PanelSlot::Right => &self.right,
        }
    }
}

impl<T> IndexMut<PanelSlot> for PanelSlots<T> {
    fn index_mut(&mut self, slot: PanelSlot) -> &mut T {
        match slot {
            PanelSlot::Left => &mut self.left,
            PanelSlot::Center => &mut self.center,
            PanelSlot::Right => &mut self.right,
        }
    }
}

impl<T> PanelSlots<Option<T>> {
    /// Bind items to slots in source order; anything past the third is
    /// returned as the overflow count.
    pub fn assign<I: IntoIterator<Item = T>>(items: I) -> (Self, usize) {
        let mut slots = PanelSlots::new(None, None, None);
        let mut overflow = 0;
        for (index, item) in items.into_iter().enumerate() {
            match PanelSlot::from_index(index) {
                Some(slot) => slots[slot] = Some(item),
                None => overflow += 1,
            }
        }
        (slots, overflow)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        PanelSlot::ALL
            .iter()
            .filter(|slot| self[**slot].is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn slot_indices_round_trip() {
        for slot in PanelSlot::ALL {
            assert_eq!(PanelSlot::from_index(slot.index()), Some(slot));
        }
        assert_eq!(PanelSlot::from_index(3), None);
    }

    #[test]
    fn assign_truncates_after_three_items() {
        let (slots, overflow) = PanelSlots::assign(["a", "b", "c", "d", "e"]);
        assert_eq!(slots.left, Some("a"));
        assert_eq!(slots.center, Some("b"));
        assert_eq!(slots.right, Some("c"));
        assert_eq!(overflow, 2);
        assert_eq!(slots.occupied(), 3);
    }

    #[test]
    fn assign_leaves_missing_slots_empty() {
        let (slots, overflow) = PanelSlots::assign(vec![7]);
        assert_eq!(slots.left, Some(7));
        assert_eq!(slots.center, None);
        assert_eq!(slots.right, None);
        assert_eq!(overflow, 0);
        assert_eq!(slots.occupied(), 1);
    }

    #[test]
    fn affine_rotates_then_translates() {
        let placement = PanelPlacement::new(1.0, -2.0, FRAC_PI_2);
        let affine = placement.to_affine();
        // Panel-local +X maps to world -Z after a quarter turn about +Y.
        let p = affine.transform_point3(DVec3::X);
        assert!((p - DVec3::new(1.0, 0.0, -3.0)).length() < 1e-12);
    }

    #[test]
    fn rounding_folds_negative_zero() {
        let rounded = PanelPlacement::new(-1e-9, 0.123456, -0.00001).rounded(4);
        assert!(rounded.x.is_sign_positive());
        assert_eq!(rounded.x, 0.0);
        assert_eq!(rounded.z, 0.1235);
        assert!(rounded.rotation_y.is_sign_positive());
    }

    #[test]
    fn mirrored_flips_x_and_yaw() {
        let placement = PanelPlacement::new(0.5, -0.25, 0.3);
        assert_eq!(placement.mirrored(), PanelPlacement::new(-0.5, -0.25, -0.3));
    }
}
