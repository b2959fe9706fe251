//! 3D UI Components
//!
//! Panels and billboards that live in world space, plus the transform type
//! layouts hand them.

pub mod billboard;
pub mod panel;

pub use billboard::{damp, Billboard};
pub use panel::{Panel3D, PanelVertex};

use glam::{Mat4, Quat, Vec3};
use xr_panels_layout::PanelPlacement;

/// Transform in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Parent transform for a panel slot: translate `(x, 0, z)`, yaw about +Y.
    pub fn from_placement(placement: &PanelPlacement) -> Self {
        Self {
            position: Vec3::new(placement.x as f32, 0.0, placement.z as f32),
            rotation: Quat::from_rotation_y(placement.rotation_y as f32),
            scale: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: shift the position.
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.position += offset;
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn placement_becomes_yaw_and_ground_translation() {
        let transform = Transform3D::from_placement(&PanelPlacement::new(0.5, -1.0, FRAC_PI_2));
        assert_eq!(transform.position, Vec3::new(0.5, 0.0, -1.0));
        let local_forward = transform.rotation * Vec3::Z;
        assert!((local_forward - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn transform_point_matches_matrix() {
        let transform = Transform3D::new(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quat::from_rotation_y(0.3))
            .with_scale(Vec3::splat(2.0));
        let p = Vec3::new(0.25, -0.5, 1.0);
        let via_matrix = transform.to_matrix().transform_point3(p);
        assert!((transform.transform_point(p) - via_matrix).length() < 1e-5);
    }
}
