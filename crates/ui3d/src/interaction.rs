//! Panel picking - which panel does a pointer or gaze ray land on

use crate::components::{Panel3D, Transform3D};
use glam::{Mat4, Vec3};

/// A ray in world space with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Straight ahead (-Z) from `origin`.
    pub fn forward(origin: Vec3) -> Self {
        Self::new(origin, Vec3::NEG_Z)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a panel raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelHit {
    /// Position where ray hit the panel
    pub position: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
    /// UV coordinates on the panel quad (0-1 range, origin bottom-left)
    pub uv: (f32, f32),
}

/// Convert screen coordinates to a world-space ray (inline mode mouse input).
///
/// `projection_matrix` uses glam's `[0, 1]` depth range, so depth 0 is the
/// near plane.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (u32, u32),
    view_matrix: &Mat4,
    projection_matrix: &Mat4,
) -> Ray {
    // Normalized device coordinates (-1 to 1)
    let x = (2.0 * screen_pos.0) / screen_size.0 as f32 - 1.0;
    let y = 1.0 - (2.0 * screen_pos.1) / screen_size.1 as f32; // Flip Y

    // Point on the near plane in eye space; the eye sits at the origin.
    let ray_eye = projection_matrix
        .inverse()
        .project_point3(Vec3::new(x, y, 0.0));

    let inv_view = view_matrix.inverse();
    Ray::new(
        inv_view.transform_point3(Vec3::ZERO),
        inv_view.transform_vector3(ray_eye),
    )
}

/// Raycast against a panel placed under `parent`. Both faces are hittable;
/// hidden panels never are.
pub fn raycast_panel(ray: &Ray, panel: &Panel3D, parent: &Transform3D) -> Option<PanelHit> {
    if !panel.visible {
        return None;
    }

    let to_world = parent.to_matrix() * panel.transform.to_matrix();
    let to_local = to_world.inverse();
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(ray.direction);

    // Ray parallel to the panel plane
    if direction.z.abs() < 1e-6 {
        return None;
    }
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }

    let local_hit = origin + direction * t;
    let (u, v) = panel.local_to_uv(local_hit);
    if !panel.contains_uv(u, v) {
        return None;
    }

    let position = to_world.transform_point3(local_hit);
    Some(PanelHit {
        position,
        distance: position.distance(ray.origin),
        uv: (u, v),
    })
}

/// Nearest hit among `candidates`, returned with the caller's key.
pub fn pick_nearest<'a, K>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = (K, &'a Panel3D, Transform3D)>,
) -> Option<(K, PanelHit)> {
    candidates
        .into_iter()
        .filter_map(|(key, panel, parent)| {
            raycast_panel(ray, panel, &parent).map(|hit| (key, hit))
        })
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn hit_in_front_of_the_viewer() {
        let panel = Panel3D::new(Vec3::ZERO, 2.0, 1.0);
        let parent = Transform3D::new(Vec3::new(0.0, 0.0, -5.0));
        let hit = raycast_panel(&Ray::forward(Vec3::ZERO), &panel, &parent).expect("hit");
        assert!((hit.distance - 5.0).abs() < 1e-4);
        assert!((hit.uv.0 - 0.5).abs() < 1e-4);
        assert!((hit.uv.1 - 0.5).abs() < 1e-4);
    }

    #[test]
    fn uv_follows_the_panel_yaw() {
        // Panel turned to face +X, sitting on the -X axis.
        let panel = Panel3D::new(Vec3::ZERO, 2.0, 1.0);
        let parent = Transform3D::new(Vec3::new(-3.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let ray = Ray::new(Vec3::new(0.0, 0.25, -0.5), Vec3::NEG_X);
        let hit = raycast_panel(&ray, &panel, &parent).expect("hit");
        assert!((hit.distance - 3.0).abs() < 1e-4);
        // Local +X points to world -Z after the quarter turn.
        assert!((hit.uv.0 - 0.75).abs() < 1e-4, "{:?}", hit.uv);
        assert!((hit.uv.1 - 0.75).abs() < 1e-4, "{:?}", hit.uv);
    }

    #[test]
    fn misses_behind_parallel_and_hidden() {
        let panel = Panel3D::new(Vec3::ZERO, 1.0, 1.0);
        let parent = Transform3D::new(Vec3::new(0.0, 0.0, -2.0));
        let behind = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(raycast_panel(&behind, &panel, &parent).is_none());
        let parallel = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(raycast_panel(&parallel, &panel, &parent).is_none());
        let wide = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(raycast_panel(&wide, &panel, &parent).is_none());

        let mut hidden = panel.clone();
        hidden.visible = false;
        assert!(raycast_panel(&Ray::forward(Vec3::ZERO), &hidden, &parent).is_none());
    }

    #[test]
    fn nearest_panel_wins() {
        let panel = Panel3D::new(Vec3::ZERO, 1.0, 1.0);
        let near = Transform3D::new(Vec3::new(0.0, 0.0, -1.0));
        let far = Transform3D::new(Vec3::new(0.0, 0.0, -4.0));
        let (key, hit) = pick_nearest(
            &Ray::forward(Vec3::ZERO),
            [("far", &panel, far), ("near", &panel, near)],
        )
        .expect("hit");
        assert_eq!(key, "near");
        assert!((hit.distance - 1.0).abs() < 1e-4);
    }

    #[test]
    fn screen_center_looks_down_the_view_axis() {
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(FRAC_PI_2, 16.0 / 9.0, 0.1, 100.0);
        let ray = screen_to_ray((960.0, 540.0), (1920, 1080), &view, &proj);
        assert!(ray.origin.length() < 1e-5);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn screen_edges_follow_the_field_of_view() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -1.0), Vec3::Y);
        let proj = Mat4::perspective_rh(FRAC_PI_2, 16.0 / 9.0, 0.1, 100.0);

        // Right edge: 45 degree half-angle vertically, widened by the aspect.
        let right = screen_to_ray((1920.0, 540.0), (1920, 1080), &view, &proj);
        let expected = Vec3::new(16.0 / 9.0, 0.0, -1.0).normalize();
        assert!((right.direction - expected).length() < 1e-4, "{right:?}");
        assert!((right.origin - Vec3::Y).length() < 1e-5);

        // Bottom edge points 45 degrees down.
        let bottom = screen_to_ray((960.0, 1080.0), (1920, 1080), &view, &proj);
        let expected = Vec3::new(0.0, -1.0, -1.0).normalize();
        assert!((bottom.direction - expected).length() < 1e-4, "{bottom:?}");
    }

    #[test]
    fn rounded_corners_are_not_hittable() {
        let panel = Panel3D::new(Vec3::ZERO, 2.0, 1.0).with_corner_radius(0.2);
        let parent = Transform3D::new(Vec3::new(0.0, 0.0, -2.0));
        let corner = Ray::new(Vec3::new(-0.99, 0.49, 0.0), Vec3::NEG_Z);
        assert!(raycast_panel(&corner, &panel, &parent).is_none());
        let edge = Ray::new(Vec3::new(0.0, 0.49, 0.0), Vec3::NEG_Z);
        assert!(raycast_panel(&edge, &panel, &parent).is_some());
    }
}
