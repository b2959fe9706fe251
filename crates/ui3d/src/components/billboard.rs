//! Billboard Component - panels that turn to face the viewer

use super::Transform3D;
use glam::{Quat, Vec3};

/// Frame-rate independent exponential smoothing from `current` toward
/// `target`. `lambda` is the decay rate per second.
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    let t = 1.0 - (-lambda * dt).exp();
    current + (target - current) * t
}

/// A single floating panel that swings about +Y to face the camera.
///
/// The yaw is smoothed with [`damp`] so head movement does not make the panel
/// snap.
#[derive(Debug, Clone)]
pub struct Billboard {
    /// World transform
    pub transform: Transform3D,

    /// Current yaw in radians
    pub yaw: f32,

    /// Smoothing rate (per second)
    pub smoothing: f32,
}

impl Default for Billboard {
    fn default() -> Self {
        Self {
            transform: Transform3D::default(),
            yaw: 0.0,
            smoothing: 10.0,
        }
    }
}

impl Billboard {
    /// Create a new billboard at the given position
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform3D::new(position),
            ..Default::default()
        }
    }

    /// Builder: Set smoothing rate
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Yaw that points local +Z at `camera_position`, ignoring height.
    pub fn target_yaw(&self, camera_position: Vec3) -> f32 {
        let mut to_camera = camera_position - self.transform.position;
        to_camera.y = 0.0; // Project to XZ plane
        if to_camera.length_squared() <= f32::EPSILON {
            return self.yaw;
        }
        to_camera.x.atan2(to_camera.z)
    }

    /// Advance the smoothed yaw by `dt` seconds.
    pub fn update(&mut self, camera_position: Vec3, dt: f32) {
        let target = self.target_yaw(camera_position);
        self.yaw = damp(self.yaw, target, self.smoothing, dt);
        self.transform.rotation = Quat::from_rotation_y(self.yaw);
    }
}
