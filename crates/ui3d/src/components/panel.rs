//! 3D Panel Component - the quad a panel's content is shown on

use super::Transform3D;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Height-to-width ratio of a 16:9 panel.
pub const SIXTEEN_NINE: f32 = 9.0 / 16.0;

/// 3D Panel - a flat quad facing local +Z
#[derive(Debug, Clone)]
pub struct Panel3D {
    /// Panel transform relative to its parent group
    pub transform: Transform3D,

    /// Panel size (width, height) in world units
    pub size: (f32, f32),

    /// Tint applied to the panel content
    pub color: [f32; 4],

    /// Whether the panel is visible
    pub visible: bool,

    /// Corner radius in world units (0 = sharp corners). Picking ignores
    /// hits outside the rounded corners.
    pub corner_radius: f32,
}

impl Default for Panel3D {
    fn default() -> Self {
        Self {
            transform: Transform3D::default(),
            size: (0.8, 0.8 * SIXTEEN_NINE),
            color: [1.0, 1.0, 1.0, 1.0],
            visible: true,
            corner_radius: 0.0,
        }
    }
}

impl Panel3D {
    /// Create a new 3D panel
    pub fn new(position: Vec3, width: f32, height: f32) -> Self {
        Self {
            transform: Transform3D::new(position),
            size: (width, height),
            ..Default::default()
        }
    }

    /// A 16:9 panel of the given width centered on its parent.
    pub fn widescreen(width: f32) -> Self {
        Self::new(Vec3::ZERO, width, width * SIXTEEN_NINE)
    }

    /// Builder: Set corner radius
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Width / height
    pub fn aspect(&self) -> f32 {
        self.size.0 / self.size.1
    }

    /// Check if a 2D point (in panel-local space) is inside the panel
    /// u, v are in range [0, 1] representing position on the panel
    pub fn contains_uv(&self, u: f32, v: f32) -> bool {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return false;
        }
        let (width, height) = self.size;
        let radius = self.corner_radius.clamp(0.0, width.min(height) / 2.0);
        if radius <= 0.0 {
            return true;
        }
        // Distance from the inner rectangle the corner arcs are centred on.
        let (x, y) = (u * width, v * height);
        let dx = x - x.clamp(radius, width - radius);
        let dy = y - y.clamp(radius, height - radius);
        dx * dx + dy * dy <= radius * radius
    }

    /// Panel-local UV for a point given in the panel's own space.
    pub fn local_to_uv(&self, local: Vec3) -> (f32, f32) {
        (
            local.x / self.size.0 + 0.5,
            local.y / self.size.1 + 0.5,
        )
    }

    /// Quad vertices with the panel's own transform applied.
    /// Format: [bottom-left, bottom-right, top-right, top-left]
    pub fn generate_vertices(&self) -> [PanelVertex; 4] {
        self.world_vertices(&Transform3D::default())
    }

    /// Quad vertices placed under `parent` (e.g. a layout slot transform).
    pub fn world_vertices(&self, parent: &Transform3D) -> [PanelVertex; 4] {
        let half_width = self.size.0 * 0.5;
        let half_height = self.size.1 * 0.5;
        let corners = [
            (Vec3::new(-half_width, -half_height, 0.0), [0.0, 0.0]),
            (Vec3::new(half_width, -half_height, 0.0), [1.0, 0.0]),
            (Vec3::new(half_width, half_height, 0.0), [1.0, 1.0]),
            (Vec3::new(-half_width, half_height, 0.0), [0.0, 1.0]),
        ];

        corners.map(|(local, uv)| {
            let world = parent.transform_point(self.transform.transform_point(local));
            PanelVertex {
                position: world.to_array(),
                uv,
                color: self.color,
            }
        })
    }

    /// World-space facing direction under `parent`.
    pub fn normal(&self, parent: &Transform3D) -> Vec3 {
        (parent.rotation * self.transform.rotation * Vec3::Z).normalize()
    }
}

/// Vertex data for panel rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PanelVertex {
    /// Vertex position in world space
    pub position: [f32; 3],
    /// UV coordinates (0-1)
    pub uv: [f32; 2],
    /// Vertex color
    pub color: [f32; 4],
}
