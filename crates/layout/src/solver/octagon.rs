use crate::compare::normalize_rotation;
use crate::params::LayoutParameters;
use crate::placement::{PanelPlacement, PanelSlots};
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

/// Space added to the panel width to get the octagon edge length.
pub const OCTAGON_PANEL_MARGIN: f64 = 0.10;

/// Edge indices used for the left, center and right panels.
const EDGES: [usize; 3] = [6, 7, 0];

/// A regular octagon whose edges are panel mounting planes.
///
/// Vertex `i` sits at bearing `i·π/4 + π/8` from the forward axis, so edge 7
/// (from vertex 7 to vertex 0) is perpendicular to `-Z`. Coordinates are
/// `(x, z)` relative to the octagon's center.
#[derive(Debug, Clone, PartialEq)]
pub struct OctagonGeometry {
    edge_length: f64,
    circumradius: f64,
    vertices: [DVec2; 8],
}

impl OctagonGeometry {
    /// Octagon sized so each edge holds one `panel_width` panel plus margin.
    pub fn for_panel_width(panel_width: f64) -> Self {
        let edge_length = panel_width + OCTAGON_PANEL_MARGIN;
        let circumradius = edge_length / (2.0 * FRAC_PI_8.sin());
        let vertices = std::array::from_fn(|i| {
            let bearing = i as f64 * FRAC_PI_4 + FRAC_PI_8;
            DVec2::new(circumradius * bearing.sin(), -circumradius * bearing.cos())
        });
        Self {
            edge_length,
            circumradius,
            vertices,
        }
    }

    /// Length of every edge.
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Distance from the octagon center to every vertex.
    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    /// The eight vertices as `(x, z)`.
    pub fn vertices(&self) -> &[DVec2; 8] {
        &self.vertices
    }

    /// Midpoint and facing of edge `index` (from vertex `index` to the next),
    /// before re-centering on the viewer.
    pub fn edge_placement(&self, index: usize) -> PanelPlacement {
        let start = self.vertices[index % 8];
        let end = self.vertices[(index + 1) % 8];
        let mid = (start + end) / 2.0;
        let dir = end - start;
        // Edge direction plus a quarter turn faces the panel; the extra half
        // turn points it inward at the viewer.
        let rotation = dir.x.atan2(dir.y) + FRAC_PI_2 + PI;
        PanelPlacement::new(mid.x, mid.y, rotation)
    }

    /// Viewer position in octagon coordinates: level with edge 7's midpoint
    /// in x, halfway between vertices 6 and 0 in z.
    pub fn viewer_origin(&self) -> DVec2 {
        let center_edge = self.edge_placement(EDGES[1]);
        DVec2::new(
            center_edge.x,
            (self.vertices[6].y + self.vertices[0].y) / 2.0,
        )
    }

    /// Placements for edges 6, 7 and 0 relative to the viewer, with
    /// rotations normalized into `[-π, π]`.
    pub fn placements(&self) -> PanelSlots<PanelPlacement> {
        let origin = self.viewer_origin();
        let [left, center, right] = EDGES.map(|edge| {
            let raw = self.edge_placement(edge);
            PanelPlacement::new(
                raw.x - origin.x,
                raw.z - origin.y,
                normalize_rotation(raw.rotation_y),
            )
        });
        PanelSlots::new(left, center, right)
    }

    /// Forward distance from the viewer to the center panel.
    pub fn center_distance(&self) -> f64 {
        -self.placements().center.z
    }

    /// Distance from the viewer to each side panel's midpoint.
    pub fn side_distance(&self) -> f64 {
        self.placements().right.distance()
    }
}

/// Octagon layout. Only `panel_width` is used; the distances follow from the
/// octagon itself (see [`OctagonGeometry::center_distance`]).
pub fn octagon_layout(params: &LayoutParameters) -> PanelSlots<PanelPlacement> {
    OctagonGeometry::for_panel_width(params.panel_width).placements()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_are_equidistant_and_evenly_spaced() {
        let octagon = OctagonGeometry::for_panel_width(0.8);
        assert!((octagon.edge_length() - 0.9).abs() < 1e-12);
        let vertices = octagon.vertices();
        for i in 0..8 {
            assert!((vertices[i].length() - octagon.circumradius()).abs() < 1e-12);
            let next = vertices[(i + 1) % 8];
            assert!((vertices[i].distance(next) - octagon.edge_length()).abs() < 1e-12);
        }
    }

    #[test]
    fn center_edge_faces_the_viewer() {
        let slots = octagon_layout(&LayoutParameters::default());
        assert_eq!(slots.center.x, 0.0);
        assert!(slots.center.rotation_y.abs() < 1e-12);
        assert!((slots.center.z + 0.3182).abs() < 5e-5);
    }

    #[test]
    fn side_edges_sit_level_with_the_viewer() {
        let slots = octagon_layout(&LayoutParameters::default());
        assert!((slots.left.x + 0.7682).abs() < 5e-5);
        assert!(slots.left.z.abs() < 1e-9);
        assert!((slots.left.rotation_y - FRAC_PI_4).abs() < 1e-9);
        assert!((slots.right.x - 0.7682).abs() < 5e-5);
        assert!((slots.right.rotation_y + FRAC_PI_4).abs() < 1e-9);
    }

    #[test]
    fn derived_distances_match_reference_values() {
        let octagon = OctagonGeometry::for_panel_width(0.8);
        assert!((octagon.center_distance() - 0.3182).abs() < 5e-5);
        assert!((octagon.side_distance() - 0.7682).abs() < 5e-5);
    }

    #[test]
    fn only_panel_width_affects_the_octagon() {
        let base = LayoutParameters::default();
        let moved = base.with_distances(2.0, 3.0).with_angle(10.0);
        assert_eq!(octagon_layout(&base), octagon_layout(&moved));
    }
}
