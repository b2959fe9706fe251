//! Printable reports for the `layout` and `compare` subcommands.

use serde::Serialize;
use std::fmt;
use xr_panels_layout::{
    compare, equivalent_right_angle_degrees, octagon_layout, right_angle_tangent_layout,
    LayoutParameters, LayoutVariant, OctagonGeometry, PanelPlacement, PanelSlot, PanelSlots,
};

/// Default tolerance for "these layouts coincide".
pub const MATCH_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub variant: LayoutVariant,
    pub parameters: LayoutParameters,
    pub placements: PanelSlots<PanelPlacement>,
}

impl LayoutReport {
    pub fn new(variant: LayoutVariant, parameters: LayoutParameters) -> Self {
        Self {
            variant,
            parameters,
            placements: variant.solve(&parameters).map(|p| p.rounded(4)),
        }
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parameters;
        writeln!(
            f,
            "{} (angle {}°, center {}, side {}, panel {} + gap {})",
            self.variant,
            p.wrapped_angle_degrees(),
            p.center_distance,
            p.side_distance,
            p.panel_width,
            p.gap
        )?;
        for (slot, placement) in self.placements.iter() {
            writeln!(
                f,
                "  {:<6} x={:>8.4} z={:>8.4} yaw={:>8.4} ({:.1}°)",
                slot.label(),
                placement.x,
                placement.z,
                placement.rotation_y,
                placement.rotation_y.to_degrees()
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonEntry {
    pub name: String,
    pub matches: bool,
    pub mismatched: Vec<PanelSlot>,
    pub max_position_delta: f64,
    pub max_rotation_delta: f64,
}

impl ComparisonEntry {
    fn new(
        name: impl Into<String>,
        a: &PanelSlots<PanelPlacement>,
        b: &PanelSlots<PanelPlacement>,
        tolerance: f64,
    ) -> Self {
        let comparison = compare(a, b);
        Self {
            name: name.into(),
            matches: comparison.matches(tolerance),
            mismatched: comparison.mismatched(tolerance),
            max_position_delta: comparison.max_position_delta(),
            max_rotation_delta: comparison
                .slots
                .iter()
                .map(|(_, delta)| delta.rotation_delta)
                .fold(0.0, f64::max),
        }
    }
}

/// How each closed-form layout measures up against the octagon built from
/// the same panel width.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub parameters: LayoutParameters,
    pub octagon_center_distance: f64,
    pub octagon_side_distance: f64,
    /// Right-angle swing at which the tangent form puts side panels at `z = 0`.
    pub equivalent_right_angle_degrees: f64,
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonReport {
    pub fn new(parameters: LayoutParameters, tolerance: f64) -> Self {
        let octagon_geometry = OctagonGeometry::for_panel_width(parameters.panel_width);
        let octagon = octagon_layout(&parameters);
        let equivalent = equivalent_right_angle_degrees(
            octagon_geometry.center_distance(),
            octagon_geometry.side_distance(),
        );

        // Closed forms fed the octagon's own distances.
        let derived = parameters.with_distances(
            octagon_geometry.center_distance(),
            octagon_geometry.side_distance(),
        );
        let at_equivalent = derived.with_angle(equivalent);

        let entries = vec![
            ComparisonEntry::new(
                "arc vs octagon",
                &LayoutVariant::Arc.solve(&derived),
                &octagon,
                tolerance,
            ),
            ComparisonEntry::new(
                "right_angle vs octagon",
                &LayoutVariant::RightAngle.solve(&at_equivalent),
                &octagon,
                tolerance,
            ),
            ComparisonEntry::new(
                "right_angle (tangent) vs octagon",
                &right_angle_tangent_layout(&at_equivalent),
                &octagon,
                tolerance,
            ),
        ];

        Self {
            parameters,
            octagon_center_distance: octagon_geometry.center_distance(),
            octagon_side_distance: octagon_geometry.side_distance(),
            equivalent_right_angle_degrees: equivalent,
            entries,
        }
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "octagon for panel width {}: center {:.4}, side {:.4}, equivalent right angle {:.2}°",
            self.parameters.panel_width,
            self.octagon_center_distance,
            self.octagon_side_distance,
            self.equivalent_right_angle_degrees
        )?;
        for entry in &self.entries {
            let verdict = if entry.matches { "match" } else { "differ" };
            write!(
                f,
                "  {:<34} {:<6} pos Δ {:.4}  yaw Δ {:.4}",
                entry.name, verdict, entry.max_position_delta, entry.max_rotation_delta
            )?;
            if !entry.mismatched.is_empty() {
                let slots: Vec<_> = entry.mismatched.iter().map(|s| s.label()).collect();
                write!(f, "  [{}]", slots.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
