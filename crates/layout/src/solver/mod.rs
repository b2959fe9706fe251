//! Geometry solvers for the three interchangeable layouts.
//!
//! Every solver is a pure function of [`LayoutParameters`]: no caching, no
//! shared state, identical input gives bit-identical output. Degenerate input
//! is not rejected; it propagates as NaN or infinite coordinates.

mod arc;
mod octagon;
mod right_angle;

pub use arc::arc_layout;
pub use octagon::{octagon_layout, OctagonGeometry, OCTAGON_PANEL_MARGIN};
pub use right_angle::right_angle_layout;

use crate::params::{LayoutError, LayoutParameters};
use crate::placement::{PanelPlacement, PanelSlots};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selectable layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Side panels on a circle at `±angle`.
    #[default]
    Arc,
    /// Side panels hinged against the center panel's edges.
    RightAngle,
    /// Three consecutive edges of a regular octagon.
    Octagon,
}

impl LayoutVariant {
    /// All variants in cycling order.
    pub const ALL: [LayoutVariant; 3] = [
        LayoutVariant::Arc,
        LayoutVariant::RightAngle,
        LayoutVariant::Octagon,
    ];

    /// Compute the three placements for `params`.
    pub fn solve(self, params: &LayoutParameters) -> PanelSlots<PanelPlacement> {
        match self {
            LayoutVariant::Arc => arc_layout(params),
            LayoutVariant::RightAngle => right_angle_layout(params),
            LayoutVariant::Octagon => octagon_layout(params),
        }
    }

    /// Next variant in cycling order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            LayoutVariant::Arc => LayoutVariant::RightAngle,
            LayoutVariant::RightAngle => LayoutVariant::Octagon,
            LayoutVariant::Octagon => LayoutVariant::Arc,
        }
    }

    /// Stable snake_case name.
    pub const fn name(self) -> &'static str {
        match self {
            LayoutVariant::Arc => "arc",
            LayoutVariant::RightAngle => "right_angle",
            LayoutVariant::Octagon => "octagon",
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutVariant {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "arc" | "simple_arc" => Ok(LayoutVariant::Arc),
            "right_angle" | "wedge" => Ok(LayoutVariant::RightAngle),
            "octagon" => Ok(LayoutVariant::Octagon),
            _ => Err(LayoutError::UnknownVariant(s.to_string())),
        }
    }
}

/// Center panel shared by the arc and right-angle layouts.
fn center_placement(params: &LayoutParameters) -> PanelPlacement {
    PanelPlacement::new(0.0, -params.center_distance, 0.0)
}
