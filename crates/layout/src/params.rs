//! Scalar inputs shared by every layout variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`LayoutParameters::validate`].
///
/// The solvers themselves never fail; validation is opt-in for callers that
/// want to reject input before it turns into NaN or infinite placements.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// A parameter was NaN or infinite.
    #[error("layout parameter `{name}` is not finite ({value})")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A length that must be strictly positive was zero or negative.
    #[error("layout parameter `{name}` must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A variant name could not be parsed.
    #[error("unknown layout variant `{0}` (expected arc, right_angle or octagon)")]
    UnknownVariant(String),
}

/// Immutable layout inputs, in world units and degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    /// Width of a single panel.
    pub panel_width: f64,
    /// Horizontal gap between the center panel and a side panel.
    pub gap: f64,
    /// Forward distance from the viewer to the center panel.
    pub center_distance: f64,
    /// Radius of the circle the side panels sit on (arc layout).
    pub side_distance: f64,
    /// Side panel angle in degrees; any value, taken modulo 360.
    pub angle_degrees: f64,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            panel_width: 0.8,
            gap: 0.1,
            center_distance: 0.3182,
            side_distance: 0.7682,
            angle_degrees: 45.0,
        }
    }
}

impl LayoutParameters {
    /// Builder: set the side angle in degrees.
    pub fn with_angle(mut self, angle_degrees: f64) -> Self {
        self.angle_degrees = angle_degrees;
        self
    }

    /// Builder: set the center and side distances.
    pub fn with_distances(mut self, center_distance: f64, side_distance: f64) -> Self {
        self.center_distance = center_distance;
        self.side_distance = side_distance;
        self
    }

    /// Builder: set panel width and gap.
    pub fn with_panel(mut self, panel_width: f64, gap: f64) -> Self {
        self.panel_width = panel_width;
        self.gap = gap;
        self
    }

    /// Angle wrapped into `(-180, 180]` degrees.
    pub fn wrapped_angle_degrees(&self) -> f64 {
        let wrapped = self.angle_degrees.rem_euclid(360.0);
        if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Wrapped angle in radians.
    pub fn angle_radians(&self) -> f64 {
        self.wrapped_angle_degrees().to_radians()
    }

    /// Center-to-center horizontal distance between the center panel and a
    /// side panel laid flat next to it.
    pub fn horizontal_distance(&self) -> f64 {
        self.panel_width / 2.0 + self.gap + self.panel_width / 2.0
    }

    /// Check that every parameter is finite and every length is positive.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let lengths = [
            ("panel_width", self.panel_width),
            ("gap", self.gap),
            ("center_distance", self.center_distance),
            ("side_distance", self.side_distance),
        ];
        for (name, value) in lengths {
            if !value.is_finite() {
                return Err(LayoutError::NonFinite { name, value });
            }
            if value <= 0.0 {
                return Err(LayoutError::NonPositive { name, value });
            }
        }
        if !self.angle_degrees.is_finite() {
            return Err(LayoutError::NonFinite {
                name: "angle_degrees",
                value: self.angle_degrees,
            });
        }
        Ok(())
    }
}
