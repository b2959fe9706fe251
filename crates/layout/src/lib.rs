#![warn(missing_docs)]
//! Panel layout geometry for arranging flat virtual screens around a viewer.
//!
//! The viewer stands at the origin looking down `-Z`. Every layout places
//! exactly three panels in [`PanelSlot::Left`], [`PanelSlot::Center`] and
//! [`PanelSlot::Right`], each described by a [`PanelPlacement`] on the ground
//! plane (x, z and a yaw about +Y).
//!
//! ```rust
//! use xr_panels_layout::{LayoutParameters, LayoutVariant, PanelSlot};
//!
//! let params = LayoutParameters::default();
//! let slots = LayoutVariant::Arc.solve(&params);
//! assert_eq!(slots[PanelSlot::Center].x, 0.0);
//! ```

pub mod compare;
pub mod container;
pub mod params;
pub mod placement;
pub mod solver;

pub use compare::{
    compare, equivalent_right_angle_degrees, normalize_rotation, right_angle_tangent_layout,
    LayoutComparison, SlotDelta,
};
pub use container::{LayoutContainer, PanelGroup};
pub use params::{LayoutError, LayoutParameters};
pub use placement::{PanelPlacement, PanelSlot, PanelSlots};
pub use solver::{arc_layout, octagon_layout, right_angle_layout, LayoutVariant, OctagonGeometry};
