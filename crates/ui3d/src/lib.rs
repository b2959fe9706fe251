//! 3D panel system for xr-panels
//!
//! World-space panels that show dynamically drawn 2D content, plus the glue
//! between layout placements and those panels.
//!
//! # Features
//!
//! - **Panels**: flat quads whose vertices honor a parent layout transform
//! - **Billboards**: single panels that swing about +Y to face the viewer
//! - **Content**: a `render(surface)` capability decoupled from layout math,
//!   with captions rasterized by fontdue
//! - **Presentation**: compositor layer or mesh texture, one reused texture
//!   per panel
//! - **Picking**: ray against placed panels, for gaze and pointer clicks
//!
//! # Example
//!
//! ```rust
//! use xr_panels_layout::{LayoutContainer, LayoutParameters, LayoutVariant};
//! use xr_panels_ui3d::{HueCyclePanel, PanelPresenter, PresentationMode, Transform3D};
//!
//! let panels = (0..3).map(|_| HueCyclePanel::new(64, 36));
//! let mut container =
//!     LayoutContainer::with_children(LayoutVariant::Arc, LayoutParameters::default(), panels);
//! let mut presenter = PanelPresenter::new(PresentationMode::MeshTexture);
//!
//! container.for_each_mut(|_, placement, panel| {
//!     let _parent = Transform3D::from_placement(&placement);
//!     presenter.present(panel);
//! });
//! ```

pub mod components;
pub mod content;
pub mod interaction;
pub mod presenter;
pub mod text;

// Re-export commonly used types
pub use components::{damp, Billboard, Panel3D, PanelVertex, Transform3D};
pub use content::{
    hsl_to_rgb, HueCyclePanel, PanelContent, PanelSurface, SolidPanel, CORNER_RADIUS_FRACTION,
};
pub use interaction::{pick_nearest, raycast_panel, screen_to_ray, PanelHit, Ray};
pub use presenter::{
    PanelPresenter, PanelTexture, PresentOutcome, PresentationMode, PresenterStats,
};
pub use text::{find_system_font, CaptionFont, FontError};

/// Version of the UI3D crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the crate version once at startup.
pub fn init() {
    tracing::info!("Initializing xr-panels-ui3d v{}", VERSION);
}
