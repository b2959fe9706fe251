//! Panel presentation: getting content pixels onto a panel.
//!
//! Each presenter owns exactly one texture. It is allocated on the first
//! present and reused for every frame after that; only its contents change.

use crate::content::{PanelContent, PanelSurface};
use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How a panel's pixels reach the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Copied straight into an XR compositor quad layer.
    #[default]
    CompositorLayer,
    /// Sampled as a texture on a mesh in the 3D scene.
    MeshTexture,
}

impl PresentationMode {
    /// Layer copies take the canvas with its rows flipped; mesh UVs already
    /// account for orientation.
    pub fn flips_rows(self) -> bool {
        matches!(self, PresentationMode::CompositorLayer)
    }

    pub const fn name(self) -> &'static str {
        match self {
            PresentationMode::CompositorLayer => "layer",
            PresentationMode::MeshTexture => "mesh",
        }
    }
}

/// The one texture a presenter reuses.
#[derive(Debug, Clone)]
pub struct PanelTexture {
    pixels: RgbaImage,
    generation: u64,
}

impl PanelTexture {
    fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            generation: 0,
        }
    }

    /// Contents as last uploaded.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Number of uploads into this texture.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`PanelPresenter::present`] did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// Content was redrawn and copied into the texture.
    Uploaded,
    /// Nothing changed; the texture was left as is.
    Unchanged,
}

/// Counters for tests and frame logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenterStats {
    pub allocations: u32,
    pub uploads: u64,
    pub unchanged: u64,
}

/// Presents one panel's content through one reused texture.
#[derive(Debug)]
pub struct PanelPresenter {
    mode: PresentationMode,
    surface: Option<PanelSurface>,
    texture: Option<PanelTexture>,
    dirty: bool,
    stats: PresenterStats,
}

impl PanelPresenter {
    pub fn new(mode: PresentationMode) -> Self {
        Self {
            mode,
            surface: None,
            texture: None,
            dirty: true,
            stats: PresenterStats::default(),
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Switch presentation path. The texture survives; the next present
    /// re-uploads with the new orientation.
    pub fn set_mode(&mut self, mode: PresentationMode) {
        if mode != self.mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    pub fn stats(&self) -> PresenterStats {
        self.stats
    }

    pub fn texture(&self) -> Option<&PanelTexture> {
        self.texture.as_ref()
    }

    /// Forward a click to the content and schedule a redraw.
    pub fn click(&mut self, content: &mut dyn PanelContent) {
        content.on_click();
        self.dirty = true;
    }

    /// Draw `content` if it changed and copy it into the texture.
    pub fn present(&mut self, content: &mut dyn PanelContent) -> PresentOutcome {
        let (width, height) = content.pixel_size();

        let reallocate = self
            .texture
            .as_ref()
            .map_or(true, |texture| texture.pixels.dimensions() != (width, height));
        if reallocate {
            debug!(width, height, mode = self.mode.name(), "allocating panel texture");
            self.stats.allocations += 1;
            self.dirty = true;
            self.surface = Some(PanelSurface::new(width, height));
            self.texture = Some(PanelTexture::new(width, height));
        }

        if !self.dirty && !content.is_animated() {
            self.stats.unchanged += 1;
            return PresentOutcome::Unchanged;
        }

        let surface = self
            .surface
            .get_or_insert_with(|| PanelSurface::new(width, height));
        content.render(surface);

        let texture = self
            .texture
            .get_or_insert_with(|| PanelTexture::new(width, height));
        texture.pixels.copy_from_slice(surface.image().as_raw());
        if self.mode.flips_rows() {
            imageops::flip_vertical_in_place(&mut texture.pixels);
        }
        texture.generation += 1;

        self.dirty = false;
        self.stats.uploads += 1;
        trace!(generation = texture.generation, "panel texture uploaded");
        PresentOutcome::Uploaded
    }
}
