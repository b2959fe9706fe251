use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;
use xr_panels_layout::{LayoutParameters, LayoutVariant};
use xr_panels_ui3d::PresentationMode;

pub const DEFAULT_CONFIG_PATH: &str = "config/xr-panels.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PanelsConfig {
    /// Layout used at startup; the `L` key cycles from here.
    pub variant: LayoutVariant,
    pub presentation: PresentationMode,
    /// Logical canvas size of each panel in pixels.
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Device pixel ratio applied on top of the logical size.
    pub dpr: u32,
    /// Font file for panel captions. Unset means search the usual system
    /// font directories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_font: Option<PathBuf>,
    pub layout: LayoutParameters,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            variant: LayoutVariant::Arc,
            layout: LayoutParameters::default(),
            presentation: PresentationMode::CompositorLayer,
            pixel_width: 1920,
            pixel_height: 1080,
            dpr: 1,
            caption_font: None,
        }
    }
}

impl PanelsConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<PanelsConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    PanelsConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if path != Path::new(DEFAULT_CONFIG_PATH) {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                PanelsConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Surface size actually drawn, logical size times DPR.
    pub fn surface_pixels(&self) -> (u32, u32) {
        (
            self.pixel_width.saturating_mul(self.dpr),
            self.pixel_height.saturating_mul(self.dpr),
        )
    }

    /// Clamp values that would make an empty or absurd surface. Layout
    /// parameters are left alone; the solver tolerates anything.
    fn sanitized(mut self) -> Self {
        if self.dpr == 0 || self.dpr > 4 {
            warn!(dpr = self.dpr, "dpr out of range; clamping to 1..=4");
            self.dpr = self.dpr.clamp(1, 4);
        }
        self.pixel_width = self.pixel_width.max(1);
        self.pixel_height = self.pixel_height.max(1);
        if let Err(err) = self.layout.validate() {
            warn!("{err}; panels may be misplaced");
        }
        self
    }
}
