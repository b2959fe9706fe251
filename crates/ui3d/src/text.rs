//! Caption text rasterized with fontdue.

use fontdue::{Font, FontSettings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Places a usable sans-serif font usually lives.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSans-Regular.ttf",
    // macOS
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("no system font found; install DejaVu Sans or set caption_font")]
    NotFound,
    #[error("failed to read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font: {0}")]
    Parse(&'static str),
}

/// First candidate path that exists.
pub fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// A parsed font shared by every panel that draws captions.
#[derive(Clone)]
pub struct CaptionFont {
    font: Arc<Font>,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("name", &self.font.name())
            .finish()
    }
}

impl CaptionFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(FontError::Parse)?;
        Ok(Self {
            font: Arc::new(font),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_bytes(bytes)?;
        debug!(path = %path.display(), "loaded caption font");
        Ok(font)
    }

    /// Load the first font from [`SYSTEM_FONT_CANDIDATES`].
    pub fn system() -> Result<Self, FontError> {
        let path = find_system_font().ok_or(FontError::NotFound)?;
        Self::from_file(&path)
    }

    /// Advance width of `text` at `px`, kerning included.
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        let mut width = 0.0;
        let mut prev = None;
        for c in text.chars() {
            if let Some(p) = prev {
                width += self.font.horizontal_kern(p, c, px).unwrap_or(0.0);
            }
            width += self.font.metrics(c, px).advance_width;
            prev = Some(c);
        }
        width
    }

    /// Offset from the vertical middle of a line to its baseline, downwards.
    pub(crate) fn middle_to_baseline(&self, px: f32) -> f32 {
        match self.font.horizontal_line_metrics(px) {
            Some(line) => (line.ascent + line.descent) / 2.0,
            None => px * 0.35,
        }
    }

    /// Coverage bitmaps for each glyph of `text`, positioned relative to the
    /// pen start on the baseline. Rows run top to bottom.
    pub(crate) fn glyphs(&self, text: &str, px: f32) -> Vec<PlacedGlyph> {
        let mut pen = 0.0;
        let mut prev = None;
        let mut placed = Vec::with_capacity(text.len());
        for c in text.chars() {
            if let Some(p) = prev {
                pen += self.font.horizontal_kern(p, c, px).unwrap_or(0.0);
            }
            let (metrics, coverage) = self.font.rasterize(c, px);
            placed.push(PlacedGlyph {
                left: pen + metrics.xmin as f32,
                top: -(metrics.ymin as f32 + metrics.height as f32),
                width: metrics.width,
                height: metrics.height,
                coverage,
            });
            pen += metrics.advance_width;
            prev = Some(c);
        }
        placed
    }
}

/// One rasterized glyph. `left` and `top` are relative to the pen origin.
pub(crate) struct PlacedGlyph {
    pub left: f32,
    pub top: f32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}
