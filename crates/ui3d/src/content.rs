//! Panel content sources and the 2D surface they draw into.
//!
//! Content knows nothing about where its panel ends up; it only fills a
//! [`PanelSurface`] when asked.

use crate::text::CaptionFont;
use image::{Rgba, RgbaImage};

/// Canvas height the caption sizes and corner radius are authored against
/// (1080 logical pixels at 3x DPR).
const REFERENCE_HEIGHT: f32 = 1080.0 * 3.0;

/// Rounded corner radius as a fraction of the panel height.
pub const CORNER_RADIUS_FRACTION: f32 = 150.0 / REFERENCE_HEIGHT;

/// CPU-side RGBA drawing surface.
#[derive(Debug, Clone)]
pub struct PanelSurface {
    image: RgbaImage,
}

impl PanelSurface {
    /// Transparent surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.fill(Rgba([0, 0, 0, 0]));
    }

    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Fill the whole surface with a rectangle whose corners are rounded by
    /// `radius` pixels. Pixels outside the corners are left untouched.
    pub fn fill_rounded_rect(&mut self, radius: f32, color: Rgba<u8>) {
        let (width, height) = (self.width() as f32, self.height() as f32);
        let radius = radius.clamp(0.0, width.min(height) / 2.0);
        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let cx = px.clamp(radius, width - radius);
            let cy = py.clamp(radius, height - radius);
            let (dx, dy) = (px - cx, py - cy);
            if dx * dx + dy * dy <= radius * radius {
                *pixel = color;
            }
        }
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        self.image.put_pixel(x, y, color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Pixels in row order.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Draw one line of `text` centred horizontally on `center_x` with its
    /// vertical middle on `middle_y`, blended over what is already there.
    pub fn draw_text_centered(
        &mut self,
        font: &CaptionFont,
        text: &str,
        px: f32,
        (center_x, middle_y): (f32, f32),
        color: Rgba<u8>,
    ) {
        let origin_x = center_x - font.measure(text, px) / 2.0;
        let baseline = middle_y + font.middle_to_baseline(px);
        let (width, height) = (self.width() as i64, self.height() as i64);

        for glyph in font.glyphs(text, px) {
            let left = (origin_x + glyph.left).round() as i64;
            let top = (baseline + glyph.top).round() as i64;
            for row in 0..glyph.height {
                let y = top + row as i64;
                if !(0..height).contains(&y) {
                    continue;
                }
                for col in 0..glyph.width {
                    let x = left + col as i64;
                    let coverage = glyph.coverage[row * glyph.width + col];
                    if coverage == 0 || !(0..width).contains(&x) {
                        continue;
                    }
                    let pixel = self.image.get_pixel_mut(x as u32, y as u32);
                    *pixel = blend(*pixel, color, coverage);
                }
            }
        }
    }
}

/// Source-over blend of `color` scaled by `coverage` onto `dst`.
fn blend(dst: Rgba<u8>, color: Rgba<u8>, coverage: u8) -> Rgba<u8> {
    let a = f32::from(coverage) / 255.0 * f32::from(color[3]) / 255.0;
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = a + dst_a * (1.0 - a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let c = (f32::from(color[i]) * a + f32::from(dst[i]) * dst_a * (1.0 - a)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Something that can draw a panel's pixels on demand.
pub trait PanelContent {
    /// Pixel size of the surface this content wants.
    fn pixel_size(&self) -> (u32, u32);

    /// Draw the current frame into `surface`.
    fn render(&mut self, surface: &mut PanelSurface);

    /// Whether the content changes every frame even without input.
    fn is_animated(&self) -> bool {
        false
    }

    /// A click landed on the panel.
    fn on_click(&mut self) {}

    /// Text lines the content draws over its surface.
    fn caption(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// Caption lines as (font size, vertical middle), both in reference pixels.
const CAPTION_LINES: [(f32, f32); 2] = [(360.0, 540.0 * 3.0), (120.0, 780.0 * 3.0)];

/// Smallest caption size worth rasterizing.
const MIN_CAPTION_PX: f32 = 6.0;

/// Rounded rectangle whose hue advances one degree per frame, with a click
/// counter caption.
#[derive(Debug, Clone)]
pub struct HueCyclePanel {
    size: (u32, u32),
    corner_radius: f32,
    hue: u16,
    clicks: u32,
    font: Option<CaptionFont>,
}

impl HueCyclePanel {
    /// Reference surface is 1920x1080 at 3x DPR with a 150px corner radius;
    /// the radius and caption sizes scale with the surface height.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            corner_radius: height as f32 * CORNER_RADIUS_FRACTION,
            hue: 0,
            clicks: 0,
            font: None,
        }
    }

    /// Builder: draw the caption with `font`. Without one only the
    /// background is drawn.
    pub fn with_font(mut self, font: CaptionFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn color(&self) -> Rgba<u8> {
        let [r, g, b] = hsl_to_rgb(f32::from(self.hue), 0.7, 0.5);
        Rgba([r, g, b, 255])
    }
}

impl PanelContent for HueCyclePanel {
    fn pixel_size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, surface: &mut PanelSurface) {
        surface.clear();
        self.hue = (self.hue + 1) % 360;
        surface.fill_rounded_rect(self.corner_radius, self.color());

        let Some(font) = &self.font else {
            return;
        };
        let scale = surface.height() as f32 / REFERENCE_HEIGHT;
        let center_x = surface.width() as f32 / 2.0;
        for ((px, middle), line) in CAPTION_LINES.iter().zip(self.caption()) {
            let px = (px * scale).max(MIN_CAPTION_PX);
            surface.draw_text_centered(
                font,
                &line,
                px,
                (center_x, middle * scale),
                Rgba([255, 255, 255, 255]),
            );
        }
    }

    fn is_animated(&self) -> bool {
        true
    }

    fn on_click(&mut self) {
        self.clicks += 1;
    }

    fn caption(&self) -> Vec<String> {
        vec![
            format!("Clicks: {}", self.clicks),
            "Click to increment!".to_string(),
        ]
    }
}

/// Constant fill; renders once and stays put.
#[derive(Debug, Clone)]
pub struct SolidPanel {
    size: (u32, u32),
    color: Rgba<u8>,
}

impl SolidPanel {
    pub fn new(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            size: (width, height),
            color: Rgba(color),
        }
    }
}

impl PanelContent for SolidPanel {
    fn pixel_size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, surface: &mut PanelSurface) {
        surface.fill(self.color);
    }
}
