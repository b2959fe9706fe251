//! Headless scene driven one frame at a time: either three content panels in
//! a layout container, or a single billboard panel that turns toward a moving
//! camera.

use crate::config::PanelsConfig;
use crate::key_script::KeyScript;
use crate::session::{Action, Key, Session, XrMode};
use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use serde::Serialize;
use std::f32::consts::TAU;
use std::str::FromStr;
use tracing::{debug, info, warn};
use xr_panels_layout::{LayoutContainer, LayoutVariant, PanelPlacement, PanelSlot};
use xr_panels_testkit::JsonlSink;
use xr_panels_ui3d::{
    pick_nearest, screen_to_ray, Billboard, CaptionFont, HueCyclePanel, Panel3D, PanelContent,
    PanelPresenter, PresentOutcome, Ray, Transform3D, CORNER_RADIUS_FRACTION,
};

/// Seconds per simulated frame.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Where the billboard panel floats, relative to the group.
pub const BILLBOARD_POSITION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Inline camera: vertical field of view and the viewport pointer clicks are
/// given in.
pub const INLINE_FOV_DEGREES: f32 = 75.0;
pub const INLINE_VIEWPORT: (u32, u32) = (1920, 1080);

pub struct ScenePanel {
    pub panel: Panel3D,
    pub content: Box<dyn PanelContent>,
    pub presenter: PanelPresenter,
}

impl ScenePanel {
    /// Hue-cycling 16:9 panel whose pick shape follows the drawn corners.
    pub fn hue_cycle(config: &PanelsConfig, font: Option<&CaptionFont>) -> Self {
        let (width, height) = config.surface_pixels();
        let mut content = HueCyclePanel::new(width, height);
        if let Some(font) = font {
            content = content.with_font(font.clone());
        }
        let panel = Panel3D::widescreen(config.layout.panel_width as f32);
        let corner_radius = panel.size.1 * CORNER_RADIUS_FRACTION;
        Self {
            panel: panel.with_corner_radius(corner_radius),
            content: Box::new(content),
            presenter: PanelPresenter::new(config.presentation),
        }
    }

    /// Present and describe where the panel ended up under `parent`.
    fn present(
        &mut self,
        slot: PanelSlot,
        placement: PanelPlacement,
        parent: &Transform3D,
    ) -> PanelFrame {
        let outcome = self.presenter.present(self.content.as_mut());
        let vertices = self.panel.world_vertices(parent);
        let center = vertices
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc + Vec3::from_array(v.position))
            / vertices.len() as f32;
        PanelFrame {
            slot,
            placement: placement.rounded(4),
            center: round4(center),
            normal: round4(self.panel.normal(parent)),
            uploaded: outcome == PresentOutcome::Uploaded,
            texture_generation: self
                .presenter
                .texture()
                .map_or(0, |texture| texture.generation()),
        }
    }
}

/// Caption font from the config path, or the first system font found.
pub fn load_caption_font(config: &PanelsConfig) -> Option<CaptionFont> {
    let loaded = match &config.caption_font {
        Some(path) => CaptionFont::from_file(path),
        None => CaptionFont::system(),
    };
    match loaded {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("{err}; panels render without captions");
            None
        }
    }
}

/// Camera path for billboard runs: side to side in front of the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSweep {
    pub amplitude: f32,
    pub period_frames: u64,
}

impl Default for CameraSweep {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            period_frames: 240,
        }
    }
}

impl CameraSweep {
    pub fn position(&self, frame: u64) -> Vec3 {
        let period = self.period_frames.max(1);
        let phase = TAU * (frame % period) as f32 / period as f32;
        Vec3::new(self.amplitude * phase.sin(), 0.0, 0.0)
    }
}

/// Mouse click in inline mode, in [`INLINE_VIEWPORT`] pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    pub frame: u64,
    pub x: f32,
    pub y: f32,
}

impl FromStr for PointerClick {
    type Err = anyhow::Error;

    /// `FRAME:X,Y`
    fn from_str(s: &str) -> Result<Self> {
        let (frame, position) = s
            .split_once(':')
            .with_context(|| format!("expected FRAME:X,Y, got {s:?}"))?;
        let (x, y) = position
            .split_once(',')
            .with_context(|| format!("expected FRAME:X,Y, got {s:?}"))?;
        Ok(Self {
            frame: frame.trim().parse().context("bad click frame")?,
            x: x.trim().parse().context("bad click x")?,
            y: y.trim().parse().context("bad click y")?,
        })
    }
}

struct BillboardDemo {
    billboard: Billboard,
    panel: ScenePanel,
    sweep: Option<CameraSweep>,
}

impl BillboardDemo {
    fn parent(&self, offset: Vec3) -> Transform3D {
        Transform3D::new(self.billboard.transform.position + offset)
            .with_rotation(self.billboard.transform.rotation)
    }

    fn placement(&self) -> PanelPlacement {
        let position = self.billboard.transform.position;
        PanelPlacement::new(
            f64::from(position.x),
            f64::from(position.z),
            f64::from(self.billboard.yaw),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelFrame {
    pub slot: PanelSlot,
    pub placement: PanelPlacement,
    /// World-space quad center after the group offset.
    pub center: [f64; 3],
    pub normal: [f64; 3],
    pub uploaded: bool,
    pub texture_generation: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub mode: XrMode,
    pub variant: LayoutVariant,
    pub background: bool,
    /// Reference space origin while immersive.
    pub origin: Option<[f32; 3]>,
    pub solves: u64,
    /// Viewer position, logged for billboard runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billboard_yaw: Option<f64>,
    pub panels: Vec<PanelFrame>,
}

pub struct Scene {
    session: Session,
    container: LayoutContainer<ScenePanel>,
    billboard: Option<BillboardDemo>,
    camera: Vec3,
    clicks: Vec<PointerClick>,
    frame: u64,
}

impl Scene {
    /// Three hue-cycling panels sized from the config.
    pub fn from_config(config: &PanelsConfig) -> Self {
        let font = load_caption_font(config);
        let panels = (0..3).map(|_| ScenePanel::hue_cycle(config, font.as_ref()));
        Self::with_panels(config, panels)
    }

    pub fn with_panels(
        config: &PanelsConfig,
        panels: impl IntoIterator<Item = ScenePanel>,
    ) -> Self {
        Self {
            session: Session::new(),
            container: LayoutContainer::with_children(config.variant, config.layout, panels),
            billboard: None,
            camera: Vec3::ZERO,
            clicks: Vec::new(),
            frame: 0,
        }
    }

    /// One panel at [`BILLBOARD_POSITION`] that yaws toward the camera.
    /// With a sweep the camera follows it; otherwise it stays where
    /// [`Self::set_camera`] puts it. The panel answers to the center slot.
    pub fn billboard(config: &PanelsConfig, sweep: Option<CameraSweep>) -> Self {
        let font = load_caption_font(config);
        let mut scene = Self::with_panels(config, std::iter::empty());
        scene.billboard = Some(BillboardDemo {
            billboard: Billboard::new(BILLBOARD_POSITION),
            panel: ScenePanel::hue_cycle(config, font.as_ref()),
            sweep,
        });
        scene
    }

    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    pub fn camera(&self) -> Vec3 {
        self.camera
    }

    pub fn set_camera(&mut self, position: Vec3) {
        self.camera = position;
    }

    /// Schedule a pointer click for the frame it names.
    pub fn queue_click(&mut self, click: PointerClick) {
        self.clicks.push(click);
    }

    pub fn handle_key(&mut self, key: Key) {
        let action = Action::for_key(key);
        debug!(?key, ?action, frame = self.frame, "key");
        match action {
            Action::CycleLayout => {
                let variant = self.container.cycle_variant();
                info!(%variant, "layout switched");
            }
            Action::EnterAr => {
                self.session.enter_ar();
            }
            Action::EnterVr => {
                self.session.enter_vr();
            }
            Action::ExitSession => {
                self.session.exit();
            }
            Action::Select => {
                let gaze = self.gaze();
                self.select(&gaze);
            }
        }
    }

    fn group_offset(&self) -> Vec3 {
        Vec3::Y * self.session.content_offset_y()
    }

    /// Viewer looking straight ahead at the height of the panel group.
    pub fn gaze(&self) -> Ray {
        Ray::forward(self.camera + self.group_offset())
    }

    /// Ray under an inline-mode pointer at `(x, y)` viewport pixels.
    pub fn pointer_ray(&self, x: f32, y: f32) -> Ray {
        let (width, height) = INLINE_VIEWPORT;
        let view = Mat4::look_at_rh(self.camera, self.camera + Vec3::NEG_Z, Vec3::Y);
        let projection = Mat4::perspective_rh(
            INLINE_FOV_DEGREES.to_radians(),
            width as f32 / height as f32,
            0.1,
            1000.0,
        );
        screen_to_ray((x, y), INLINE_VIEWPORT, &view, &projection)
    }

    /// Click through the inline viewport. Immersive sessions have no
    /// pointer on the page, so the click is dropped.
    pub fn click_screen(&mut self, x: f32, y: f32) -> Option<PanelSlot> {
        if self.session.mode().is_immersive() {
            debug!(x, y, "pointer click ignored while immersive");
            return None;
        }
        let ray = self.pointer_ray(x, y);
        self.select(&ray)
    }

    /// Click the nearest panel `ray` hits.
    pub fn select(&mut self, ray: &Ray) -> Option<PanelSlot> {
        let offset = self.group_offset();
        let laid_out = self.container.groups().map(|group| {
            let parent = Transform3D::from_placement(&group.placement).translated(offset);
            (group.slot, &group.content.panel, parent)
        });
        let billboard = self
            .billboard
            .iter()
            .map(|demo| (PanelSlot::Center, &demo.panel.panel, demo.parent(offset)));
        let (slot, hit) = pick_nearest(ray, laid_out.chain(billboard))?;
        debug!(?slot, uv = ?hit.uv, distance = hit.distance, "panel selected");

        let target = match self.billboard.as_mut() {
            Some(demo) => Some(&mut demo.panel),
            None => self.container.get_mut(slot),
        };
        if let Some(panel) = target {
            panel.presenter.click(panel.content.as_mut());
        }
        Some(slot)
    }

    fn apply_due_clicks(&mut self) {
        let frame = self.frame;
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.clicks)
            .into_iter()
            .partition(|click| click.frame <= frame);
        self.clicks = pending;
        for click in due {
            let hit = self.click_screen(click.x, click.y);
            debug!(frame, x = click.x, y = click.y, ?hit, "pointer click");
        }
    }

    /// Present every panel and record where it ended up.
    pub fn frame(&mut self) -> FrameRecord {
        if let Some(sweep) = self.billboard.as_ref().and_then(|demo| demo.sweep) {
            self.camera = sweep.position(self.frame);
        }
        self.apply_due_clicks();

        let offset = self.group_offset();
        let mut panels = Vec::with_capacity(self.container.len() + 1);
        self.container.for_each_mut(|slot, placement, scene_panel| {
            let parent = Transform3D::from_placement(&placement).translated(offset);
            panels.push(scene_panel.present(slot, placement, &parent));
        });

        let camera = self.camera;
        let billboard_yaw = self.billboard.as_mut().map(|demo| {
            demo.billboard.update(camera, FRAME_DT);
            let parent = demo.parent(offset);
            let placement = demo.placement();
            panels.push(demo.panel.present(PanelSlot::Center, placement, &parent));
            round_to(demo.billboard.yaw, 4)
        });

        let record = FrameRecord {
            frame: self.frame,
            mode: self.session.mode(),
            variant: self.container.variant(),
            background: self.session.shows_environment_background(),
            origin: self.session.origin().map(|origin| origin.to_array()),
            solves: self.container.solve_count(),
            camera: billboard_yaw.map(|_| round4(camera)),
            billboard_yaw,
            panels,
        };
        self.frame += 1;
        record
    }
}

fn round_to(value: f32, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (f64::from(value) * scale).round() / scale + 0.0
}

fn round4(v: Vec3) -> [f64; 3] {
    v.to_array().map(|c| round_to(c, 4))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub frames: u64,
    pub uploads: u64,
    pub solves: u64,
    pub final_variant: LayoutVariant,
    pub final_mode: XrMode,
}

/// Run `frames` frames, applying scripted keys before each one.
pub fn run_simulation(
    scene: &mut Scene,
    script: &mut KeyScript,
    frames: u64,
    mut sink: Option<&mut JsonlSink>,
) -> Result<SimulationSummary> {
    let mut uploads = 0;
    for _ in 0..frames {
        for key in script.drain_ready(scene.frame_index()) {
            scene.handle_key(key);
        }
        let record = scene.frame();
        uploads += record.panels.iter().filter(|p| p.uploaded).count() as u64;
        if let Some(sink) = sink.as_deref_mut() {
            sink.write(&record)?;
        }
    }
    if let Some(sink) = sink {
        sink.flush()?;
    }
    if !script.is_finished() {
        debug!("key script has steps past the last frame");
    }

    Ok(SimulationSummary {
        frames,
        uploads,
        solves: scene.container.solve_count(),
        final_variant: scene.container.variant(),
        final_mode: scene.session.mode(),
    })
}
