//! XR session state and keyboard shortcuts.

use glam::Vec3;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info};

/// Where the reference space origin sits once an immersive session starts.
pub const XR_ORIGIN: Vec3 = Vec3::new(0.0, -1.5, 0.5);

/// How far the panel group drops while immersive.
pub const XR_CONTENT_DROP: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XrMode {
    /// Plain window, no headset.
    #[default]
    Inline,
    ImmersiveAr,
    ImmersiveVr,
}

impl XrMode {
    pub fn is_immersive(self) -> bool {
        !matches!(self, XrMode::Inline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    L,
    A,
    V,
    Escape,
    Space,
}

impl FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" => Ok(Key::L),
            "a" => Ok(Key::A),
            "v" => Ok(Key::V),
            "escape" | "esc" => Ok(Key::Escape),
            "space" => Ok(Key::Space),
            other => anyhow::bail!("unknown key {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CycleLayout,
    EnterAr,
    EnterVr,
    ExitSession,
    /// Click the panel under the gaze ray.
    Select,
}

impl Action {
    pub fn for_key(key: Key) -> Self {
        match key {
            Key::L => Action::CycleLayout,
            Key::A => Action::EnterAr,
            Key::V => Action::EnterVr,
            Key::Escape => Action::ExitSession,
            Key::Space => Action::Select,
        }
    }
}

/// Tracks which XR mode is active. Entering a mode while already immersive
/// is ignored, as a browser would refuse a second session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: XrMode,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> XrMode {
        self.mode
    }

    pub fn enter_ar(&mut self) -> bool {
        self.enter(XrMode::ImmersiveAr)
    }

    pub fn enter_vr(&mut self) -> bool {
        self.enter(XrMode::ImmersiveVr)
    }

    fn enter(&mut self, mode: XrMode) -> bool {
        if self.mode.is_immersive() {
            debug!(current = ?self.mode, requested = ?mode, "session already running");
            return false;
        }
        info!(?mode, "entering XR session");
        self.mode = mode;
        true
    }

    /// Leave any immersive mode. Returns whether anything changed.
    pub fn exit(&mut self) -> bool {
        if !self.mode.is_immersive() {
            return false;
        }
        info!(mode = ?self.mode, "XR session ended");
        self.mode = XrMode::Inline;
        true
    }

    /// The environment backdrop hides in AR so passthrough shows.
    pub fn shows_environment_background(&self) -> bool {
        self.mode != XrMode::ImmersiveAr
    }

    /// Vertical offset applied to the panel group.
    pub fn content_offset_y(&self) -> f32 {
        if self.mode.is_immersive() {
            -XR_CONTENT_DROP
        } else {
            0.0
        }
    }

    /// Reference space origin, present only while immersive.
    pub fn origin(&self) -> Option<Vec3> {
        self.mode.is_immersive().then_some(XR_ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        let actions: Vec<_> = ["L", "a", "V", "Escape", "space"]
            .iter()
            .map(|k| Action::for_key(k.parse().expect("known key")))
            .collect();
        assert_eq!(
            actions,
            vec![
                Action::CycleLayout,
                Action::EnterAr,
                Action::EnterVr,
                Action::ExitSession,
                Action::Select,
            ]
        );
        assert!("q".parse::<Key>().is_err());
    }

    #[test]
    fn ar_hides_background_and_drops_content() {
        let mut session = Session::new();
        assert!(session.shows_environment_background());
        assert_eq!(session.content_offset_y(), 0.0);
        assert_eq!(session.origin(), None);

        assert!(session.enter_ar());
        assert!(!session.shows_environment_background());
        assert_eq!(session.content_offset_y(), -0.3);
        assert_eq!(session.origin(), Some(Vec3::new(0.0, -1.5, 0.5)));
    }

    #[test]
    fn vr_keeps_background() {
        let mut session = Session::new();
        assert!(session.enter_vr());
        assert!(session.shows_environment_background());
        assert_eq!(session.content_offset_y(), -0.3);
    }

    #[test]
    fn second_enter_is_ignored_until_exit() {
        let mut session = Session::new();
        assert!(session.enter_vr());
        assert!(!session.enter_ar());
        assert_eq!(session.mode(), XrMode::ImmersiveVr);
        assert!(session.exit());
        assert!(!session.exit());
        assert!(session.enter_ar());
        assert_eq!(session.mode(), XrMode::ImmersiveAr);
    }
}
