use crate::session::Key;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct KeyScriptFile {
    steps: Vec<KeyScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct KeyScriptStepDef {
    frame: u64,
    key: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct KeyScriptStep {
    frame: u64,
    key: Key,
}

/// Deterministic key presses for the headless frame loop.
///
/// Steps are `{frame, key}` pairs, sorted by frame.
#[derive(Debug, Default)]
pub struct KeyScript {
    pending: VecDeque<KeyScriptStep>,
}

impl KeyScript {
    /// Load a key script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading key script {}", path.display()))?;
        Self::from_json(&contents)
    }

    /// Parse `{"steps": [{"frame": 0, "key": "l"}, ...]}`.
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: KeyScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("key script contains no steps");
        }
        Self::from_steps(file.steps.into_iter().map(|s| (s.frame, s.key)))
    }

    /// Parse inline `FRAME:KEY` arguments such as `3:l`.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut steps = Vec::with_capacity(args.len());
        for arg in args {
            let (frame, key) = arg
                .split_once(':')
                .with_context(|| format!("expected FRAME:KEY, got {arg:?}"))?;
            let frame = frame
                .trim()
                .parse::<u64>()
                .with_context(|| format!("bad frame in {arg:?}"))?;
            steps.push((frame, key.to_string()));
        }
        Self::from_steps(steps)
    }

    fn from_steps(steps: impl IntoIterator<Item = (u64, String)>) -> Result<Self> {
        let mut pending = VecDeque::new();
        let mut last_frame: Option<u64> = None;
        for (frame, key) in steps {
            if last_frame.is_some_and(|prev| frame < prev) {
                anyhow::bail!("key script steps must be sorted by frame");
            }
            last_frame = Some(frame);
            pending.push_back(KeyScriptStep {
                frame,
                key: key.parse()?,
            });
        }
        Ok(Self { pending })
    }

    /// Drain all keys scheduled for frames `<= frame`.
    pub fn drain_ready(&mut self, frame: u64) -> Vec<Key> {
        let mut keys = Vec::new();
        while let Some(step) = self.pending.front().copied() {
            if step.frame > frame {
                break;
            }
            self.pending.pop_front();
            keys.push(step.key);
        }
        keys
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
