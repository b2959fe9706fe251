//! xr-panels - three-panel XR layouts
//!
//! Prints solved layouts, compares variants, and runs a headless frame loop
//! that drives the panel scene with scripted key presses.

mod commands;
mod config;
mod key_script;
mod scene;
mod session;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use commands::{ComparisonReport, LayoutReport, MATCH_TOLERANCE};
use config::{PanelsConfig, DEFAULT_CONFIG_PATH};
use key_script::KeyScript;
use scene::{run_simulation, CameraSweep, PointerClick, Scene};
use std::path::PathBuf;
use tracing::info;
use xr_panels_layout::{LayoutParameters, LayoutVariant};
use xr_panels_testkit::JsonlSink;
use xr_panels_ui3d::PresentationMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Three-panel XR layout tool", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the placements for one variant
    Layout {
        #[command(flatten)]
        overrides: LayoutOverrides,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compare the closed-form layouts against the octagon
    Compare {
        #[command(flatten)]
        overrides: LayoutOverrides,

        /// Tolerance for treating two placements as equal
        #[arg(long, default_value_t = MATCH_TOLERANCE)]
        tolerance: f64,

        #[arg(long)]
        json: bool,
    },
    /// Run the panel scene headless for a number of frames
    Simulate {
        #[command(flatten)]
        overrides: LayoutOverrides,

        #[arg(long, default_value_t = 120)]
        frames: u64,

        /// Key press as FRAME:KEY (keys: l, a, v, escape, space); repeatable
        #[arg(long = "key")]
        keys: Vec<String>,

        /// JSON key script with {"steps": [{"frame", "key"}]}
        #[arg(long, conflicts_with = "keys")]
        key_script: Option<PathBuf>,

        /// Write one JSON line per frame
        #[arg(long)]
        frame_log: Option<PathBuf>,

        /// Override panel surface size as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_pixels)]
        pixels: Option<(u32, u32)>,

        #[arg(long, value_enum)]
        presentation: Option<PresentationArg>,

        /// Show one billboard panel that turns toward a sweeping camera
        /// instead of the three-panel layout
        #[arg(long)]
        billboard: bool,

        /// Inline mouse click as FRAME:X,Y in 1920x1080 viewport pixels; repeatable
        #[arg(long = "click")]
        clicks: Vec<PointerClick>,
    },
    /// Write the effective configuration to the --config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
struct LayoutOverrides {
    /// arc, right_angle or octagon
    #[arg(long)]
    variant: Option<LayoutVariant>,

    /// Side panel angle in degrees
    #[arg(long)]
    angle: Option<f64>,

    #[arg(long)]
    center_distance: Option<f64>,

    #[arg(long)]
    side_distance: Option<f64>,

    #[arg(long)]
    panel_width: Option<f64>,

    #[arg(long)]
    gap: Option<f64>,
}

impl LayoutOverrides {
    fn apply(&self, config: &mut PanelsConfig) {
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        let layout: &mut LayoutParameters = &mut config.layout;
        if let Some(angle) = self.angle {
            layout.angle_degrees = angle;
        }
        if let Some(value) = self.center_distance {
            layout.center_distance = value;
        }
        if let Some(value) = self.side_distance {
            layout.side_distance = value;
        }
        if let Some(value) = self.panel_width {
            layout.panel_width = value;
        }
        if let Some(value) = self.gap {
            layout.gap = value;
        }
        if let Err(err) = layout.validate() {
            tracing::warn!("{err}");
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PresentationArg {
    Layer,
    Mesh,
}

impl From<PresentationArg> for PresentationMode {
    fn from(arg: PresentationArg) -> Self {
        match arg {
            PresentationArg::Layer => PresentationMode::CompositorLayer,
            PresentationArg::Mesh => PresentationMode::MeshTexture,
        }
    }
}

fn parse_pixels(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| format!("bad pixel size {value:?}"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting xr-panels v{}", env!("CARGO_PKG_VERSION"));
    xr_panels_ui3d::init();

    let cli = Cli::parse();
    let mut config = PanelsConfig::load_from_path(&cli.config);

    match cli.command {
        Command::Layout { overrides, json } => {
            overrides.apply(&mut config);
            let report = LayoutReport::new(config.variant, config.layout);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Compare {
            overrides,
            tolerance,
            json,
        } => {
            overrides.apply(&mut config);
            let report = ComparisonReport::new(config.layout, tolerance);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Simulate {
            overrides,
            frames,
            keys,
            key_script,
            frame_log,
            pixels,
            presentation,
            billboard,
            clicks,
        } => {
            overrides.apply(&mut config);
            if let Some((width, height)) = pixels {
                config.pixel_width = width;
                config.pixel_height = height;
                config.dpr = 1;
            }
            if let Some(mode) = presentation {
                config.presentation = mode.into();
            }

            let mut script = match key_script {
                Some(path) => KeyScript::from_path(&path)?,
                None => KeyScript::from_args(&keys)?,
            };
            let mut sink = frame_log
                .as_ref()
                .map(|path| {
                    JsonlSink::create(path)
                        .with_context(|| format!("creating frame log {}", path.display()))
                })
                .transpose()?;

            let mut scene = if billboard {
                Scene::billboard(&config, Some(CameraSweep::default()))
            } else {
                Scene::from_config(&config)
            };
            for click in clicks {
                scene.queue_click(click);
            }
            let summary = run_simulation(&mut scene, &mut script, frames, sink.as_mut())?;
            println!("{}", serde_json::to_string(&summary)?);
        }
        Command::InitConfig { force } => {
            if cli.config.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    cli.config.display()
                );
            }
            config
                .save_to_path(&cli.config)
                .with_context(|| format!("writing {}", cli.config.display()))?;
            println!("wrote {}", cli.config.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pixels_parse() {
        assert_eq!(parse_pixels("640x360"), Ok((640, 360)));
        assert!(parse_pixels("640").is_err());
        assert!(parse_pixels("0x10").is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "xr-panels",
            "layout",
            "--variant",
            "octagon",
            "--angle",
            "30",
            "--json",
        ])
        .expect("args parse");
        let Command::Layout { overrides, json } = cli.command else {
            panic!("expected layout command");
        };
        assert!(json);
        let mut config = PanelsConfig::default();
        overrides.apply(&mut config);
        assert_eq!(config.variant, LayoutVariant::Octagon);
        assert_eq!(config.layout.angle_degrees, 30.0);
        assert_eq!(config.layout.center_distance, 0.3182);
    }

    #[test]
    fn simulate_collects_repeated_keys() {
        let cli = Cli::try_parse_from([
            "xr-panels",
            "simulate",
            "--frames",
            "3",
            "--key",
            "0:v",
            "--key",
            "1:l",
            "--pixels",
            "16x9",
            "--click",
            "2:960,540",
            "--billboard",
        ])
        .expect("args parse");
        let Command::Simulate {
            frames,
            keys,
            pixels,
            billboard,
            clicks,
            ..
        } = cli.command
        else {
            panic!("expected simulate command");
        };
        assert_eq!(frames, 3);
        assert_eq!(keys, vec!["0:v".to_string(), "1:l".to_string()]);
        assert_eq!(pixels, Some((16, 9)));
        assert!(billboard);
        assert_eq!(
            clicks,
            vec![PointerClick {
                frame: 2,
                x: 960.0,
                y: 540.0,
            }]
        );
    }
}
