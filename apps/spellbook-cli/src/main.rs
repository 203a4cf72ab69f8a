use clap::{Parser, Subcommand};
use spellbook_input::SceneAction;
use spellbook_render::DebugTextRenderer;
use spellbook_scene::{SceneConfig, SpellbookScene};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spellbook-cli", about = "Headless driver for the spellbook scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the scene for a number of frames and print the final state
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Scene config file (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Feed a synthetic pointer sweep across the viewport, one event per frame
        #[arg(long)]
        sweep: bool,
        /// Shortcut keys applied before the first frame (l: light, f/o: follow on/off)
        #[arg(long, default_value = "")]
        keys: String,
    },
    /// Print the default scene config as YAML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("spellbook-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", spellbook_render::crate_info());
            println!(
                "particles: default angle step {} rad/frame",
                spellbook_particles::DEFAULT_ANGLE_STEP
            );
        }
        Commands::Run {
            frames,
            config,
            sweep,
            keys,
        } => {
            let config = match config {
                Some(path) => SceneConfig::load(&path)?,
                None => SceneConfig::default(),
            };
            let (width, height) = (config.viewport.width, config.viewport.height);
            let mut scene = SpellbookScene::new(config)?;

            for key in keys.chars() {
                scene.apply(SceneAction::from_shortcut(key));
            }

            let mut delivered = 0u64;
            for frame in 0..frames {
                if sweep {
                    let (px, py) = sweep_point(frame, width, height);
                    if scene.pointer_moved(px, py) {
                        delivered += 1;
                    }
                }
                scene.frame();
            }
            tracing::info!(frames, delivered, "run finished");

            print!("{}", scene.render(&DebugTextRenderer::new()));
            for (i, field) in scene.fields().enumerate() {
                match field.light_position() {
                    Some(p) => println!(
                        "field {i}: {} particles, light at ({:.3}, {:.3}, {:.3})",
                        field.count(),
                        p.x,
                        p.y,
                        p.z
                    ),
                    None => println!("field {i}: {} particles, no light", field.count()),
                }
            }
        }
        Commands::Config => {
            print!("{}", SceneConfig::default().to_yaml()?);
        }
    }

    Ok(())
}

/// Lissajous path over the viewport in pixel coordinates.
fn sweep_point(frame: u64, width: f32, height: f32) -> (f32, f32) {
    let t = frame as f32 * 0.05;
    let px = (0.5 + 0.5 * t.sin()) * width;
    let py = (0.5 + 0.5 * (t * 0.7).cos()) * height;
    (px, py)
}
