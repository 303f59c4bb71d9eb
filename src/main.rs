//! world-exporter: scene dump → world asset
//!
//! Usage:
//!   world-exporter scene.ron                     # print the asset to stdout
//!   world-exporter scene.json -o level.world     # write a file
//!   world-exporter scene.ron -o level.world --compress --verify

use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use world_exporter::world::{load_world_from_str, save_world};
use world_exporter::{export_scene, scene, ExportConfig, VERSION};

#[derive(Parser)]
#[command(name = "world-exporter")]
#[command(version = VERSION)]
#[command(about = "Export an authored scene dump to a RON world asset")]
struct Cli {
    /// Scene dump (RON or JSON, optionally brotli-compressed)
    scene: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to <config dir>/world-exporter/config.ron)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Brotli-compress the output file
    #[arg(long)]
    compress: bool,

    /// Parse the rendered asset back before writing it
    #[arg(long)]
    verify: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ExportConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load config")?;
    config.compress |= cli.compress;
    config.verify |= cli.verify;

    let dump = scene::load_scene(&cli.scene)
        .with_context(|| format!("Failed to load scene {}", cli.scene.display()))?;
    if !dump.scene.is_empty() {
        log::info!("exporting scene '{}'", dump.scene);
    }

    let report = export_scene(&dump.nodes, &config);

    let text = report.asset.to_ron_string();
    if config.verify {
        let world = load_world_from_str(&text).context("Rendered asset failed to load back")?;
        log::info!("verified {} entities", world.len());
    }

    match &cli.output {
        Some(path) => {
            save_world(&text, path, config.compress)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            if config.compress {
                log::warn!("--compress ignored when writing to stdout");
            }
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
