#![deny(unsafe_code)]
//! CLI binary for the cornerfield corner-alignment simulator.
//!
//! Subcommands:
//! - `render <engine>` — compute one field, write a PNG heatmap
//! - `animate <engine>` — sweep theta, write numbered PNG frames
//! - `list` — print available engines and palettes

mod error;

use clap::{Parser, Subcommand};
use cornerfield_core::{Engine, Palette};
use cornerfield_engines::cache::{FieldCache, DEFAULT_CACHE_CAPACITY};
use cornerfield_engines::playback::Playback;
use cornerfield_engines::{snapshot, EngineKind};
use cornerfield_unfold::UnfoldParams;
use error::CliError;
use serde_json::Value;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "cornerfield", about = "Corner-alignment time field CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute one field and write a PNG heatmap.
    Render {
        /// Engine name (e.g. "corner-time").
        #[arg(default_value = "corner-time")]
        engine: String,

        /// Samples per axis of the start-position grid.
        #[arg(short, long, default_value_t = 100)]
        resolution: usize,

        /// Travel angle in radians (wraps at 2pi).
        #[arg(short, long, default_value_t = 0.785)]
        theta: f64,

        /// Palette name (blues, viridis, magma, grayscale).
        #[arg(short, long, default_value = "blues")]
        palette: String,

        /// Output file path.
        #[arg(short, long, default_value = "heatmap.png")]
        output: PathBuf,

        /// Engine parameters as a JSON string
        /// (speed, mirror_range, tolerance, sentinel, outer_width, ...).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Sweep theta and write numbered PNG frames.
    Animate {
        /// Engine name (e.g. "corner-time").
        #[arg(default_value = "corner-time")]
        engine: String,

        /// Samples per axis of the start-position grid.
        #[arg(short, long, default_value_t = 100)]
        resolution: usize,

        /// Starting angle in radians.
        #[arg(long, default_value_t = 0.0)]
        theta_start: f64,

        /// Angle advance per frame in radians.
        #[arg(long, default_value_t = 0.1)]
        theta_step: f64,

        /// Number of frames to write (63 covers a full sweep at step 0.1).
        #[arg(short, long, default_value_t = 63)]
        frames: usize,

        /// Sleep between frames in milliseconds.
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,

        /// Palette name (blues, viridis, magma, grayscale).
        #[arg(short, long, default_value = "blues")]
        palette: String,

        /// Directory for the numbered frame files.
        #[arg(short, long, default_value = "frames")]
        output_dir: PathBuf,

        /// Engine parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available engines and palettes.
    List,
}

/// Parses `--params` and overlays the `theta` flag onto the object.
fn parse_params(raw: &str, theta: f64) -> Result<Value, CliError> {
    let mut params: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let obj = params
        .as_object_mut()
        .ok_or_else(|| CliError::Input("--params must be a JSON object".into()))?;
    obj.insert("theta".into(), theta.into());
    Ok(params)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "engines": engines,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Render {
            engine,
            resolution,
            theta,
            palette,
            output,
            params,
        } => {
            let params = parse_params(&params, theta)?;
            let palette =
                Palette::from_name(&palette).map_err(|e| CliError::Input(e.to_string()))?;

            let started = Instant::now();
            let eng = EngineKind::from_name(&engine, resolution, &params)?;
            log::info!(
                "computed {resolution}x{resolution} field at theta {theta:.3} in {:?}",
                started.elapsed()
            );

            let sentinel = eng.params()["sentinel"].as_f64().unwrap_or(10_000.0);
            snapshot::write_png(eng.field(), &palette, sentinel, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "engine": engine,
                    "resolution": resolution,
                    "theta": theta,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {engine} ({resolution}x{resolution}, theta {theta:.3}) -> {}",
                    output.display()
                );
            }
        }
        Command::Animate {
            engine,
            resolution,
            theta_start,
            theta_step,
            frames,
            delay_ms,
            palette,
            output_dir,
            params,
        } => {
            if !EngineKind::list_engines().contains(&engine.as_str()) {
                return Err(cornerfield_core::FieldError::UnknownEngine(engine).into());
            }
            let params = parse_params(&params, theta_start)?;
            let palette =
                Palette::from_name(&palette).map_err(|e| CliError::Input(e.to_string()))?;
            let base = UnfoldParams::from_json(&params);

            std::fs::create_dir_all(&output_dir)
                .map_err(|e| CliError::Io(format!("cannot create {}: {e}", output_dir.display())))?;

            let mut playback = Playback::new(theta_start, theta_step);
            playback.play();
            let mut cache = FieldCache::new(DEFAULT_CACHE_CAPACITY);

            let mut theta = playback.theta();
            for frame in 0..frames {
                let frame_params = UnfoldParams { theta, ..base };
                let started = Instant::now();
                let solution = cache.get_or_solve(resolution, &frame_params)?;
                log::debug!(
                    "frame {frame}: theta {theta:.3} in {:?}",
                    started.elapsed()
                );

                let path = output_dir.join(format!("frame_{frame:04}.png"));
                snapshot::write_png(&solution.field, &palette, frame_params.sentinel, &path)?;

                if delay_ms > 0 {
                    std::thread::sleep(Duration::from_millis(delay_ms));
                }
                match playback.advance() {
                    Some(next) => theta = next,
                    None => break,
                }
            }
            log::info!("wrote {frames} frames ({} cached fields)", cache.len());

            if cli.json {
                let info = serde_json::json!({
                    "engine": engine,
                    "resolution": resolution,
                    "frames": frames,
                    "theta_start": theta_start,
                    "theta_step": theta_step,
                    "output_dir": output_dir.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "animated {engine} ({resolution}x{resolution}, {frames} frames) -> {}",
                    output_dir.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
