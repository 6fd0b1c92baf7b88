//! Command line front end for morphfield.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use morphfield::config::{PARTICLE_COUNT, VIEWPORT_HEIGHT};
use morphfield::prelude::*;
use morphfield::window;

#[derive(Parser)]
#[command(name = "morphfield")]
#[command(about = "Morphing particle field animations", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window running the morphing particle field
    Field {
        /// Number of particles
        #[arg(long, default_value_t = PARTICLE_COUNT)]
        particles: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1280)]
        width: u32,

        #[arg(long, default_value_t = VIEWPORT_HEIGHT as u32)]
        height: u32,
    },

    /// Open a window with particles settling into a glyph
    Glyph {
        /// Character to draw
        #[arg(long = "char", default_value_t = '?')]
        glyph: char,

        #[arg(long, default_value_t = 800)]
        width: u32,

        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render frames to PNG files without opening a window
    Render {
        /// Frames to simulate
        #[arg(long, default_value_t = 400)]
        frames: u32,

        /// Save every K-th frame
        #[arg(long, default_value_t = 50)]
        every: u32,

        /// Output directory
        #[arg(long, default_value = "frames")]
        out: PathBuf,

        /// Number of particles (field only)
        #[arg(long, default_value_t = PARTICLE_COUNT)]
        particles: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1280)]
        width: u32,

        #[arg(long, default_value_t = VIEWPORT_HEIGHT as u32)]
        height: u32,

        /// Render the glyph converter for this character instead of the field
        #[arg(long)]
        glyph: Option<char>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Field {
            particles,
            seed,
            width,
            height,
        } => {
            let config = FieldConfig::default()
                .with_particle_count(particles);
            let field = ParticleField::with_rng(config, width as f32, height as f32, rng(seed));
            let options = HostOptions::new("morphfield")
                .with_size(width, height)
                .with_fixed_height(height);
            window::run(field, options).context("window host failed")
        }

        Commands::Glyph {
            glyph,
            width,
            height,
            seed,
        } => {
            let config = GlyphFieldConfig::default();
            let background = config.background;
            let field = glyph_field(glyph, width, height, config, seed);
            let options = HostOptions::new(format!("morphfield {}", glyph))
                .with_size(width, height)
                .with_background(background);
            window::run(field, options).context("window host failed")
        }

        Commands::Render {
            frames,
            every,
            out,
            particles,
            seed,
            width,
            height,
            glyph,
        } => {
            std::fs::create_dir_all(&out)
                .with_context(|| format!("cannot create output directory {}", out.display()))?;

            let written = match glyph {
                Some(glyph) => {
                    let config = GlyphFieldConfig::default();
                    let background = config.background;
                    let field = glyph_field(glyph, width, height, config, seed);
                    let canvas = PixmapCanvas::with_background(width, height, background)?;
                    render_frames(field, canvas, frames, every, &out)?
                }
                None => {
                    let config = FieldConfig::default()
                        .with_particle_count(particles);
                    let background = config.background;
                    let field = ParticleField::with_rng(config, width as f32, height as f32, rng(seed));
                    let canvas = PixmapCanvas::with_background(width, height, background)?;
                    render_frames(field, canvas, frames, every, &out)?
                }
            };

            println!("Wrote {} frames to {}", written, out.display());
            Ok(())
        }
    }
}

fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

fn glyph_field(glyph: char, width: u32, height: u32, config: GlyphFieldConfig, seed: Option<u64>) -> GlyphField {
    let mut fonts = FontRasterizer::new();
    let field = GlyphField::rasterized(
        glyph,
        width as usize,
        height as usize,
        &mut fonts,
        config,
        &mut rng(seed),
    );
    if field.is_empty() {
        log::warn!("glyph {:?} produced no particles", glyph);
    }
    field
}

/// Run `frames` frames and save every `every`-th one. Returns the number of files written.
fn render_frames<A: Animation>(animation: A, canvas: PixmapCanvas, frames: u32, every: u32, out: &Path) -> Result<u32> {
    let every = every.max(1);
    let Some(mut mount) = Mount::new(animation, Some(canvas)) else {
        return Ok(0);
    };

    let mut written = 0;
    for frame in 1..=frames {
        mount.tick();
        if frame % every == 0 {
            let path = out.join(format!("frame_{:05}.png", frame));
            mount
                .surface()
                .save_png(&path)
                .with_context(|| format!("cannot write {}", path.display()))?;
            log::debug!("saved {}", path.display());
            written += 1;
        }
    }
    mount.unmount();
    Ok(written)
}
