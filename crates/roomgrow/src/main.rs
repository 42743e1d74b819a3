//! roomgrow: room-growing dungeon generator
//!
//! Grows rooms on a blank or masked surface and writes the result as PNG,
//! JSON or text.

mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};
use thiserror::Error;

use rg_core::{
    build_with_rng, BuildError, BuildOptions, BuildOutput, BuildPhase, DungeonBuilder,
    DungeonRng, MapSpec, PixelBuffer,
};
use rg_export::ExportError;

/// Grow a dungeon of rectangular rooms joined by doors
#[derive(Parser, Debug)]
#[command(name = "roomgrow")]
#[command(author, version, about = "Grow a dungeon of rooms and doors", long_about = None)]
struct Args {
    /// Surface width in cells
    #[arg(long, default_value_t = 256, conflicts_with = "mask")]
    width: u32,

    /// Surface height in cells
    #[arg(long, default_value_t = 256, conflicts_with = "mask")]
    height: u32,

    /// PNG whose transparent pixels mark where rooms may grow
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// Seed grid divisions along the shorter side
    #[arg(short, long = "grid-size")]
    grid_size: Option<u32>,

    /// Maximum seed jitter in cells
    #[arg(short, long)]
    wiggle: Option<f64>,

    /// Probability that a seed candidate is kept
    #[arg(short, long)]
    frequency: Option<f64>,

    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with build options; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the dungeon as PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell in the PNG
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Write the room description as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the dungeon as text
    #[arg(short, long)]
    ascii: bool,

    /// Grow one tick at a time, logging each one
    #[arg(long)]
    animate: bool,

    /// More logging (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Options from the config file, if any, with flags applied on top
fn resolve_options(args: &Args) -> Result<BuildOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => rg_export::load_options(path)?,
        None => BuildOptions::default(),
    };
    if let Some(grid_size) = args.grid_size {
        options.room_grid_size = grid_size;
    }
    if let Some(wiggle) = args.wiggle {
        options.wiggle = wiggle;
    }
    if let Some(frequency) = args.frequency {
        options.frequency = frequency;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    options.validate()?;
    Ok(options)
}

fn load_map(args: &Args) -> Result<MapSpec, CliError> {
    Ok(match &args.mask {
        Some(path) => MapSpec::Surface(rg_export::load_mask(path)?),
        None => MapSpec::Size {
            width: args.width,
            height: args.height,
        },
    })
}

/// Drive the build tick by tick
fn animate(
    map: MapSpec,
    options: BuildOptions,
    rng: &mut DungeonRng,
) -> Result<BuildOutput<PixelBuffer>, CliError> {
    let mut builder = DungeonBuilder::new(map.into_surface(), options)?;
    let planted = builder.seed(rng);
    info!("Planted {planted} rooms");

    while builder.advance() == BuildPhase::Growing {
        let active = builder.rooms().iter().filter(|r| r.is_active()).count();
        info!("Tick {}: {active} rooms still growing", builder.ticks());
    }
    Ok(builder.into_output())
}

fn run(args: &Args) -> Result<(), CliError> {
    let options = resolve_options(args)?;
    let map = load_map(args)?;

    let mut rng = match options.seed {
        Some(seed) => DungeonRng::new(seed),
        None => DungeonRng::from_entropy(),
    };
    info!("Using seed {}", rng.seed());
    debug!("{options:?}");

    let output = if args.animate {
        animate(map, options, &mut rng)?
    } else {
        build_with_rng(map, &options, &mut rng)?
    };

    if let Some(path) = &args.png {
        rg_export::save_png(&output.surface, path, args.scale)?;
        info!("Wrote {}", path.display());
    }
    if let Some(path) = &args.json {
        rg_export::write_room_info(&output.info, path)?;
        info!("Wrote {}", path.display());
    }
    if args.ascii || (args.png.is_none() && args.json.is_none()) {
        print!("{}", rg_export::render_ascii(&output.surface, &output.info));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
