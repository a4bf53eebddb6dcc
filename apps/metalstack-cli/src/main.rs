use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use metalstack_core::{NeighborPattern, Stackup, WidthSpacingStart};
use metalstack_io::TechConfig;

use crate::args::{Args, Command};

mod args;

#[derive(Serialize)]
struct TrackReport<'a> {
    metal: &'a str,
    pattern: NeighborPattern,
    tracks: u32,
    #[serde(flatten)]
    geometry: WidthSpacingStart,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let tech = TechConfig::load(&args.config)
        .with_context(|| format!("failed to read {}", args.config.display()))?;
    let stackup = match &args.stackup {
        Some(name) => tech.stackup(name)?,
        None => tech.default_stackup()?,
    };
    log::info!("Using stackup {}", stackup.name());

    run(&stackup, args.command)
}

fn run(stackup: &Stackup, command: Command) -> Result<()> {
    match command {
        Command::List => {
            println!(
                "{:<8} {:>5} {:<15} {:>10} {:>10} {:>10}",
                "metal", "index", "direction", "min_width", "pitch", "offset"
            );
            for m in stackup.metals() {
                println!(
                    "{:<8} {:>5} {:<15} {:>10} {:>10} {:>10}",
                    m.name(),
                    m.index(),
                    m.direction(),
                    m.min_width(),
                    m.pitch(),
                    m.offset()
                );
            }
        }
        Command::Spacing { metal, width } => {
            let m = stackup.get_metal(&metal)?;
            println!("{}", m.get_spacing_for_width(width));
        }
        Command::Pitch { metal, pitch } => {
            let m = stackup.get_metal(&metal)?;
            println!("{}", m.min_spacing_from_pitch(pitch));
        }
        Command::Tracks {
            metal,
            tracks,
            pattern,
            force_even,
        } => {
            let m = stackup.get_metal(&metal)?;
            let geometry = m
                .width_spacing_start(pattern, tracks, force_even)
                .with_context(|| format!("{pattern} over {tracks} track(s) on {metal}"))?;
            let report = TrackReport {
                metal: m.name(),
                pattern,
                tracks,
                geometry,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
