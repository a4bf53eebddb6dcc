use clap::{Parser, Subcommand};
use std::path::PathBuf;

use metalstack_core::NeighborPattern;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON technology file.
    #[arg(short, long, default_value = "tech.json")]
    pub config: PathBuf,

    /// Stackup to query. Defaults to the first stackup in the file.
    #[arg(short, long)]
    pub stackup: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the metals of the stackup.
    List,

    /// Minimum spacing for a wire of the given width.
    Spacing {
        #[arg(short, long)]
        metal: String,
        #[arg(short, long)]
        width: f64,
    },

    /// Spacing forced on the widest wire that fits the given pitch.
    Pitch {
        #[arg(short, long)]
        metal: String,
        #[arg(short, long)]
        pitch: f64,
    },

    /// Widest wire(s) consuming a number of routing tracks.
    Tracks {
        #[arg(short, long)]
        metal: String,
        #[arg(short, long)]
        tracks: u32,
        /// Neighbor pattern: twt, twwt or www.
        #[arg(short, long, default_value = "twt")]
        pattern: NeighborPattern,
        /// Force an even width (TWWT only).
        #[arg(long)]
        force_even: bool,
    },
}
