use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Atelier: bridal storefront tools and the 3D gown previewer.
#[derive(Parser, Debug)]
#[command(name = "atelier", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter override, e.g. `debug` or `atelier=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a splat viewer window for a `.splat` or `.ply` URL.
    View {
        url: String,
        /// Draw the selection outline from the start.
        #[arg(long)]
        selected: bool,
        /// Plain splats without sparkle or outline.
        #[arg(long)]
        plain: bool,
    },

    /// List booked dates, and optionally check a range against them.
    Availability {
        /// JSON array of bookings.
        #[arg(long)]
        bookings: PathBuf,
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },

    /// Validate a rental request and print its price breakdown.
    Quote {
        #[arg(long)]
        bookings: PathBuf,
        /// Daily rental rate in whole currency units.
        #[arg(long)]
        rate: u64,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Override today's date.
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Fetch a model through the proxy and report what it relays.
    Fetch {
        url: String,
        /// Forwarded `Range` header, e.g. `bytes=0-1023`.
        #[arg(long)]
        range: Option<String>,
        /// Write the body here instead of discarding it.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run the mock video-to-3D conversion.
    Convert { video_name: String },

    /// Print the effective configuration as JSON.
    Config,
}

pub fn parse() -> Args {
    Args::parse()
}
