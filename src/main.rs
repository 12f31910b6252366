//! Command-line front end for fNIRS layout checks.
//!
//! ```bash
//! nirs-layout validate layout.parquet
//! nirs-layout distances layout.json --picks "S1_D1 760,S1_D2 760"
//! nirs-layout short layout.csv --threshold 0.015
//! nirs-layout spread-bads layout.json --output fixed.json
//! RUST_LOG=debug nirs-layout report layout.parquet
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use nirs_layout::info::loader::{load_file, save_json};
use nirs_layout::info::{MeasInfo, Picks};
use nirs_layout::nirs::{
    fnirs_optode_names, fnirs_spread_bads, short_channels, source_detector_distances,
    validate_nirs_info, DEFAULT_SHORT_THRESHOLD,
};
use nirs_layout::LayoutReport;

#[derive(Parser, Debug)]
#[command(name = "nirs-layout")]
#[command(version, about = "Validate fNIRS channel layouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check channel pairing, naming and bad labelling
    Validate {
        file: PathBuf,

        /// Print an empty pick list instead of failing on naming errors
        #[arg(long)]
        no_throw: bool,
    },

    /// Source-detector distance per channel
    Distances {
        file: PathBuf,

        /// Comma-separated channel names (default: all channels)
        #[arg(long, value_delimiter = ',')]
        picks: Option<Vec<String>>,
    },

    /// Flag channels shorter than a threshold
    Short {
        file: PathBuf,

        /// Threshold distance in location units (metres)
        #[arg(short, long, default_value_t = DEFAULT_SHORT_THRESHOLD)]
        threshold: f64,
    },

    /// List source and detector names
    Optodes { file: PathBuf },

    /// Mark both channels of a pair bad when either one is
    SpreadBads {
        file: PathBuf,

        /// Write the updated layout here as JSON (default: print the bad list)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Full summary of a layout
    Report {
        file: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_SHORT_THRESHOLD)]
        threshold: f64,
    },
}

fn load(path: &Path) -> Result<MeasInfo> {
    load_file(path).with_context(|| format!("loading {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct NamedValue<T> {
    name: String,
    value: T,
}

fn named<T>(info: &MeasInfo, idx: &[usize], values: Vec<T>) -> Vec<NamedValue<T>> {
    idx.iter()
        .zip(values)
        .map(|(&i, value)| NamedValue {
            name: info.chs[i].name.clone(),
            value,
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file, no_throw } => {
            let info = load(&file)?;
            let picks = validate_nirs_info(&info, !no_throw)?;
            info!("{} of {} channels are valid fNIRS picks", picks.len(), info.len());
            print_json(&picks)?;
        }
        Commands::Distances { file, picks } => {
            let info = load(&file)?;
            let picks = picks.map_or(Picks::All, Picks::Names);
            let idx = nirs_layout::info::pick_indices(&info, &picks)?;
            let dists = source_detector_distances(&info, &picks)?;
            print_json(&named(&info, &idx, dists))?;
        }
        Commands::Short { file, threshold } => {
            let info = load(&file)?;
            let idx: Vec<usize> = (0..info.len()).collect();
            print_json(&named(&info, &idx, short_channels(&info, threshold)))?;
        }
        Commands::Optodes { file } => {
            let info = load(&file)?;
            let (sources, detectors) = fnirs_optode_names(&info)?;
            print_json(&serde_json::json!({ "sources": sources, "detectors": detectors }))?;
        }
        Commands::SpreadBads { file, output } => {
            let mut info = load(&file)?;
            let before = info.bads.len();
            fnirs_spread_bads(&mut info);
            info!("bad channels: {before} -> {}", info.bads.len());
            match output {
                Some(out) => {
                    save_json(&info, &out)
                        .with_context(|| format!("writing {}", out.display()))?;
                    info!("wrote {}", out.display());
                }
                None => print_json(&info.bads)?,
            }
        }
        Commands::Report { file, threshold } => {
            let info = load(&file)?;
            print_json(&LayoutReport::build(&info, threshold))?;
        }
    }

    Ok(())
}
