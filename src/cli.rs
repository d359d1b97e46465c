use clap::{Parser, Subcommand, ValueEnum};
use sceneprep::detect::DetectMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sceneprep")]
#[command(author, version, about = "Scene-split and review-staging pipeline for disc-ripped video")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which external tool performs the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    /// Lossless one-pass remux split
    Mkvmerge,
    /// Per-scene extraction; stream-copy with --copy, re-encode otherwise
    Ffmpeg,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory skeleton and an example config
    Init,

    /// Rip all long-enough titles from a disc into the sources directory
    Rip {
        /// Disc identifier to rip from
        #[arg(long, default_value = "0")]
        disc: String,

        /// Minimum title length to rip, in seconds
        #[arg(long, default_value_t = 1200)]
        minlength: u32,

        /// Output directory (defaults to <data_root>/sources)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run the external scene detector and save its CSV
    Detect {
        /// Input video to analyze
        #[arg(required = true)]
        input: PathBuf,

        /// Directory for the scene CSV (defaults to <data_root>/scenedetect/<stem>)
        #[arg(long)]
        outdir: Option<PathBuf>,

        /// Detection algorithm
        #[arg(long, value_enum, default_value = "adaptive")]
        mode: DetectMode,

        /// Detection threshold (content mode only)
        #[arg(long)]
        threshold: Option<u32>,
    },

    /// Split a source video into per-scene clips from a detector CSV
    Split {
        /// Source video to split
        #[arg(required = true)]
        input: PathBuf,

        /// Scene table CSV produced by the detector
        #[arg(long)]
        csv: PathBuf,

        /// Directory to write clips into
        #[arg(long)]
        outdir: PathBuf,

        /// Split backend
        #[arg(long, value_enum, default_value = "mkvmerge")]
        engine: EngineArg,

        /// Stream-copy instead of re-encoding (ffmpeg engine only)
        #[arg(long)]
        copy: bool,
    },

    /// Stage a clips directory for human review
    Review {
        /// Directory of clips to stage
        #[arg(required = true)]
        clips_dir: PathBuf,

        /// Review workspace root (defaults to <data_root>/review)
        #[arg(long)]
        review_root: Option<PathBuf>,
    },

    /// Probe all clips and write a metadata CSV
    Metadata {
        /// Clips tree to walk (defaults to <data_root>/clips)
        clips_root: Option<PathBuf>,

        /// Output CSV path (defaults to <data_root>/clips_metadata.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check that required external tools are available
    CheckTools,
}
