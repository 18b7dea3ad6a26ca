use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pdfcam::{ImportOptions, Unit};

/// Convert decompressed PDF content streams into layered CAM geometry.
#[derive(Debug, Parser)]
#[command(name = "pdfcam", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a content stream and print its layers
    Import {
        /// Path to the decompressed content stream ('-' reads stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ImportFormat::Json)]
        format: ImportFormat,

        #[command(flatten)]
        options: ImportArgs,
    },

    /// Synthesize drill holes from white-filled geometry
    Drills {
        /// Path to the decompressed content stream ('-' reads stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = DrillFormat::Text)]
        format: DrillFormat,

        #[command(flatten)]
        options: ImportArgs,
    },
}

/// Flags shared by every subcommand that runs an import.
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Target unit for all coordinates and widths
    #[arg(long, value_enum, default_value_t = UnitArg::Mm)]
    pub unit: UnitArg,

    /// Segments per Bézier curve and per round join
    #[arg(long, default_value_t = 64)]
    pub steps: u32,

    /// First aperture id to allocate
    #[arg(long = "start-id", default_value_t = 10)]
    pub start_id: u32,
}

impl ImportArgs {
    pub fn to_options(&self) -> ImportOptions {
        ImportOptions {
            target_unit: self.unit.into(),
            curve_steps: self.steps,
            starting_aperture_id: self.start_id,
        }
    }
}

/// Output format for the import subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportFormat {
    /// The full layer dictionary as JSON
    Json,
    /// One line per layer
    Summary,
}

/// Output format for the drills subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DrillFormat {
    /// Tab-separated x, y and diameter
    Text,
    /// JSON array of drills
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    /// Millimetres
    Mm,
    /// Inches
    In,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Mm => Unit::Millimeter,
            UnitArg::In => Unit::Inch,
        }
    }
}
