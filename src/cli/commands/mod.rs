//! CLI subcommand definitions and dispatch

pub mod convert;
pub mod inspect;
pub mod merge;

use clap::Subcommand;
use std::path::PathBuf;

use crate::geometry::ObjExportOptions;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an MD3 file to OBJ (one file per animation frame)
    Convert {
        /// Source MD3 file
        source: PathBuf,

        /// Output base path (defaults to the source path with .obj)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Keep the V texture coordinate unflipped
        #[arg(long)]
        no_flip_uvs: bool,

        /// Keep the MD3 Z-up axes (reverses face winding instead)
        #[arg(long)]
        no_swap_yz: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Merge multiple MD3 files into one OBJ using their attachment tags
    Merge {
        /// Output OBJ file
        #[arg(short, long)]
        destination: PathBuf,

        /// Input MD3 files (at least two must decode successfully)
        #[arg(required = true, num_args = 2..)]
        sources: Vec<PathBuf>,

        /// Keep the V texture coordinate unflipped
        #[arg(long)]
        no_flip_uvs: bool,

        /// Keep the MD3 Z-up axes (reverses face winding instead)
        #[arg(long)]
        no_swap_yz: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Inspect an MD3 file and display its structure
    Inspect {
        /// Source MD3 file
        source: PathBuf,

        /// Emit the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                source,
                destination,
                no_flip_uvs,
                no_swap_yz,
                quiet,
            } => convert::run(
                &source,
                destination.as_deref(),
                export_options(no_flip_uvs, no_swap_yz),
                quiet,
            ),
            Commands::Merge {
                destination,
                sources,
                no_flip_uvs,
                no_swap_yz,
                quiet,
            } => merge::run(
                &sources,
                &destination,
                export_options(no_flip_uvs, no_swap_yz),
                quiet,
            ),
            Commands::Inspect { source, json } => inspect::run(&source, json),
        }
    }
}

fn export_options(no_flip_uvs: bool, no_swap_yz: bool) -> ObjExportOptions {
    ObjExportOptions {
        swap_yz: !no_swap_yz,
        flip_uvs: !no_flip_uvs,
    }
}
