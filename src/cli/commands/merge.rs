//! Multi-model merge command

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::progress::{conversion_spinner, print_done, print_step, CUBE, DISK};
use crate::converter::merge_md3_to_obj_with_progress;
use crate::geometry::ObjExportOptions;

/// Merge several MD3 files into one OBJ.
pub fn run(
    sources: &[PathBuf],
    destination: &Path,
    options: ObjExportOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(
            1,
            2,
            CUBE,
            &format!("Merging {} models", sources.len()),
        );
    }

    let report = if quiet {
        merge_md3_to_obj_with_progress(sources, destination, options, &|_| {})?
    } else {
        let spinner = conversion_spinner();
        let result = merge_md3_to_obj_with_progress(sources, destination, options, &|msg| {
            spinner.set_message(msg.to_string());
        });
        spinner.finish_and_clear();
        result?
    };

    for skipped in &report.skipped {
        eprintln!("warning: skipped unreadable input {}", skipped.display());
    }

    if !quiet {
        print_step(
            2,
            2,
            DISK,
            &format!(
                "Merged {} of {} models into {}",
                report.loaded,
                sources.len(),
                report.output.display()
            ),
        );
        print_done(started.elapsed());
    }

    Ok(())
}
