//! Single-file MD3 → OBJ conversion command

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{conversion_spinner, print_done, print_step, CUBE, DISK};
use crate::converter::convert_md3_to_obj_with_progress;
use crate::geometry::ObjExportOptions;

/// Convert one MD3 file, writing one OBJ per animation frame.
pub fn run(
    source: &Path,
    destination: Option<&Path>,
    options: ObjExportOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 2, CUBE, &format!("Converting {}", source.display()));
    }

    let report = if quiet {
        convert_md3_to_obj_with_progress(source, destination, options, &|_| {})?
    } else {
        let spinner = conversion_spinner();
        let result = convert_md3_to_obj_with_progress(source, destination, options, &|msg| {
            spinner.set_message(msg.to_string());
        });
        spinner.finish_and_clear();
        result?
    };

    if !quiet {
        print_step(
            2,
            2,
            DISK,
            &format!(
                "Model \"{}\": {} frame(s), {} file(s) written",
                report.model_name,
                report.frames,
                report.outputs.len()
            ),
        );
        for output in &report.outputs {
            println!("  {}", output.display());
        }
        print_done(started.elapsed());
    }

    Ok(())
}
