//! MD3 to OBJ converter
//!
//! Two modes: single-file (each animation frame becomes its own OBJ
//! document) and merge (the first frames of several models combined into
//! one OBJ, placed by their attachment tags).

mod obj_writer;

pub use obj_writer::{base_indices, write_merged_obj, write_obj_frame};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::converter::ProgressCallback;
use crate::error::{Error, Result};
use crate::formats::md3::model::Md3Model;
use crate::geometry::ObjExportOptions;

/// Outcome of a single-file conversion.
#[derive(Debug)]
pub struct ConversionReport {
    /// Display name from the model header.
    pub model_name: String,
    /// Frame count of the source model.
    pub frames: usize,
    /// Output files written, one per frame.
    pub outputs: Vec<PathBuf>,
}

/// Outcome of a merge conversion.
#[derive(Debug)]
pub struct MergeReport {
    /// Number of inputs that decoded successfully.
    pub loaded: usize,
    /// Inputs that failed to decode and were skipped.
    pub skipped: Vec<PathBuf>,
    /// The combined output file.
    pub output: PathBuf,
}

/// Output path for one frame. Multi-frame models get `{stem}+{frame}.obj`
/// so every frame's file name is deterministic; single-frame models get
/// plain `{stem}.obj`.
pub fn frame_output_path(base: &Path, frame: usize, multi_frame: bool) -> PathBuf {
    let stem = base
        .file_stem()
        .map_or_else(|| "model".to_string(), |s| s.to_string_lossy().into_owned());
    let name = if multi_frame {
        format!("{stem}+{frame}.obj")
    } else {
        format!("{stem}.obj")
    };
    base.parent().map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
}

/// Convert one MD3 file to OBJ, one output per animation frame.
///
/// `output` sets the base name for the generated files; it defaults to
/// the input path. A frame that fails to write is reported and the
/// remaining frames are still attempted; the conversion as a whole fails
/// afterwards if any frame failed. Partially written files are left in
/// place.
pub fn convert_md3_to_obj(
    input: &Path,
    output: Option<&Path>,
    options: ObjExportOptions,
) -> Result<ConversionReport> {
    convert_md3_to_obj_with_progress(input, output, options, &|_| {})
}

/// [`convert_md3_to_obj`] with a per-step progress callback.
pub fn convert_md3_to_obj_with_progress(
    input: &Path,
    output: Option<&Path>,
    options: ObjExportOptions,
    progress: ProgressCallback,
) -> Result<ConversionReport> {
    progress(&format!("Decoding {}", input.display()));
    let model = Md3Model::read_file(input)?;
    let base = output.unwrap_or(input);
    let frames = model.header.num_frames as usize;

    tracing::debug!(
        model = %model.header.name,
        frames,
        surfaces = model.surfaces.len(),
        "decoded MD3 model"
    );

    let mut outputs = Vec::with_capacity(frames);
    let mut failures: Vec<Error> = Vec::new();

    for frame in 0..frames {
        let path = frame_output_path(base, frame, frames > 1);
        progress(&format!("Writing frame {frame} to {}", path.display()));
        match write_frame_file(&path, &model, frame, options) {
            Ok(()) => outputs.push(path),
            Err(e) => {
                tracing::warn!(frame, path = %path.display(), error = %e, "failed to write frame");
                failures.push(e);
            }
        }
    }

    if let Some(first) = failures.first() {
        return Err(Error::FrameWritePartialFailure {
            total: frames,
            failed: failures.len(),
            first_error: first.to_string(),
        });
    }

    Ok(ConversionReport {
        model_name: model.header.name.clone(),
        frames,
        outputs,
    })
}

/// Merge several MD3 files into one OBJ, using only each model's first
/// frame, placed by its first attachment tag when present.
///
/// Inputs that fail to decode are skipped with a warning; at least two
/// must decode for the merge to proceed. Emission order equals input
/// order, which fixes the global index numbering.
pub fn merge_md3_to_obj(
    inputs: &[PathBuf],
    output: &Path,
    options: ObjExportOptions,
) -> Result<MergeReport> {
    merge_md3_to_obj_with_progress(inputs, output, options, &|_| {})
}

/// [`merge_md3_to_obj`] with a per-step progress callback.
pub fn merge_md3_to_obj_with_progress(
    inputs: &[PathBuf],
    output: &Path,
    options: ObjExportOptions,
    progress: ProgressCallback,
) -> Result<MergeReport> {
    let mut models = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();

    for input in inputs {
        progress(&format!("Decoding {}", input.display()));
        match Md3Model::read_file(input) {
            Ok(model) => models.push(model),
            Err(e) => {
                tracing::warn!(input = %input.display(), error = %e, "skipping unreadable merge input");
                skipped.push(input.clone());
            }
        }
    }

    if models.len() < 2 {
        return Err(Error::InsufficientMergeInputs {
            loaded: models.len(),
            requested: inputs.len(),
        });
    }

    progress(&format!(
        "Merging {} models into {}",
        models.len(),
        output.display()
    ));
    let mut out = BufWriter::new(File::create(output)?);
    write_merged_obj(&mut out, &models, options).map_err(|e| Error::ObjWriteFailed {
        path: output.to_path_buf(),
        message: e.to_string(),
    })?;
    out.flush()?;

    Ok(MergeReport {
        loaded: models.len(),
        skipped,
        output: output.to_path_buf(),
    })
}

fn write_frame_file(
    path: &Path,
    model: &Md3Model,
    frame: usize,
    options: ObjExportOptions,
) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj_frame(&mut out, model, frame, options)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frame_output_path_single() {
        let path = frame_output_path(Path::new("models/foo.md3"), 0, false);
        assert_eq!(path, Path::new("models/foo.obj"));
    }

    #[test]
    fn test_frame_output_path_multi() {
        let path = frame_output_path(Path::new("models/foo.md3"), 7, true);
        assert_eq!(path, Path::new("models/foo+7.obj"));
    }

    #[test]
    fn test_frame_output_path_bare_name() {
        let path = frame_output_path(Path::new("foo"), 2, true);
        assert_eq!(path, Path::new("foo+2.obj"));
    }
}
