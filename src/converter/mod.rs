//! Format conversion utilities
//!
//! MD3 → OBJ is the only conversion: single-file mode emits one OBJ per
//! animation frame, merge mode combines several models into one OBJ.

pub mod md3_to_obj;

/// Progress callback type for conversion operations.
/// The callback receives a message describing the current step.
pub type ProgressCallback<'a> = &'a dyn Fn(&str);

pub use md3_to_obj::{
    convert_md3_to_obj, convert_md3_to_obj_with_progress, merge_md3_to_obj,
    merge_md3_to_obj_with_progress, ConversionReport, MergeReport,
};
