use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::pipeline::run_result::RunError;
use crate::transcription::domain::model_size::ModelSize;

/// Validated parameters for one transcription run. Immutable once resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct InvocationParams {
    pub input_path: PathBuf,
    pub model_size: ModelSize,
    pub output_path: PathBuf,
}

impl InvocationParams {
    /// Validate raw CLI values into run parameters.
    ///
    /// The input is checked before anything else so a bad path or model
    /// token fails without paying any model-acquisition cost. When no
    /// output path is given, derives `<output_dir>/<input stem>.txt` and
    /// creates the directory if missing (idempotent). An explicit output
    /// path is taken verbatim.
    pub fn resolve(
        input: &Path,
        model_token: &str,
        output: Option<&Path>,
        output_dir: &Path,
    ) -> Result<Self, RunError> {
        if !input.is_file() {
            return Err(RunError::InvalidInputPath {
                path: input.to_path_buf(),
                detail: "not found or not a regular file".to_string(),
            });
        }
        // Readability check: open the file and drop the handle right away.
        File::open(input).map_err(|e| RunError::InvalidInputPath {
            path: input.to_path_buf(),
            detail: e.to_string(),
        })?;

        let model_size: ModelSize =
            model_token
                .parse()
                .map_err(|_| RunError::InvalidModelSize {
                    token: model_token.to_string(),
                })?;

        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => {
                fs::create_dir_all(output_dir).map_err(|e| RunError::OutputWrite {
                    path: output_dir.to_path_buf(),
                    detail: e.to_string(),
                })?;
                output_dir.join(derived_file_name(input))
            }
        };

        Ok(Self {
            input_path: input.to_path_buf(),
            model_size,
            output_path,
        })
    }
}

/// `<input stem>.txt`. Only the extension is stripped, not everything
/// after the first dot, so `take.2.mp3` derives `take.2.txt`.
fn derived_file_name(input: &Path) -> OsString {
    let mut name = input
        .file_stem()
        .unwrap_or_else(|| input.as_os_str())
        .to_os_string();
    name.push(".txt");
    name
}
