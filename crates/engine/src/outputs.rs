//! Writing the outputs document the platform reads back after a run.
//!
//! The file lives at a fixed name in the working directory and each export
//! replaces it entirely.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use torque_types::{ExecutionMode, ExecutionResult};
use tracing::{debug, info};

/// Name of the outputs file, resolved against the working directory.
pub const OUTPUTS_FILE_NAME: &str = "torque-outputs.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("outputs are not JSON-representable: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to write outputs to {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct OutputsDocument<'a, T: Serialize> {
    outputs: &'a IndexMap<String, T>,
}

/// Serialize `{"outputs": {...}}` in the mapping's insertion order.
pub fn render_outputs<T: Serialize>(outputs: &IndexMap<String, T>) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec(&OutputsDocument { outputs })?)
}

/// Export `outputs` to `path`.
///
/// Serialization happens before the file is touched, so a value that cannot be
/// represented leaves any previous file intact. In [`ExecutionMode::Simulate`]
/// nothing is written.
pub fn export_outputs_to<T: Serialize>(
    path: &Path,
    outputs: &IndexMap<String, T>,
    mode: ExecutionMode,
) -> Result<ExecutionResult, ExportError> {
    let content = render_outputs(outputs)?;

    if mode == ExecutionMode::Simulate {
        debug!(path = %path.display(), count = outputs.len(), "check mode, outputs not written");
        return Ok(ExecutionResult::new(
            false,
            format!("Check mode: would export {} output(s) to {}", outputs.len(), path.display()),
        ));
    }

    fs::write(path, &content).map_err(|source| ExportError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = outputs.len(), bytes = content.len(), "exported outputs");

    Ok(ExecutionResult::new(
        false,
        format!("Exported {} output(s) to {}", outputs.len(), path.display()),
    ))
}

/// Export `outputs` to [`OUTPUTS_FILE_NAME`] in the working directory.
pub fn export_outputs<T: Serialize>(outputs: &IndexMap<String, T>, mode: ExecutionMode) -> Result<ExecutionResult, ExportError> {
    export_outputs_to(Path::new(OUTPUTS_FILE_NAME), outputs, mode)
}
