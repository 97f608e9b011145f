use crate::domain::{CollectResult, OutputName, PyboxError};
use std::fs;
use std::path::{Path, PathBuf};

pub fn artifact_path(working_dir: &Path, base_output_filename: &str, output: OutputName) -> PathBuf {
    working_dir.join(format!("{base_output_filename}{}", output.file_suffix()))
}

pub fn read_text_artifact(path: &Path, output: OutputName) -> CollectResult<String> {
    fs::read_to_string(path).map_err(|source| read_error(path, output, source))
}

pub fn read_binary_artifact(path: &Path, output: OutputName) -> CollectResult<Vec<u8>> {
    fs::read(path).map_err(|source| read_error(path, output, source))
}

fn read_error(path: &Path, output: OutputName, source: std::io::Error) -> PyboxError {
    PyboxError::io_system(
        "IO.OUTPUT_READ",
        format!(
            "failed to read simulator output '{}' ({}): {}",
            path.display(),
            output,
            source
        ),
    )
}
