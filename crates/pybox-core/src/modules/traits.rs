use crate::common::ProcessDescriptor;
use crate::domain::{ArgumentMap, OutputArtifactMap, PyboxResult, RequestedOutputs};
use serde_json::Value;
use std::path::Path;

/// Entry points an execution framework calls around one simulator run.
pub trait Processor {
    fn descriptor(&self) -> &ProcessDescriptor;

    /// Validates `request` and turns it into simulator arguments.
    fn prepare_input(
        &self,
        request: &Value,
        requested: &RequestedOutputs,
    ) -> PyboxResult<ArgumentMap>;

    /// Reads the simulator outputs from `working_dir`. Returns the envelope
    /// media type together with one artifact per requested output.
    fn prepare_output(
        &self,
        working_dir: &Path,
        requested: &RequestedOutputs,
    ) -> PyboxResult<(&'static str, OutputArtifactMap)>;
}
