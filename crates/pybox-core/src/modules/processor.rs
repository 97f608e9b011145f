use super::input::InputTranslator;
use super::output::OutputCollector;
use super::traits::Processor;
use crate::common::ProcessDescriptor;
use crate::domain::{ArgumentMap, OutputArtifactMap, PyboxResult, RequestedOutputs};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PyboxProcessor {
    descriptor: ProcessDescriptor,
}

impl PyboxProcessor {
    pub fn new(descriptor: ProcessDescriptor) -> PyboxResult<Self> {
        descriptor.validate()?;
        Ok(Self { descriptor })
    }

    pub fn describe(&self) -> Value {
        self.descriptor.describe()
    }
}

impl Processor for PyboxProcessor {
    fn descriptor(&self) -> &ProcessDescriptor {
        &self.descriptor
    }

    fn prepare_input(
        &self,
        request: &Value,
        requested: &RequestedOutputs,
    ) -> PyboxResult<ArgumentMap> {
        InputTranslator::new(&self.descriptor).translate(request, requested)
    }

    fn prepare_output(
        &self,
        working_dir: &Path,
        requested: &RequestedOutputs,
    ) -> PyboxResult<(&'static str, OutputArtifactMap)> {
        OutputCollector::new(&self.descriptor).collect(working_dir, requested)
    }
}
