pub mod common;
pub mod domain;
pub mod modules;

pub use common::ProcessDescriptor;
pub use domain::{
    ArgValue, ArgumentMap, OutputArtifact, OutputArtifactMap, OutputName, PyboxError,
    PyboxErrorCategory, PyboxResult, RequestedOutputs, SeriesColumn, SeriesTable,
};
pub use modules::{InputTranslator, OutputCollector, Processor, PyboxProcessor};
