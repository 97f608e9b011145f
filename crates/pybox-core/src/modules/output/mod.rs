pub mod table;

use crate::common::ProcessDescriptor;
use crate::common::constants::{
    BASE64_ENCODING, ENVELOPE_MEDIA_TYPE, GEOTIFF_MEDIA_TYPE, SERIES_MEDIA_TYPE, TEXT_MEDIA_TYPE,
};
use crate::domain::{
    CollectResult, OutputArtifact, OutputArtifactMap, OutputName, RequestedOutputs,
};
use crate::modules::helpers::{artifact_path, read_binary_artifact, read_text_artifact};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use tracing::{debug, info};

use table::{TableKind, parse_series_table};

/// Reads the files the simulator left in a working directory and shapes
/// them into response artifacts.
#[derive(Debug, Clone, Copy)]
pub struct OutputCollector<'a> {
    descriptor: &'a ProcessDescriptor,
}

impl<'a> OutputCollector<'a> {
    pub fn new(descriptor: &'a ProcessDescriptor) -> Self {
        Self { descriptor }
    }

    /// Collects every requested output, or all declared outputs when the
    /// request is empty. Any missing file or malformed table fails the whole
    /// call.
    pub fn collect(
        &self,
        working_dir: &Path,
        requested: &RequestedOutputs,
    ) -> CollectResult<(&'static str, OutputArtifactMap)> {
        let outputs = requested.resolve(&self.descriptor.output_names())?;

        let mut produced = OutputArtifactMap::new();
        for output in outputs {
            let artifact = self.collect_output(working_dir, output)?;
            debug!(output = %output, media_type = %artifact.media_type, "collected output");
            produced.insert(output, artifact);
        }

        info!(
            outputs = produced.len(),
            working_dir = %working_dir.display(),
            "collected simulator outputs"
        );
        Ok((ENVELOPE_MEDIA_TYPE, produced))
    }

    pub fn collect_output(
        &self,
        working_dir: &Path,
        output: OutputName,
    ) -> CollectResult<OutputArtifact> {
        let path = artifact_path(working_dir, &self.descriptor.base_output_filename, output);

        match output {
            OutputName::InputData => {
                let text = read_text_artifact(&path, output)?;
                Ok(OutputArtifact::text(text, TEXT_MEDIA_TYPE))
            }
            OutputName::Dem | OutputName::InvasionMap => {
                let bytes = read_binary_artifact(&path, output)?;
                Ok(OutputArtifact::encoded(
                    STANDARD.encode(bytes),
                    GEOTIFF_MEDIA_TYPE,
                    BASE64_ENCODING,
                ))
            }
            OutputName::TemporalEvolution | OutputName::DepositThickness => {
                let kind = if output == OutputName::TemporalEvolution {
                    TableKind::TemporalEvolution
                } else {
                    TableKind::DepositThickness
                };
                let source = read_text_artifact(&path, output)?;
                let source_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(output.as_str());
                let table = parse_series_table(kind, source_name, &source)?;
                Ok(OutputArtifact::table(table, SERIES_MEDIA_TYPE))
            }
        }
    }
}
