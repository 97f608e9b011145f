pub mod input;
pub mod output;
pub mod serialization;

mod helpers;
mod processor;
mod traits;

pub use helpers::{artifact_path, read_binary_artifact, read_text_artifact};
pub use input::InputTranslator;
pub use output::OutputCollector;
pub use processor::PyboxProcessor;
pub use traits::Processor;
