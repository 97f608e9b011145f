pub mod constants;
pub mod descriptor;

pub use descriptor::{
    Bounds, ClassField, OutputDeclaration, ParticleClassInput, ProcessDescriptor, ScalarInput,
};
