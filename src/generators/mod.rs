//! Built-in generator implementations and the registry that resolves them

pub mod errors;
pub mod go;
pub mod java;
pub mod registry;
pub mod rust;

pub use errors::*;
pub use go::GoCodegen;
pub use java::JavaCodegen;
pub use registry::{GeneratorFactory, GeneratorRegistry};
pub use rust::RustCodegen;
