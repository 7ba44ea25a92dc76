//! Generation engine implementations

pub mod default_generator;
pub mod template_loader;

pub use default_generator::*;
pub use template_loader::*;
