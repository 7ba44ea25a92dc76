//! Generation domain module
//!
//! Holds the extension point generators implement ([`CodegenConfig`]), the
//! option bag and its builder, the parsed specification model, and the
//! ports the invocation driver talks to: [`SpecLoader`], [`ConfigLoader`],
//! [`CodeGenerator`] and [`OutputService`].

pub mod context;
pub mod errors;
pub mod options;
pub mod spec;
pub mod traits;
pub mod types;
pub mod utils;

pub use context::*;
pub use errors::*;
pub use options::*;
pub use spec::*;
pub use traits::*;
pub use types::*;
