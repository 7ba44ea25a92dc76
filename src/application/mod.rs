//! Application layer - runs the code generation goal against its collaborators

pub mod codegen_goal;
pub mod dto;
pub mod errors;
pub mod traits;

pub use codegen_goal::*;
pub use dto::*;
pub use errors::*;
pub use traits::*;
