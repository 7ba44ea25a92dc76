//! Generator resolution errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No registered generator matches by name or by type identifier
    #[error("Can't resolve generator with name '{name}'")]
    NotFound { name: String },
}
