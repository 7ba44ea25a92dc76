//! Port interfaces for the application layer

use std::io;
use std::path::Path;

/// The build system hosting a generation run
pub trait BuildHost {
    /// Add `root` to the directories compiled with the project
    fn add_compile_source_root(&mut self, root: &Path) -> io::Result<()>;
}
