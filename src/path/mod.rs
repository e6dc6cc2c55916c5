mod expander;
mod sandbox;

pub use expander::{normalize, relative_to, PathExpander};
pub use sandbox::Sandbox;

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PathError {
    HomeDirNotFound,
    InvalidRoot(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Home directory not found"),
            PathError::InvalidRoot(path) => {
                write!(f, "Sandbox root is not a directory: {}", path.display())
            }
            PathError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PathError {}

impl From<std::io::Error> for PathError {
    fn from(e: std::io::Error) -> Self {
        PathError::Io(e)
    }
}
