use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

mod aliases;
mod loader;
mod paths;

pub use aliases::AliasManager;
use loader::ConfigLoader;
pub use paths::ConfigPaths;

/// Settings read from the rc file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    paths: ConfigPaths,
    aliases: AliasManager,
    root: Option<PathBuf>,
}

impl Config {
    /// Uses `~/.cordonrc` when a home directory exists.
    pub fn new() -> Self {
        Self {
            paths: ConfigPaths::new(),
            ..Self::default()
        }
    }

    /// Uses an explicit rc file, which must exist when loaded.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: ConfigPaths::with_file(path),
            ..Self::default()
        }
    }

    pub fn load(&mut self) -> Result<(), ConfigError> {
        let paths = self.paths.clone();
        let loader = ConfigLoader::new(&paths);
        loader.load_configs(self)
    }

    pub fn aliases(&self) -> &AliasManager {
        &self.aliases
    }

    pub fn expand_aliases<'a>(&'a self, command: &'a str) -> Cow<'a, str> {
        self.aliases.expand_command(command)
    }

    pub fn get_aliases(&self) -> BTreeMap<Cow<'_, str>, Cow<'_, str>> {
        self.aliases.get_all()
    }

    /// Sandbox root named by a `root=` line, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn rc_path(&self) -> Option<&Path> {
        self.paths.rc_path.as_deref()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigFileNotFound(String),
    InvalidLine { line: usize, content: String },
    IoError(std::io::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ConfigFileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::InvalidLine { line, content } => {
                write!(f, "Invalid config line {}: {}", line, content)
            }
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
