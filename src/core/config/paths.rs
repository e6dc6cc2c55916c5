use std::path::PathBuf;

const RC_FILE: &str = ".cordonrc";

#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub rc_path: Option<PathBuf>,
    /// An explicitly requested file must exist; the default one may not.
    pub explicit: bool,
}

impl ConfigPaths {
    pub fn new() -> Self {
        ConfigPaths {
            rc_path: dirs::home_dir().map(|home| home.join(RC_FILE)),
            explicit: false,
        }
    }

    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: Some(path.into()),
            explicit: true,
        }
    }
}
