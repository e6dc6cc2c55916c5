use std::{env, fs, path::Path};

use tracing::debug;

use super::{Config, ConfigError, ConfigPaths};
use crate::path::PathExpander;

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
    expander: PathExpander,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self {
            paths,
            expander: PathExpander::new(),
        }
    }

    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        let Some(path) = &self.paths.rc_path else {
            return Ok(());
        };

        if path.exists() {
            self.source(path, config)
        } else if self.paths.explicit {
            Err(ConfigError::ConfigFileNotFound(
                path.to_string_lossy().into_owned(),
            ))
        } else {
            Ok(())
        }
    }

    fn source(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        debug!(path = %path.display(), "loading rc file");
        let content = fs::read_to_string(path)?;
        for (idx, line) in content.lines().enumerate() {
            self.process_line(idx + 1, line, config)?;
        }
        Ok(())
    }

    fn process_line(&self, number: usize, line: &str, config: &mut Config) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let handled = match line {
            s if s.starts_with("export ") => self.process_env_var(&s["export ".len()..]),
            s if s.starts_with("alias ") => self.process_alias(&s["alias ".len()..], config),
            s if s.starts_with("root=") => self.process_root(&s["root=".len()..], config),
            _ => false,
        };

        if handled {
            Ok(())
        } else {
            Err(ConfigError::InvalidLine {
                line: number,
                content: line.to_string(),
            })
        }
    }

    fn process_env_var(&self, var_def: &str) -> bool {
        let Some((name, value)) = var_def.split_once('=') else {
            return false;
        };
        let name = name.trim();
        let value = strip_quotes(value.trim());

        if name.is_empty() || name.contains('\0') || value.contains('\0') {
            return false;
        }

        let expanded = self.expander.expand_env_vars(value);
        env::set_var(name, expanded.as_ref());
        true
    }

    fn process_alias(&self, line: &str, config: &mut Config) -> bool {
        let Some((name, command)) = line.split_once('=') else {
            return false;
        };
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return false;
        }

        config.aliases.add(name, strip_quotes(command.trim()));
        true
    }

    fn process_root(&self, value: &str, config: &mut Config) -> bool {
        let value = strip_quotes(value.trim());
        if value.is_empty() {
            return false;
        }

        let expanded = self.expander.expand_tilde(value);
        let expanded = self.expander.expand_env_vars(&expanded);
        config.root = Some(expanded.as_ref().into());
        true
    }
}

fn strip_quotes(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
