use super::PathError;
use std::borrow::Cow;
use std::env;
use std::path::{Component, Path, PathBuf};

/// Turns raw command arguments into absolute, normalized paths.
///
/// Resolution order: a leading `~` becomes the home directory, `$VAR` and
/// `${VAR}` references are replaced from the process environment, relative
/// results are joined onto the working directory, and `.`/`..` segments are
/// collapsed lexically.
#[derive(Clone, Debug)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, cwd: &Path, raw: &str) -> PathBuf {
        let tilde_expanded = self.expand_tilde(raw);
        let expanded = self.expand_env_vars(&tilde_expanded);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&cwd.join(path))
        }
    }

    /// Expands `~` and `~/rest`. `~user` forms and a missing home directory
    /// leave the input untouched.
    pub fn expand_tilde<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let Some(rest) = path.strip_prefix('~') else {
            return Cow::Borrowed(path);
        };
        if !rest.is_empty() && !rest.starts_with('/') {
            return Cow::Borrowed(path);
        }

        match self.get_home_dir() {
            Ok(home) => Cow::Owned(format!("{}{}", home.to_string_lossy(), rest)),
            Err(_) => Cow::Borrowed(path),
        }
    }

    /// Unknown variables are kept verbatim, so `$nope/file` stays a literal name.
    pub fn expand_env_vars<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if !input.contains('$') {
            return Cow::Borrowed(input);
        }

        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(dollar_pos) = rest.find('$') {
            result.push_str(&rest[..dollar_pos]);
            let after = &rest[dollar_pos + 1..];

            let (var_name, consumed) = match after.strip_prefix('{') {
                Some(braced) => match braced.find('}') {
                    Some(end) => (&braced[..end], end + 2),
                    None => ("", 0),
                },
                None => {
                    let end = after
                        .find(|c: char| !c.is_alphanumeric() && c != '_')
                        .unwrap_or(after.len());
                    (&after[..end], end)
                }
            };

            let reference_end = dollar_pos + 1 + consumed;
            let value = (!var_name.is_empty())
                .then(|| env::var(var_name).ok())
                .flatten();

            match value {
                Some(value) => result.push_str(&value),
                None => result.push_str(&rest[dollar_pos..reference_end]),
            }
            rest = &rest[reference_end..];
        }

        result.push_str(rest);
        Cow::Owned(result)
    }

    pub fn get_home_dir(&self) -> Result<PathBuf, PathError> {
        dirs::home_dir().ok_or(PathError::HomeDirNotFound)
    }
}

/// Collapses `.` and `..` without touching the filesystem. `..` above the
/// filesystem root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// `path` expressed relative to `base`; both are expected to be normalized.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}
