use super::{normalize, relative_to, PathError};
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// The directory subtree a session may read, write and navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// The root is canonicalized once here; every later check compares
    /// against the canonical form.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, PathError> {
        let root = root.as_ref();
        let canonical =
            fs::canonicalize(root).map_err(|_| PathError::InvalidRoot(root.to_path_buf()))?;

        if !canonical.is_dir() {
            return Err(PathError::InvalidRoot(root.to_path_buf()));
        }

        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when `path` lies in the root's subtree once every symlink along
    /// it has been followed, dangling ones included, so a link pointing out
    /// of the root counts as outside whether or not its target exists.
    pub fn contains(&self, path: &Path) -> bool {
        self.anchor(path)
            .is_some_and(|anchored| anchored.starts_with(&self.root))
    }

    pub fn is_root(&self, path: &Path) -> bool {
        self.anchor(path).is_some_and(|anchored| anchored == self.root)
    }

    /// Path shown to the user, relative to the root.
    pub fn display_path(&self, path: &Path) -> PathBuf {
        let anchored = self.anchor(path).unwrap_or_else(|| normalize(path));
        relative_to(&anchored, &self.root)
    }

    /// Where the kernel would land for `path`: components are walked left to
    /// right, symlinks are replaced by their targets (relative targets
    /// against the link's directory) and missing components are taken
    /// literally. `None` when links nest deeper than `MAX_LINK_HOPS`.
    fn anchor(&self, path: &Path) -> Option<PathBuf> {
        let mut resolved = PathBuf::new();
        let mut pending = Vec::new();
        let mut hops = 0;

        queue_steps(path, &mut resolved, &mut pending);

        while let Some(step) = pending.pop() {
            let name = match step {
                Step::Parent => {
                    resolved.pop();
                    continue;
                }
                Step::Name(name) => name,
            };

            let candidate = resolved.join(&name);
            let is_link = fs::symlink_metadata(&candidate)
                .map(|meta| meta.file_type().is_symlink())
                .unwrap_or(false);
            if !is_link {
                resolved = candidate;
                continue;
            }

            hops += 1;
            if hops > MAX_LINK_HOPS {
                return None;
            }
            let target = fs::read_link(&candidate).ok()?;
            queue_steps(&target, &mut resolved, &mut pending);
        }

        Some(resolved)
    }
}

const MAX_LINK_HOPS: usize = 40;

enum Step {
    Parent,
    Name(OsString),
}

/// Pushes the steps of `path` so they pop in order. An absolute path
/// restarts resolution from its own root.
fn queue_steps(path: &Path, resolved: &mut PathBuf, pending: &mut Vec<Step>) {
    if path.has_root() {
        *resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
                _ => break,
            }
        }
    }

    for component in path.components().rev() {
        match component {
            Component::Normal(name) => pending.push(Step::Name(name.to_os_string())),
            Component::ParentDir => pending.push(Step::Parent),
            _ => {}
        }
    }
}
