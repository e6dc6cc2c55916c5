use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

use crate::path::{PathExpander, Sandbox};

/// Completes file names relative to the session's working directory. Nothing
/// outside the sandbox is ever listed.
#[derive(Clone)]
pub struct PathCompleter {
    sandbox: Sandbox,
    cwd: PathBuf,
    expander: PathExpander,
}

impl PathCompleter {
    pub fn new(sandbox: Sandbox) -> Self {
        let cwd = sandbox.root().to_path_buf();
        Self {
            sandbox,
            cwd,
            expander: PathExpander::new(),
        }
    }

    pub fn set_cwd(&mut self, cwd: &Path) {
        self.cwd = cwd.to_path_buf();
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = match incomplete.rfind('/') {
            Some(idx) => incomplete.split_at(idx + 1),
            None => ("", incomplete),
        };

        let search_in = if typed_dir.is_empty() { "." } else { typed_dir };
        let dir = self.expander.resolve(&self.cwd, search_in);
        if !self.sandbox.contains(&dir) {
            return Vec::new();
        }

        self.get_path_matches(&dir, typed_dir, file_prefix)
    }

    fn get_path_matches(&self, dir: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let show_hidden = file_prefix.starts_with('.');
        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let visible = show_hidden || !name.starts_with('.');
                let path = entry.path();
                (visible && name.starts_with(file_prefix) && self.sandbox.contains(&path))
                    .then(|| create_completion_pair(typed_dir, &name, path.is_dir()))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

fn create_completion_pair(typed_dir: &str, name: &str, is_dir: bool) -> Pair {
    let relative_path = format!("{}{}", typed_dir, name);
    if is_dir {
        Pair {
            display: format!("{}/", relative_path),
            replacement: format!("{}/", relative_path),
        }
    } else {
        Pair {
            display: relative_path.clone(),
            replacement: format!("{} ", relative_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_completer() -> (TempDir, PathCompleter) {
        let temp_dir = TempDir::new().unwrap();
        let sandbox = Sandbox::new(temp_dir.path()).unwrap();
        let root = sandbox.root().to_path_buf();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("docs/readme.md"), "").unwrap();
        fs::write(root.join("data.csv"), "").unwrap();
        fs::write(root.join(".hidden"), "").unwrap();
        (temp_dir, PathCompleter::new(sandbox))
    }

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_completes_in_cwd() {
        let (_temp_dir, completer) = setup_completer();
        assert_eq!(replacements(completer.complete_path("d")), ["data.csv ", "docs/"]);
    }

    #[test]
    fn test_hidden_entries_need_a_dot() {
        let (_temp_dir, completer) = setup_completer();
        assert!(!replacements(completer.complete_path("")).contains(&".hidden ".to_string()));
        assert_eq!(replacements(completer.complete_path(".h")), [".hidden "]);
    }

    #[test]
    fn test_completes_nested_and_after_cd() {
        let (_temp_dir, mut completer) = setup_completer();
        assert_eq!(replacements(completer.complete_path("docs/r")), ["docs/readme.md "]);

        let docs = completer.sandbox.root().join("docs");
        completer.set_cwd(&docs);
        assert_eq!(replacements(completer.complete_path("re")), ["readme.md "]);
    }

    #[test]
    fn test_nothing_outside_the_sandbox() {
        let (_temp_dir, completer) = setup_completer();
        assert!(completer.complete_path("../").is_empty());
        assert!(completer.complete_path("/").is_empty());
    }
}
