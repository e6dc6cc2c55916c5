use std::fs;
use std::io;
use std::path::Path;

use super::{Command, CommandError, Context, Outcome};
use crate::path::relative_to;

const GLOB_CHARS: [char; 4] = ['*', '?', '[', ']'];

/// `ls [-a] [targets...]`. Problems with one target are reported on its own
/// line and the remaining targets are still listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsCommand {
    show_all: bool,
    targets: Vec<String>,
}

impl LsCommand {
    pub fn parse(args: &[String]) -> Self {
        let mut show_all = false;
        let mut targets = Vec::new();

        for arg in args {
            if arg == "-a" {
                show_all = true;
            } else {
                targets.push(arg.clone());
            }
        }
        if targets.is_empty() {
            targets.push(".".to_string());
        }

        Self { show_all, targets }
    }

    fn list_target(&self, ctx: &Context<'_>, target: &str, lines: &mut Vec<String>) {
        let path = match ctx.resolve("ls", target) {
            Ok(path) => path,
            Err(e) => return lines.push(e.to_string()),
        };

        if !path.exists() {
            return lines.push(cannot_access(target));
        }

        let header = (self.targets.len() > 1).then(|| target.to_string());
        self.list_path(&path, header, lines);
    }

    fn list_pattern(&self, ctx: &Context<'_>, pattern: &str, lines: &mut Vec<String>) {
        let resolved = ctx.expander().resolve(ctx.cwd, pattern);
        if !ctx.sandbox.contains(&resolved) {
            return lines.push(
                CommandError::Escape {
                    op: "ls",
                    arg: pattern.to_string(),
                }
                .to_string(),
            );
        }

        let matches = match glob::glob(&resolved.to_string_lossy()) {
            Ok(paths) => paths
                .filter_map(Result::ok)
                .filter(|path| ctx.sandbox.contains(path))
                .collect::<Vec<_>>(),
            Err(e) => return lines.push(format!("ls error: {}", e)),
        };

        if matches.is_empty() {
            return lines.push(cannot_access(pattern));
        }

        let with_headers = matches.len() > 1 || self.targets.len() > 1;
        for path in &matches {
            let header =
                with_headers.then(|| relative_to(path, ctx.cwd).to_string_lossy().into_owned());
            self.list_path(path, header, lines);
        }
    }

    fn list_path(&self, path: &Path, header: Option<String>, lines: &mut Vec<String>) {
        if !path.is_dir() {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            return lines.push(name);
        }

        match read_entries(path, self.show_all) {
            Ok(entries) => {
                if let Some(header) = header {
                    lines.push(format!("{}:", header));
                }
                if entries.is_empty() {
                    lines.push("(empty)".to_string());
                } else {
                    lines.extend(entries);
                }
            }
            Err(e) => lines.push(format!("ls error: {}", e)),
        }
    }
}

impl Command for LsCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let mut lines = Vec::new();

        for target in &self.targets {
            if target.contains(GLOB_CHARS) {
                self.list_pattern(ctx, target, &mut lines);
            } else {
                self.list_target(ctx, target, &mut lines);
            }
        }

        Ok(ctx.stay(lines.join("\n")))
    }
}

fn cannot_access(target: &str) -> String {
    format!("ls: cannot access '{}': No such file or directory", target)
}

/// Entry names sorted, subdirectories marked with a trailing `/`.
fn read_entries(dir: &Path, show_all: bool) -> io::Result<Vec<String>> {
    let mut entries: Vec<(String, bool)> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !show_all && name.starts_with('.') {
                return None;
            }
            Some((name, entry.path().is_dir()))
        })
        .collect();
    entries.sort();

    Ok(entries
        .into_iter()
        .map(|(name, is_dir)| if is_dir { format!("{}/", name) } else { name })
        .collect())
}
