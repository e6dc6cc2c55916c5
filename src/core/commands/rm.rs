use std::fs;
use std::path::Path;

use tracing::warn;

use super::fs_ops::remove_tree_forced;
use super::{Command, CommandError, Context, Outcome};

/// `rm [-r] [-f] <target>`. Any flag token containing `r` turns on
/// recursion and any containing `f` turns on force, so `-rf` and `-fr`
/// behave alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RmCommand {
    target: String,
    recursive: bool,
    force: bool,
}

impl RmCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let (flags, operands): (Vec<&String>, Vec<&String>) =
            args.iter().partition(|arg| arg.starts_with('-'));

        let target = operands
            .first()
            .ok_or_else(|| CommandError::usage("rm", "missing target name"))?;

        Ok(Self {
            target: target.to_string(),
            recursive: flags.iter().any(|flag| flag.contains('r')),
            force: flags.iter().any(|flag| flag.contains('f')),
        })
    }

    fn remove_dir(&self, ctx: &Context<'_>, path: &Path) -> Result<Outcome, CommandError> {
        if !self.recursive {
            fs::remove_dir(path).map_err(CommandError::io("rm"))?;
            return Ok(ctx.stay(format!("Removed directory: {}", self.target)));
        }

        match fs::remove_dir_all(path) {
            Ok(()) => Ok(ctx.stay(format!(
                "Removed directory recursively: {}",
                self.target
            ))),
            Err(e) if self.force => {
                warn!(target = %path.display(), error = %e, "forcing recursive removal");
                remove_tree_forced(path);
                Ok(ctx.stay(format!(
                    "Removed directory recursively (force): {}",
                    self.target
                )))
            }
            Err(e) => Err(CommandError::Io { op: "rm", source: e }),
        }
    }

    fn remove_file(&self, ctx: &Context<'_>, path: &Path) -> Result<Outcome, CommandError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(ctx.stay(format!("Removed file: {}", self.target))),
            Err(e) if self.force => {
                warn!(target = %path.display(), error = %e, "retrying forced removal");
                match fs::remove_file(path) {
                    Ok(()) => Ok(ctx.stay(format!("Removed file (force): {}", self.target))),
                    Err(_) if fs::symlink_metadata(path).is_err() => {
                        Ok(ctx.stay(format!("Removed file (force): {}", self.target)))
                    }
                    Err(retry) => Err(CommandError::Io {
                        op: "rm",
                        source: retry,
                    }),
                }
            }
            Err(e) => Err(CommandError::Io { op: "rm", source: e }),
        }
    }
}

impl Command for RmCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let path = ctx.resolve("rm", &self.target)?;

        // A symlink is removed as a link, never followed.
        let Ok(metadata) = fs::symlink_metadata(&path) else {
            return Err(CommandError::not_found("rm", "no such file or directory"));
        };

        if ctx.sandbox.is_root(&path) {
            return Err(CommandError::usage("rm", "refusing to remove the sandbox root"));
        }

        if metadata.is_dir() {
            self.remove_dir(ctx, &path)
        } else {
            self.remove_file(ctx, &path)
        }
    }
}
