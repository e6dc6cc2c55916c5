use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::fs_ops::{copy_file, copy_tree, remove_entry};
use super::{Command, CommandError, Context, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpCommand {
    source: String,
    destination: String,
}

impl CpCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        match args {
            [source, destination, ..] => Ok(Self {
                source: source.clone(),
                destination: destination.clone(),
            }),
            _ => Err(CommandError::usage("cp", "usage: cp <src> <dst>")),
        }
    }

    /// An existing directory destination receives the source under its own
    /// base name.
    fn final_destination(src: &Path, dst: &Path) -> Result<PathBuf, CommandError> {
        if !dst.is_dir() {
            return Ok(dst.to_path_buf());
        }
        let name = src.file_name().ok_or_else(|| CommandError::Io {
            op: "cp",
            source: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        })?;
        Ok(dst.join(name))
    }

    fn copy_directory(&self, ctx: &Context<'_>, src: &Path, dst: &Path) -> Result<(), CommandError> {
        let target = ctx.confine("cp", &self.destination, Self::final_destination(src, dst)?)?;

        if target.starts_with(src) {
            return Err(CommandError::usage(
                "cp",
                format!("cannot copy a directory into itself: {}", self.source),
            ));
        }

        // Whatever already sits at the target is replaced wholesale.
        remove_entry(&target).map_err(CommandError::io("cp"))?;
        copy_tree(src, &target).map_err(CommandError::io("cp"))
    }

    fn copy_single_file(&self, ctx: &Context<'_>, src: &Path, dst: &Path) -> Result<(), CommandError> {
        let target = ctx.confine("cp", &self.destination, Self::final_destination(src, dst)?)?;

        if same_file(src, &target) {
            return Err(CommandError::usage(
                "cp",
                format!("'{}' and '{}' are the same file", self.source, self.destination),
            ));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(CommandError::io("cp"))?;
        }
        copy_file(src, &target).map_err(CommandError::io("cp"))
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Command for CpCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let src = ctx.resolve("cp", &self.source)?;
        let dst = ctx.resolve("cp", &self.destination)?;

        if src.is_dir() {
            self.copy_directory(ctx, &src, &dst)?;
        } else {
            self.copy_single_file(ctx, &src, &dst)?;
        }

        Ok(ctx.stay(format!("Copied {} -> {}", self.source, self.destination)))
    }
}
