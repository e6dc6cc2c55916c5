use std::fs;
use std::io;

use super::fs_ops::move_path;
use super::{Command, CommandError, Context, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MvCommand {
    source: String,
    destination: String,
}

impl MvCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        match args {
            [source, destination, ..] => Ok(Self {
                source: source.clone(),
                destination: destination.clone(),
            }),
            _ => Err(CommandError::usage("mv", "usage: mv <src> <dst>")),
        }
    }
}

impl Command for MvCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let src = ctx.resolve("mv", &self.source)?;
        let mut dst = ctx.resolve("mv", &self.destination)?;

        if ctx.sandbox.is_root(&src) {
            return Err(CommandError::usage("mv", "refusing to move the sandbox root"));
        }

        if dst.is_dir() {
            let name = src.file_name().ok_or_else(|| CommandError::Io {
                op: "mv",
                source: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
            })?;
            dst = ctx.confine("mv", &self.destination, dst.join(name))?;
        }

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(CommandError::io("mv"))?;
        }
        move_path(&src, &dst).map_err(CommandError::io("mv"))?;

        Ok(ctx.stay(format!("Moved {} -> {}", self.source, self.destination)))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::commands::tests::setup_test_env;
    use std::fs;

    #[test]
    fn test_mv_rename_file() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        fs::write(root.join("a.txt"), "a").unwrap();

        let outcome = interpreter.execute("mv a.txt b.txt", &root);
        assert_eq!(outcome.output, "Moved a.txt -> b.txt");
        assert!(!root.join("a.txt").exists());
        assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "a");
    }

    #[test]
    fn test_mv_into_existing_directory_keeps_name() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir(root.join("backup")).unwrap();

        let outcome = interpreter.execute("mv a.txt backup/", &root);
        assert_eq!(outcome.output, "Moved a.txt -> backup/");
        assert_eq!(fs::read_to_string(root.join("backup/a.txt")).unwrap(), "a");
    }

    #[test]
    fn test_mv_creates_destination_parents() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("src/x.txt"), "x").unwrap();

        interpreter.execute("mv src deep/nested/dst", &root);
        assert_eq!(
            fs::read_to_string(root.join("deep/nested/dst/x.txt")).unwrap(),
            "x"
        );
        assert!(!root.join("src").exists());
    }

    #[test]
    fn test_mv_missing_source() {
        let (_temp_dir, interpreter, root) = setup_test_env();

        let outcome = interpreter.execute("mv ghost.txt there.txt", &root);
        assert!(outcome.output.starts_with("mv error: "));
        assert!(outcome.failed);
    }

    #[test]
    fn test_mv_does_not_change_cwd() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        fs::create_dir(root.join("here")).unwrap();
        fs::write(root.join("here/f"), "f").unwrap();
        let cwd = root.join("here");

        let outcome = interpreter.execute("mv f ../f", &cwd);
        assert_eq!(outcome.cwd, cwd);
        assert!(root.join("f").exists());
    }
}
