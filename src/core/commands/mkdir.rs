use std::fs;

use super::{Command, CommandError, Context, Outcome};
use crate::path::relative_to;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MkdirCommand {
    name: String,
}

impl MkdirCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let name = args
            .first()
            .ok_or_else(|| CommandError::usage("mkdir", "missing folder name"))?;
        Ok(Self { name: name.clone() })
    }
}

impl Command for MkdirCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let path = ctx.resolve("mkdir", &self.name)?;
        fs::create_dir_all(&path).map_err(CommandError::io("mkdir"))?;

        Ok(ctx.stay(format!(
            "Folder created: {}",
            relative_to(&path, ctx.cwd).display()
        )))
    }
}
