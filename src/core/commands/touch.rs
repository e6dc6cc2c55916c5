use std::fs::OpenOptions;
use std::time::SystemTime;

use super::{Command, CommandError, Context, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchCommand {
    file: String,
}

impl TouchCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let file = args
            .first()
            .ok_or_else(|| CommandError::usage("touch", "missing filename"))?;
        Ok(Self { file: file.clone() })
    }
}

impl Command for TouchCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let path = ctx.resolve("touch", &self.file)?;

        // Append mode so an existing file is never truncated.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(CommandError::io("touch"))?;
        file.set_modified(SystemTime::now())
            .map_err(CommandError::io("touch"))?;

        Ok(ctx.stay(format!("Touched: {}", self.file)))
    }
}
