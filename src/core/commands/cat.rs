use std::fs;

use super::{Command, CommandError, Context, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatCommand {
    file: String,
}

impl CatCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let file = args
            .first()
            .ok_or_else(|| CommandError::usage("cat", "missing filename"))?;
        Ok(Self { file: file.clone() })
    }
}

impl Command for CatCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let path = ctx.resolve("cat", &self.file)?;
        let contents = fs::read_to_string(&path).map_err(CommandError::io("cat"))?;
        Ok(ctx.stay(contents))
    }
}
