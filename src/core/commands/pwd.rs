use super::{Command, CommandError, Context, Outcome};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        Ok(ctx.stay(ctx.cwd.to_string_lossy()))
    }
}
