use super::{Command, CommandError, Context, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdCommand {
    target: String,
}

impl CdCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let target = args
            .first()
            .ok_or_else(|| CommandError::usage("cd", "missing argument"))?;
        Ok(Self {
            target: target.clone(),
        })
    }
}

impl Command for CdCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let path = ctx.resolve("cd", &self.target)?;

        if !path.is_dir() {
            return Err(CommandError::not_found(
                "cd",
                format!("no such directory: {}", self.target),
            ));
        }

        Ok(Outcome {
            output: format!("Changed directory to {}", path.display()),
            cwd: path,
            failed: false,
        })
    }
}
