use std::fs;

use super::{Command, CommandError, Context, Outcome};

/// `echo words...` or `echo words... > file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoCommand {
    words: Vec<String>,
    redirect: Option<String>,
}

impl EchoCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let Some(idx) = args.iter().position(|arg| arg == ">") else {
            return Ok(Self {
                words: args.to_vec(),
                redirect: None,
            });
        };

        // Anything after the file name is ignored.
        let file = args.get(idx + 1).ok_or_else(|| {
            CommandError::usage("echo", "no file specified for redirection")
        })?;

        Ok(Self {
            words: args[..idx].to_vec(),
            redirect: Some(file.clone()),
        })
    }
}

impl Command for EchoCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        let text = self.words.join(" ");

        let Some(file) = &self.redirect else {
            return Ok(ctx.stay(text));
        };

        let path = ctx.resolve("echo", file)?;
        fs::write(&path, format!("{}\n", text)).map_err(CommandError::io("echo"))?;
        Ok(ctx.stay(format!("Wrote to {}", file)))
    }
}
