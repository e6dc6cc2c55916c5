use rustyline::{history::DefaultHistory, Editor};

mod executor;

use crate::{
    core::{config::Config, session::Session},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
};

pub use executor::print_reply;
use executor::{CommandHandler, Flow};

/// Interactive front end over one [`Session`].
pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, DefaultHistory>,
    pub(crate) session: Session,
    pub(crate) flags: Flags,
    pub(crate) highlighter: SyntaxHighlighter,
}

impl Shell {
    pub fn new(flags: Flags, session: Session, config: &Config) -> Result<Self, ShellError> {
        let mut completer = ShellCompleter::new(session.sandbox().clone());
        completer.update_aliases(config.get_aliases());
        completer.set_cwd(session.cwd());

        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(completer));

        let highlighter = SyntaxHighlighter::new();
        let hint = highlighter.highlight_hint("Use 'exit' to quit.");
        ctrlc::set_handler(move || {
            println!("\n{}", hint);
        })?;

        Ok(Shell {
            editor,
            session,
            flags,
            highlighter,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            self.print_banner();
        }

        loop {
            let prompt = format!(
                "{} $ ",
                self.session.sandbox().display_path(self.session.cwd()).display()
            );

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }

                    if let Flow::Exit = self.execute_command(&line)? {
                        println!("Goodbye");
                        break;
                    }

                    let cwd = self.session.cwd().to_path_buf();
                    if let Some(helper) = self.editor.helper_mut() {
                        helper.set_cwd(&cwd);
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("{}", self.highlighter.highlight_hint("Use 'exit' to quit."));
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("EOF received. Exiting.");
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn print_banner(&self) {
        println!("cordon {}", env!("CARGO_PKG_VERSION"));
        println!(
            "Working root directory (sandboxed): {}",
            self.session.sandbox().root().display()
        );
        println!("Type 'help' for commands, or 'exit' to quit.\n");
    }
}
