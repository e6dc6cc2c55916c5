use crate::core::session::Reply;
use crate::error::ShellError;
use crate::highlight::SyntaxHighlighter;

const HELP: &str = "\
Available commands:
  ls [-a] [path|glob]...  list files
  pwd                     print working directory
  cd <dir>                change directory
  mkdir <name>            create directory
  rm [-r] [-f] <name>     remove file or directory
  cat <file>              show file contents
  touch <file>            create file or update its timestamp
  echo <text> [> file]    print text or write it to a file
  status                  show CPU, memory and process count
  mv <src> <dst>          move file or directory
  cp <src> <dst>          copy file or directory
  history                 show past commands in this session
  help                    this help
  exit                    quit

You can also type natural language like:
  create a folder test
  delete file a.txt
  move file a.txt to backup";

pub(crate) enum Flow {
    Continue,
    Exit,
}

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, command: &str) -> Result<Flow, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, command: &str) -> Result<Flow, ShellError> {
        let line = command.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        match line.to_lowercase().as_str() {
            "exit" => return Ok(Flow::Exit),
            "help" => {
                self.session.remember(line);
                println!("{}", HELP);
                return Ok(Flow::Continue);
            }
            "history" => {
                self.session.remember(line);
                for (i, entry) in self.session.history().iter().enumerate() {
                    println!("{}: {}", i + 1, entry);
                }
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        if let Some(reply) = self.session.run(line) {
            print_reply(&self.highlighter, &reply);
        }
        Ok(Flow::Continue)
    }
}

/// Writes the translation notice, then the output, errors in red.
pub fn print_reply(highlighter: &SyntaxHighlighter, reply: &Reply) {
    if let Some(notice) = reply.notice() {
        println!("{}", highlighter.highlight_success(&notice));
    }

    if reply.output.is_empty() {
        return;
    }
    if reply.failed {
        println!("{}", highlighter.highlight_error(&reply.output));
    } else {
        println!("{}", reply.output);
    }
}
