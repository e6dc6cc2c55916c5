use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::commands::Interpreter;
use super::config::{AliasManager, Config};
use super::translate::Translator;
use crate::path::Sandbox;

/// Words that send a line through the translator before dispatch.
pub const TRIGGER_WORDS: [&str; 10] = [
    "create", "make", "delete", "remove", "move", "rename", "copy", "place", "open", "read",
];

pub const ESCAPE_NOTICE: &str = "Operation would escape sandbox. Ignored.";

/// What one submitted line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The line the interpreter actually ran.
    pub command: String,
    /// Set when the translator rewrote the input.
    pub translated: bool,
    pub output: String,
    pub failed: bool,
    /// Set when the post-run directory check rejected the outcome.
    pub escaped: bool,
}

impl Reply {
    pub fn notice(&self) -> Option<String> {
        self.translated
            .then(|| format!("[NLP] Interpreted as: {}", self.command))
    }
}

/// One user's state: working directory, aliases, history and transcript,
/// bound to a single sandbox.
#[derive(Debug, Clone)]
pub struct Session {
    interpreter: Interpreter,
    translator: Translator,
    aliases: AliasManager,
    cwd: PathBuf,
    history: Vec<String>,
    transcript: String,
}

impl Session {
    pub fn new(sandbox: Sandbox, config: &Config) -> Self {
        let cwd = sandbox.root().to_path_buf();
        Self {
            interpreter: Interpreter::new(sandbox),
            translator: Translator::new(),
            aliases: config.aliases().clone(),
            cwd,
            history: Vec::new(),
            transcript: String::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn sandbox(&self) -> &Sandbox {
        self.interpreter.sandbox()
    }

    pub fn aliases(&self) -> &AliasManager {
        &self.aliases
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Blank lines produce `None` and are not recorded.
    pub fn run(&mut self, line: &str) -> Option<Reply> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let expanded = self.aliases.expand_command(line).into_owned();
        let (command, translated) = match self.translate(&expanded) {
            Some(converted) => (converted, true),
            None => (expanded, false),
        };

        let outcome = self.interpreter.execute(&command, &self.cwd);
        let reply = if self.sandbox().contains(&outcome.cwd) {
            self.cwd = outcome.cwd;
            Reply {
                command,
                translated,
                output: outcome.output,
                failed: outcome.failed,
                escaped: false,
            }
        } else {
            warn!(command = %command, cwd = %outcome.cwd.display(), "discarded directory outside sandbox");
            Reply {
                command,
                translated,
                output: ESCAPE_NOTICE.to_string(),
                failed: true,
                escaped: true,
            }
        };

        self.record(line, &reply.output);
        Some(reply)
    }

    /// Adds a line the front end handled itself to the history only.
    pub fn remember(&mut self, line: &str) {
        self.history.push(line.trim().to_string());
    }

    fn translate(&self, line: &str) -> Option<String> {
        let lower = line.to_lowercase();
        let triggered = lower
            .split_whitespace()
            .any(|word| TRIGGER_WORDS.contains(&word));
        if !triggered {
            return None;
        }

        let converted = self.translator.translate(line);
        debug!(line, converted = ?converted, "natural language gate");
        converted
    }

    fn record(&mut self, line: &str, output: &str) {
        self.history.push(line.to_string());
        self.transcript.push_str(&format!("$ {}\n{}\n\n", line, output));
    }
}
