use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::path::{PathExpander, Sandbox};

mod cat;
mod cd;
mod cp;
mod echo;
mod fs_ops;
mod ls;
mod mkdir;
mod mv;
mod pwd;
mod rm;
mod status;
mod touch;

pub use cat::CatCommand;
pub use cd::CdCommand;
pub use cp::CpCommand;
pub use echo::EchoCommand;
pub use ls::LsCommand;
pub use mkdir::MkdirCommand;
pub use mv::MvCommand;
pub use pwd::PwdCommand;
pub use rm::RmCommand;
pub use status::{human_size, StatusCommand};
pub use touch::TouchCommand;

/// Every operation name the interpreter dispatches on.
pub const VOCABULARY: [&str; 11] = [
    "pwd", "ls", "cd", "mkdir", "rm", "cat", "touch", "echo", "status", "mv", "cp",
];

#[derive(Debug)]
pub enum CommandError {
    Parse(String),
    Unknown(String),
    Usage {
        op: &'static str,
        message: String,
    },
    NotFound {
        op: &'static str,
        message: String,
    },
    Escape {
        op: &'static str,
        arg: String,
    },
    Io {
        op: &'static str,
        source: std::io::Error,
    },
    Status(String),
}

impl CommandError {
    pub fn usage(op: &'static str, message: impl Into<String>) -> Self {
        CommandError::Usage {
            op,
            message: message.into(),
        }
    }

    pub fn not_found(op: &'static str, message: impl Into<String>) -> Self {
        CommandError::NotFound {
            op,
            message: message.into(),
        }
    }

    pub fn io(op: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| CommandError::Io { op, source }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Parse(msg) => write!(f, "parse error: {}", msg),
            CommandError::Unknown(cmd) => write!(f, "Unknown command: {}", cmd),
            CommandError::Usage { op, message } => write!(f, "{}: {}", op, message),
            CommandError::NotFound { op, message } => write!(f, "{}: {}", op, message),
            CommandError::Escape { op, arg } => {
                write!(f, "{}: operation would escape sandbox: {}", op, arg)
            }
            CommandError::Io { op, source } => write!(f, "{} error: {}", op, source),
            CommandError::Status(msg) => write!(f, "status error: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result of one interpreter call: text for the user and the working
/// directory the caller should continue from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub cwd: PathBuf,
    pub failed: bool,
}

impl Outcome {
    fn unchanged(cwd: &Path) -> Self {
        Self {
            output: String::new(),
            cwd: cwd.to_path_buf(),
            failed: false,
        }
    }

    fn failure(error: &CommandError, cwd: &Path) -> Self {
        Self {
            output: error.to_string(),
            cwd: cwd.to_path_buf(),
            failed: true,
        }
    }
}

/// What an operation sees while it runs.
pub struct Context<'a> {
    pub cwd: &'a Path,
    pub sandbox: &'a Sandbox,
    expander: &'a PathExpander,
}

impl<'a> Context<'a> {
    /// Resolves `raw` against the working directory and refuses anything
    /// that lands outside the sandbox.
    pub fn resolve(&self, op: &'static str, raw: &str) -> Result<PathBuf, CommandError> {
        let path = self.expander.resolve(self.cwd, raw);
        self.confine(op, raw, path)
    }

    /// Checks a path derived after resolution, such as `dst/<name>`.
    pub fn confine(&self, op: &'static str, arg: &str, path: PathBuf) -> Result<PathBuf, CommandError> {
        if !self.sandbox.contains(&path) {
            warn!(op, arg, path = %path.display(), "rejected path outside sandbox");
            return Err(CommandError::Escape {
                op,
                arg: arg.to_string(),
            });
        }
        Ok(path)
    }

    pub fn expander(&self) -> &PathExpander {
        self.expander
    }

    /// Success that leaves the working directory where it was.
    pub fn stay(&self, output: impl Into<String>) -> Outcome {
        Outcome {
            output: output.into(),
            cwd: self.cwd.to_path_buf(),
            failed: false,
        }
    }
}

pub trait Command {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError>;
}

/// One parsed invocation. Each variant carries its own arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Pwd(PwdCommand),
    Ls(LsCommand),
    Cd(CdCommand),
    Mkdir(MkdirCommand),
    Rm(RmCommand),
    Cat(CatCommand),
    Touch(TouchCommand),
    Echo(EchoCommand),
    Status(StatusCommand),
    Mv(MvCommand),
    Cp(CpCommand),
}

impl Operation {
    /// `Ok(None)` for an empty token list.
    pub fn parse(tokens: &[String]) -> Result<Option<Self>, CommandError> {
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let operation = match name.as_str() {
            "pwd" => Operation::Pwd(PwdCommand),
            "ls" => Operation::Ls(LsCommand::parse(args)),
            "cd" => Operation::Cd(CdCommand::parse(args)?),
            "mkdir" => Operation::Mkdir(MkdirCommand::parse(args)?),
            "rm" => Operation::Rm(RmCommand::parse(args)?),
            "cat" => Operation::Cat(CatCommand::parse(args)?),
            "touch" => Operation::Touch(TouchCommand::parse(args)?),
            "echo" => Operation::Echo(EchoCommand::parse(args)?),
            "status" => Operation::Status(StatusCommand::new()),
            "mv" => Operation::Mv(MvCommand::parse(args)?),
            "cp" => Operation::Cp(CpCommand::parse(args)?),
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(operation))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Pwd(_) => "pwd",
            Operation::Ls(_) => "ls",
            Operation::Cd(_) => "cd",
            Operation::Mkdir(_) => "mkdir",
            Operation::Rm(_) => "rm",
            Operation::Cat(_) => "cat",
            Operation::Touch(_) => "touch",
            Operation::Echo(_) => "echo",
            Operation::Status(_) => "status",
            Operation::Mv(_) => "mv",
            Operation::Cp(_) => "cp",
        }
    }
}

impl Command for Operation {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        match self {
            Operation::Pwd(cmd) => cmd.execute(ctx),
            Operation::Ls(cmd) => cmd.execute(ctx),
            Operation::Cd(cmd) => cmd.execute(ctx),
            Operation::Mkdir(cmd) => cmd.execute(ctx),
            Operation::Rm(cmd) => cmd.execute(ctx),
            Operation::Cat(cmd) => cmd.execute(ctx),
            Operation::Touch(cmd) => cmd.execute(ctx),
            Operation::Echo(cmd) => cmd.execute(ctx),
            Operation::Status(cmd) => cmd.execute(ctx),
            Operation::Mv(cmd) => cmd.execute(ctx),
            Operation::Cp(cmd) => cmd.execute(ctx),
        }
    }
}

/// Runs restricted command lines against the filesystem under one sandbox.
///
/// The interpreter holds no per-session state: the working directory comes
/// in with every call and the candidate replacement goes out in the
/// [`Outcome`]. Failures never escape as `Err`; they become the outcome's
/// text.
#[derive(Debug, Clone)]
pub struct Interpreter {
    sandbox: Sandbox,
    path_expander: PathExpander,
}

impl Interpreter {
    pub fn new(sandbox: Sandbox) -> Self {
        Self {
            sandbox,
            path_expander: PathExpander::new(),
        }
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn execute(&self, command: &str, cwd: &Path) -> Outcome {
        match self.try_execute(command, cwd) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(command, error = %e, "command failed");
                Outcome::failure(&e, cwd)
            }
        }
    }

    fn try_execute(&self, command: &str, cwd: &Path) -> Result<Outcome, CommandError> {
        let tokens =
            shell_words::split(command).map_err(|e| CommandError::Parse(e.to_string()))?;

        let Some(operation) = Operation::parse(&tokens)? else {
            return Ok(Outcome::unchanged(cwd));
        };

        debug!(op = operation.name(), args = tokens.len() - 1, "dispatching");
        let ctx = Context {
            cwd,
            sandbox: &self.sandbox,
            expander: &self.path_expander,
        };
        operation.execute(&ctx)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A fresh sandbox plus an interpreter confined to it.
    pub(crate) fn setup_test_env() -> (TempDir, Interpreter, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let sandbox = Sandbox::new(temp_dir.path()).unwrap();
        let root = sandbox.root().to_path_buf();
        (temp_dir, Interpreter::new(sandbox), root)
    }

    fn tokens(line: &str) -> Vec<String> {
        shell_words::split(line).unwrap()
    }

    #[test]
    fn test_empty_and_blank_input() {
        let (_temp_dir, interpreter, root) = setup_test_env();

        for line in ["", "   ", "\t"] {
            let outcome = interpreter.execute(line, &root);
            assert_eq!(outcome.output, "");
            assert_eq!(outcome.cwd, root);
            assert!(!outcome.failed);
        }
    }

    #[test]
    fn test_malformed_quotes_are_parse_errors() {
        let (_temp_dir, interpreter, root) = setup_test_env();

        for line in ["echo \"unterminated", "cat 'half", "echo trailing\\"] {
            let outcome = interpreter.execute(line, &root);
            assert!(outcome.output.starts_with("parse error:"), "{}", line);
            assert!(outcome.failed);
            assert_eq!(outcome.cwd, root);
        }
    }

    #[test]
    fn test_unknown_command() {
        let (_temp_dir, interpreter, root) = setup_test_env();

        let outcome = interpreter.execute("frobnicate now", &root);
        assert_eq!(outcome.output, "Unknown command: frobnicate");
        assert_eq!(outcome.cwd, root);
    }

    #[test]
    fn test_dispatch_is_case_sensitive() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        assert_eq!(interpreter.execute("PWD", &root).output, "Unknown command: PWD");
    }

    #[test]
    fn test_parse_builds_typed_operations() {
        assert_eq!(Operation::parse(&[]).unwrap(), None);

        let op = Operation::parse(&tokens("rm -rf build")).unwrap().unwrap();
        assert_eq!(op.name(), "rm");

        for name in VOCABULARY {
            let parsed = Operation::parse(&tokens(&format!("{} a b", name)));
            assert_eq!(parsed.unwrap().unwrap().name(), name);
        }
    }

    #[test]
    fn test_usage_errors_from_parse() {
        let cases = [
            ("cd", "cd: missing argument"),
            ("mkdir", "mkdir: missing folder name"),
            ("rm -r", "rm: missing target name"),
            ("cat", "cat: missing filename"),
            ("touch", "touch: missing filename"),
            ("echo hi >", "echo: no file specified for redirection"),
            ("mv one", "mv: usage: mv <src> <dst>"),
            ("cp", "cp: usage: cp <src> <dst>"),
        ];

        for (line, expected) in cases {
            let err = Operation::parse(&tokens(line)).unwrap_err();
            assert!(matches!(err, CommandError::Usage { .. }));
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_every_path_operation_refuses_escape() {
        let (temp_dir, interpreter, root) = setup_test_env();
        let outside = TempDir::new().unwrap();
        let victim = outside.path().join("victim.txt");
        fs::write(&victim, "keep me").unwrap();
        let victim_arg = victim.to_string_lossy().to_string();

        let lines = [
            format!("cat {}", victim_arg),
            format!("rm {}", victim_arg),
            format!("touch {}", victim_arg),
            format!("echo gone > {}", victim_arg),
            format!("mv {} here.txt", victim_arg),
            format!("cp {} here.txt", victim_arg),
            format!("cp here.txt {}", victim_arg),
            format!("mkdir {}/sub", outside.path().display()),
            "cd ../..".to_string(),
            "ls ..".to_string(),
        ];
        fs::write(root.join("here.txt"), "inside").unwrap();

        for line in &lines {
            let outcome = interpreter.execute(line, &root);
            assert!(
                outcome.output.contains("operation would escape sandbox"),
                "{} -> {}",
                line,
                outcome.output
            );
            assert_eq!(outcome.cwd, root);
        }

        assert_eq!(fs::read_to_string(&victim).unwrap(), "keep me");
        assert!(!outside.path().join("sub").exists());
        assert_eq!(fs::read_to_string(root.join("here.txt")).unwrap(), "inside");
        drop(temp_dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_writes_through_dangling_symlink_are_refused() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        let outside = TempDir::new().unwrap();
        let created = outside.path().join("created.txt");
        std::os::unix::fs::symlink(&created, root.join("dangling")).unwrap();
        fs::write(root.join("here.txt"), "inside").unwrap();

        for line in [
            "echo hi > dangling",
            "touch dangling",
            "cp here.txt dangling",
            "mv here.txt dangling",
            "mkdir dangling/sub",
            "cat dangling",
        ] {
            let outcome = interpreter.execute(line, &root);
            assert!(
                outcome.output.contains("operation would escape sandbox"),
                "{} -> {}",
                line,
                outcome.output
            );
        }

        assert!(!created.exists());
        assert_eq!(fs::read_to_string(root.join("here.txt")).unwrap(), "inside");
    }

    #[cfg(unix)]
    #[test]
    fn test_link_at_destination_basename_is_refused() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        let outside = TempDir::new().unwrap();
        let victim = outside.path().join("victim.txt");
        fs::write(&victim, "keep me").unwrap();

        fs::create_dir(root.join("backup")).unwrap();
        std::os::unix::fs::symlink(&victim, root.join("backup/a.txt")).unwrap();
        fs::write(root.join("a.txt"), "overwrite").unwrap();

        let outcome = interpreter.execute("cp a.txt backup", &root);
        assert_eq!(outcome.output, "cp: operation would escape sandbox: backup");

        let outcome = interpreter.execute("mv a.txt backup", &root);
        assert_eq!(outcome.output, "mv: operation would escape sandbox: backup");

        assert_eq!(fs::read_to_string(&victim).unwrap(), "keep me");
        assert!(root.join("a.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_link_moved_shallower_cannot_be_written() {
        let (_temp_dir, interpreter, root) = setup_test_env();
        let marker = "cordon_relative_link_marker";
        fs::create_dir_all(root.join("a/b")).unwrap();
        std::os::unix::fs::symlink(format!("../../{}", marker), root.join("a/b/l")).unwrap();

        let outcome = interpreter.execute("mv a/b/l l", &root);
        assert_eq!(outcome.output, "Moved a/b/l -> l");

        let outcome = interpreter.execute("echo escaped > l", &root);
        assert_eq!(outcome.output, "echo: operation would escape sandbox: l");

        let above = root.parent().and_then(|p| p.parent()).unwrap();
        assert!(!above.join(marker).exists());
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::Parse("missing closing quote".to_string()),
            CommandError::Unknown("x".to_string()),
            CommandError::usage("cd", "missing argument"),
            CommandError::not_found("rm", "no such file or directory"),
            CommandError::Escape {
                op: "cat",
                arg: "/etc/passwd".to_string(),
            },
            CommandError::Io {
                op: "cat",
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "io error"),
            },
            CommandError::Status("unsupported".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
