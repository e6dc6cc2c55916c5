use cordon::core::{Config, Session};
use cordon::flags::Flags;
use cordon::highlight::SyntaxHighlighter;
use cordon::path::Sandbox;
use cordon::shell::{print_reply, Shell};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), cordon::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("cordon {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    cordon::logging::init(flags.is_set("debug"));

    let mut config = match flags.get_value("config") {
        Some(path) => Config::with_file(path),
        None => Config::new(),
    };
    config.load()?;

    let root = match (flags.get_value("root"), config.root()) {
        (Some(flag_root), _) => PathBuf::from(flag_root),
        (None, Some(config_root)) => config_root.to_path_buf(),
        (None, None) => env::current_dir()?,
    };
    let mut session = Session::new(Sandbox::new(&root)?, &config);

    if let Some(line) = flags.get_value("exec").cloned() {
        if let Some(reply) = session.run(&line) {
            print_reply(&SyntaxHighlighter::new(), &reply);
            if reply.failed {
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let mut shell = Shell::new(flags, session, &config)?;
    shell.run()
}
