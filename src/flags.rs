use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn new(short: &str, long: &str, description: &str, takes_value: bool) -> Self {
        Flag {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
            takes_value,
            value: None,
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let table = [
            ("help", Flag::new("-h", "--help", "Print this help message", false)),
            ("version", Flag::new("-v", "--version", "Show version information", false)),
            ("root", Flag::new("-r", "--root", "Sandbox root directory (default: current directory)", true)),
            ("config", Flag::new("-c", "--config", "Specify custom config file path", true)),
            ("quiet", Flag::new("-q", "--quiet", "Skip the startup banner", false)),
            ("debug", Flag::new("-d", "--debug", "Enable debug logging", false)),
            ("exec", Flag::new("-e", "--exec", "Run one command line and exit", true)),
        ];

        let flags = table
            .into_iter()
            .map(|(name, flag)| (name.to_string(), flag))
            .collect();

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("Unknown flag: {}", arg)))?;

            if flag.takes_value {
                let value = args.next().ok_or_else(|| {
                    ShellError::FlagError(format!("Flag {} requires a value", arg))
                })?;
                flag.value = Some(value.clone());
            } else {
                flag.value = Some("true".to_string());
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: cordon [OPTIONS]");
        println!("\nOptions:");

        let mut flags: Vec<&Flag> = self.flags.values().collect();
        flags.sort_by(|a, b| a.short.cmp(&b.short));
        for flag in flags {
            let long = if flag.takes_value {
                format!("{} <value>", flag.long)
            } else {
                flag.long.clone()
            };
            println!("  {}, {:<18} {}", flag.short, long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_boolean_flags() {
        let mut flags = Flags::new();
        flags.parse(&args(&["-q", "--debug"])).unwrap();

        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("debug"));
        assert!(!flags.is_set("help"));
    }

    #[test]
    fn test_value_flags() {
        let mut flags = Flags::new();
        flags
            .parse(&args(&["--root", "/srv/box", "-c", "rc", "-e", "ls -a"]))
            .unwrap();

        assert_eq!(flags.get_value("root").unwrap(), "/srv/box");
        assert_eq!(flags.get_value("config").unwrap(), "rc");
        assert_eq!(flags.get_value("exec").unwrap(), "ls -a");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let mut flags = Flags::new();
        let err = flags.parse(&args(&["--root"])).unwrap_err();
        assert_eq!(err.to_string(), "Flag error: Flag --root requires a value");
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let mut flags = Flags::new();
        let err = flags.parse(&args(&["--frob"])).unwrap_err();
        assert_eq!(err.to_string(), "Flag error: Unknown flag: --frob");
    }
}
