use std::{borrow::Cow, collections::BTreeMap};

use rustyline::completion::Pair;

use crate::core::commands::VOCABULARY;
use crate::highlight::BUILTINS;

#[derive(Clone)]
pub struct CommandCompleter {
    commands: BTreeMap<Cow<'static, str>, ()>,
    aliases: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCompleter {
    pub fn new() -> Self {
        let commands = VOCABULARY
            .iter()
            .chain(BUILTINS.iter())
            .map(|name| (Cow::Borrowed(*name), ()))
            .collect();

        Self {
            commands,
            aliases: BTreeMap::new(),
        }
    }

    pub fn update_aliases(&mut self, aliases: BTreeMap<Cow<'_, str>, Cow<'_, str>>) {
        self.aliases = aliases
            .into_iter()
            .map(|(k, v)| (Cow::Owned(k.into_owned()), Cow::Owned(v.into_owned())))
            .collect();
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let mut matches = Vec::new();
        let input = line.trim();

        self.add_command_matches(&mut matches, input);
        self.add_alias_matches(&mut matches, input);

        matches
    }

    fn add_command_matches(&self, matches: &mut Vec<Pair>, input: &str) {
        for cmd in self.commands.keys().filter(|cmd| cmd.starts_with(input)) {
            matches.push(Pair {
                display: cmd.to_string(),
                replacement: format!("{} ", cmd),
            });
        }
    }

    fn add_alias_matches(&self, matches: &mut Vec<Pair>, input: &str) {
        for (alias, expansion) in self.aliases.iter().filter(|(a, _)| a.starts_with(input)) {
            matches.push(Pair {
                display: format!("{} (alias: {})", alias, expansion),
                replacement: format!("{} ", alias),
            });
        }
    }
}
