use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct AliasManager {
    aliases: HashMap<Box<str>, Box<str>>,
}

impl AliasManager {
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    pub fn add(&mut self, name: &str, command: &str) {
        self.aliases.insert(name.into(), command.into());
    }

    pub fn get<'a>(&'a self, cmd: &str) -> Option<Cow<'a, str>> {
        self.aliases.get(cmd).map(|s| Cow::Borrowed(&**s))
    }

    /// Replaces the first word only; the rest of the line, quoting and
    /// spacing included, is kept as typed.
    pub fn expand_command<'a>(&'a self, command: &'a str) -> Cow<'a, str> {
        let trimmed = command.trim_start();
        let word_end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (first_word, rest) = trimmed.split_at(word_end);

        match self.aliases.get(first_word) {
            Some(alias_value) => Cow::Owned(format!("{}{}", alias_value, rest)),
            None => Cow::Borrowed(command),
        }
    }

    pub fn get_all(&self) -> BTreeMap<Cow<'_, str>, Cow<'_, str>> {
        self.aliases
            .iter()
            .map(|(k, v)| (Cow::Borrowed(&**k), Cow::Borrowed(&**v)))
            .collect()
    }
}
