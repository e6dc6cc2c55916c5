//! Natural-language phrases to restricted command lines.
//!
//! Translation is a first-match-wins walk over an ordered rule list. A rule
//! whose predicate matches but whose builder cannot produce a command (for
//! example `move x to` with nothing after `to`) lets the next rule try.

mod rules;

pub use rules::{Rule, RULES};

use tracing::debug;

/// Input text prepared once for every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase<'a> {
    /// Trimmed original text, case preserved.
    pub text: &'a str,
    /// Quote-aware tokens, or whitespace-split tokens when quoting is broken.
    pub tokens: Vec<String>,
    /// Lower-cased tokens joined by single spaces.
    pub lower: String,
}

impl<'a> Phrase<'a> {
    pub fn new(text: &'a str) -> Self {
        let text = text.trim();

        match shell_words::split(text) {
            Ok(tokens) => {
                let lower = tokens
                    .iter()
                    .map(|token| token.to_lowercase())
                    .collect::<Vec<_>>()
                    .join(" ");
                Self {
                    text,
                    tokens,
                    lower,
                }
            }
            Err(_) => Self {
                text,
                tokens: text.split_whitespace().map(String::from).collect(),
                lower: text.to_lowercase(),
            },
        }
    }

    pub fn last_token(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Translator {
    rules: &'static [Rule],
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// `None` means no rule recognized the text and the caller should treat
    /// it as a literal command.
    pub fn translate(&self, text: &str) -> Option<String> {
        let phrase = Phrase::new(text);

        self.rules
            .iter()
            .filter(|rule| (rule.matches)(&phrase))
            .find_map(|rule| {
                let command = (rule.build)(&phrase)?;
                debug!(rule = rule.name, input = text, %command, "translated phrase");
                Some(command)
            })
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }
}
