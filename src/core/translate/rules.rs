use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Phrase;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("translation patterns are valid regexes")
}

static CREATE: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?:^|\s)(?:create|make)\s+(?:a\s+)?(?:folder|directory)\s+"));
static DELETE: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?:^|\s)(?:delete|remove)\s+(?:the\s+)?(?:file|folder|directory)\s+"));
static READ: Lazy<Regex> = Lazy::new(|| pattern(r"(?:^|\s)(?:read|open|show)\s+(?:file\s+)?"));
static MOVE_PREFIX: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)^\s*move\s*(?:(?:file|folder|directory)\b)?\s*"));
static COPY_PREFIX: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)^\s*copy\s*(?:(?:file|folder|directory)\b)?\s*"));

/// One translation rule: a pure predicate over the phrase and a builder
/// for the command line it stands for.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Phrase<'_>) -> bool,
    pub build: fn(&Phrase<'_>) -> Option<String>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Rules in priority order.
pub static RULES: [Rule; 5] = [
    Rule {
        name: "create",
        matches: is_create,
        build: build_create,
    },
    Rule {
        name: "delete",
        matches: is_delete,
        build: build_delete,
    },
    Rule {
        name: "move",
        matches: is_move,
        build: build_move,
    },
    Rule {
        name: "copy",
        matches: is_copy,
        build: build_copy,
    },
    Rule {
        name: "read",
        matches: is_read,
        build: build_read,
    },
];

fn is_create(phrase: &Phrase<'_>) -> bool {
    CREATE.is_match(&phrase.lower)
}

fn build_create(phrase: &Phrase<'_>) -> Option<String> {
    let name = phrase.last_token()?;
    Some(format!("mkdir {}", shell_words::quote(name)))
}

fn is_delete(phrase: &Phrase<'_>) -> bool {
    DELETE.is_match(&phrase.lower)
}

/// A name without an extension is taken to be a folder. This is a naming
/// guess, not a filesystem check.
fn build_delete(phrase: &Phrase<'_>) -> Option<String> {
    let name = phrase.last_token()?;
    let quoted = shell_words::quote(name);

    if Path::new(name).extension().is_none() {
        Some(format!("rm -r {}", quoted))
    } else {
        Some(format!("rm {}", quoted))
    }
}

/// Any occurrence of "move" counts, so "remove ... to ..." is a move too.
fn is_move(phrase: &Phrase<'_>) -> bool {
    phrase.lower.contains("move")
        && (phrase.lower.contains(" to ") || phrase.lower.contains(" into "))
}

fn build_move(phrase: &Phrase<'_>) -> Option<String> {
    let separator = if phrase.lower.contains(" to ") {
        " to "
    } else {
        " into "
    };
    split_transfer(phrase.text, separator, &MOVE_PREFIX)
        .map(|(source, destination)| format!("mv {} {}", source, destination))
}

fn is_copy(phrase: &Phrase<'_>) -> bool {
    phrase.lower.contains("copy") && phrase.lower.contains(" to ")
}

fn build_copy(phrase: &Phrase<'_>) -> Option<String> {
    split_transfer(phrase.text, " to ", &COPY_PREFIX)
        .map(|(source, destination)| format!("cp {} {}", source, destination))
}

fn is_read(phrase: &Phrase<'_>) -> bool {
    READ.is_match(&phrase.lower)
}

fn build_read(phrase: &Phrase<'_>) -> Option<String> {
    let name = phrase.last_token()?;
    Some(format!("cat {}", shell_words::quote(name)))
}

/// Splits the original text on the first `separator` and strips the verb
/// phrase from the left side. Both halves keep the user's own quoting.
fn split_transfer<'a>(text: &'a str, separator: &str, prefix: &Regex) -> Option<(String, &'a str)> {
    let (left, right) = text.split_once(separator)?;
    let source = prefix.replace(left, "").trim().to_string();
    let destination = right.trim();

    if source.is_empty() || destination.is_empty() {
        return None;
    }
    Some((source, destination))
}
