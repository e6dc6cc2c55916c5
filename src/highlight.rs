use inksac::prelude::*;

use crate::core::commands::VOCABULARY;

/// Words the REPL handles itself before the session sees the line.
pub const BUILTINS: [&str; 3] = ["help", "history", "exit"];

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Known command words in cyan, flags in yellow. Spacing is preserved so
    /// the edited line keeps its cursor positions.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() || input.trim().is_empty() {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len() * 2);
        let mut seen_word = false;
        for piece in input.split_inclusive(char::is_whitespace) {
            let word = piece.trim_end();
            let gap = &piece[word.len()..];

            if word.is_empty() {
                out.push_str(piece);
                continue;
            }

            let styled = if !seen_word && is_known_command(word) {
                let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                word.style(command_style).to_string()
            } else if seen_word && word.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                word.style(flag_style).to_string()
            } else {
                word.to_string()
            };
            seen_word = true;

            out.push_str(&styled);
            out.push_str(gap);
        }
        out
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_success(&self, message: &str) -> String {
        if !self.enabled() {
            return message.to_string();
        }

        let success_style = Style::builder().foreground(Color::Green).build();
        message.style(success_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}

fn is_known_command(word: &str) -> bool {
    VOCABULARY.contains(&word) || BUILTINS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> SyntaxHighlighter {
        SyntaxHighlighter {
            color_support: ColorSupport::NoColor,
        }
    }

    #[test]
    fn test_no_color_passes_through() {
        let highlighter = plain();
        assert_eq!(highlighter.highlight_command("rm  -rf x"), "rm  -rf x");
        assert_eq!(highlighter.highlight_error("bad"), "bad");
        assert_eq!(highlighter.highlight_success("ok"), "ok");
        assert_eq!(highlighter.highlight_hint("hint"), "hint");
    }

    #[test]
    fn test_known_commands() {
        assert!(is_known_command("ls"));
        assert!(is_known_command("history"));
        assert!(!is_known_command("frob"));
    }
}
