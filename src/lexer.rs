//! Lexical analysis for a single command line.
//!
//! The grammar here is deliberately tiny: words separated by blanks, plus the
//! trailing-`&` background marker. There are no quotes, pipes or redirections.

/// Maximum number of bytes of one command line that the interpreter looks at.
///
/// Longer input is truncated at the read boundary (see
/// [`Interpreter::repl`](crate::Interpreter::repl)); the lexer itself accepts
/// lines of any length.
pub const MAX_LINE: usize = 80;

/// The result of lexing one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Whitespace-separated arguments, in input order. Empty for a blank line.
    pub argv: Vec<String>,
    /// True when the line carried a `&` anywhere.
    pub background: bool,
}

impl ParsedLine {
    /// A blank line: no arguments, foreground.
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Split a raw line into an argument vector and a background flag.
///
/// Space and tab end the current word. `&` is never part of any argument: it
/// sets the background flag and cuts the current word short right where it
/// stands, so a `&` fused to the last word (`sleep 5&`) works. Whatever
/// follows a `&` up to the next separator is dropped with it — `ec&ho` yields
/// just `ec`. This mirrors the historical character scan, where the `&` byte
/// became the word's terminator and hid the rest of the word.
pub fn parse_line(line: &str) -> ParsedLine {
    let mut argv = Vec::new();
    let mut background = false;
    let mut current = String::new();
    let mut discarding = false;

    for ch in line.chars() {
        match ch {
            ' ' | '\t' | '\n' => {
                discarding = false;
                if !current.is_empty() {
                    argv.push(std::mem::take(&mut current));
                }
            }
            '&' => {
                background = true;
                discarding = true;
                if !current.is_empty() {
                    argv.push(std::mem::take(&mut current));
                }
            }
            _ if discarding => {}
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        argv.push(current);
    }

    ParsedLine { argv, background }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        parse_line(line).argv
    }

    #[test]
    fn test_splits_on_blanks() {
        let parsed = parse_line("ls -l  /tmp");
        assert_eq!(parsed.argv, vec!["ls", "-l", "/tmp"]);
        assert!(!parsed.background);
    }

    #[test]
    fn test_tabs_are_separators() {
        assert_eq!(args("echo\thi\tthere"), vec!["echo", "hi", "there"]);
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert!(parse_line("").is_empty());
        assert!(parse_line("   \t  ").is_empty());
        assert!(parse_line("\n").is_empty());
    }

    #[test]
    fn test_trailing_newline_ignored() {
        assert_eq!(args("pwd\n"), vec!["pwd"]);
    }

    #[test]
    fn test_detached_ampersand() {
        let parsed = parse_line("sleep 5 &");
        assert_eq!(parsed.argv, vec!["sleep", "5"]);
        assert!(parsed.background);
    }

    #[test]
    fn test_fused_ampersand() {
        let parsed = parse_line("sleep 5&");
        assert_eq!(parsed.argv, vec!["sleep", "5"]);
        assert!(parsed.background);
        assert!(parsed.argv.iter().all(|a| !a.contains('&')));
    }

    #[test]
    fn test_mid_word_ampersand_swallows_the_word_remainder() {
        // Preserved historical behavior: '&' terminates the open word and
        // the rest of that word never reaches argv.
        let parsed = parse_line("ec&ho hi");
        assert_eq!(parsed.argv, vec!["ec", "hi"]);
        assert!(parsed.background);
    }

    #[test]
    fn test_discarding_stops_at_the_next_separator() {
        let parsed = parse_line("a&b c");
        assert_eq!(parsed.argv, vec!["a", "c"]);
        assert!(parsed.background);
    }

    #[test]
    fn test_lone_ampersand() {
        let parsed = parse_line("&");
        assert!(parsed.argv.is_empty());
        assert!(parsed.background);
    }
}
