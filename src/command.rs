use crate::lexer::ParsedLine;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// One parsed command, consumed within a single loop iteration.
///
/// A `Command` is never stored: the interpreter builds it from the lexer
/// output, logs its [`raw_text`](Command::raw_text) to history, executes it
/// and drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Program name followed by its arguments. Never empty.
    pub argv: Vec<String>,
    /// Run without blocking the interactive loop.
    pub background: bool,
}

impl Command {
    /// The canonical text logged to history: every argument followed by one
    /// space, with `&` appended when the command runs in the background.
    ///
    /// `echo hi` logs as `"echo hi "`, `sleep 5 &` as `"sleep 5 &"`.
    pub fn raw_text(&self) -> String {
        let mut text = String::new();
        for arg in &self.argv {
            text.push_str(arg);
            text.push(' ');
        }
        if self.background {
            text.push('&');
        }
        text
    }

    /// The program name, i.e. `argv[0]`.
    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    /// The arguments after the program name.
    pub fn args(&self) -> Vec<&str> {
        self.argv.iter().skip(1).map(|s| s.as_str()).collect()
    }
}

impl From<ParsedLine> for Command {
    fn from(parsed: ParsedLine) -> Self {
        Self {
            argv: parsed.argv,
            background: parsed.background,
        }
    }
}
