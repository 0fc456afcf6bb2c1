use crate::builtin::{Builtin, Classified};
use crate::command::{Command, ExitCode};
use crate::env::Environment;
use crate::external;
use crate::history::{History, RecallError};
use crate::jobs::JobTable;
use crate::lexer::{self, MAX_LINE};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

/// The interactive command interpreter.
///
/// Owns the three pieces of state the loop mutates: the [`Environment`] for
/// `cd`/`pwd` and child process setup, the [`History`] ring, and the
/// [`JobTable`] of background children. One call to
/// [`run_line`](Interpreter::run_line) is one full loop iteration: lex, log,
/// dispatch, then reap finished background jobs.
///
/// Example
/// ```no_run
/// use minishell::Interpreter;
/// let mut sh = Interpreter::new();
/// let code = sh.run_line("echo hello", &mut std::io::stdout()).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    env: Environment,
    history: History,
    jobs: JobTable,
}

impl Interpreter {
    /// An interpreter with the default history capacity and job limit.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            history: History::default(),
            jobs: JobTable::default(),
        }
    }

    /// An interpreter with explicit history capacity and background job limit.
    pub fn with_limits(history_size: usize, job_limit: usize) -> Self {
        Self {
            env: Environment::new(),
            history: History::new(history_size),
            jobs: JobTable::new(job_limit),
        }
    }

    /// The command history, mainly for inspection.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The background job table, mainly for inspection.
    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    /// True once `exit` has been executed.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Execute one input line and return its exit code.
    ///
    /// User-level failures (unknown program, bad recall argument, missing
    /// `fg` target…) are written to `out` and returned as a non-zero code;
    /// `Err` is reserved for failures of the output sink itself.
    pub fn run_line(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let parsed = lexer::parse_line(line);
        if parsed.is_empty() {
            return Ok(0);
        }
        let command = Command::from(parsed);

        let command = if command.name() == "r" {
            // Recall: resolve the target text, log the *resolved* line as a
            // fresh history entry, then execute it as if retyped.
            let resolved = match self.resolve_recall(&command.args()) {
                Ok(text) => text,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    return Ok(1);
                }
            };
            self.history.append(resolved.clone());
            let reparsed = lexer::parse_line(&resolved);
            if reparsed.is_empty() {
                return Ok(0);
            }
            Command::from(reparsed)
        } else {
            self.history.append(command.raw_text());
            command
        };

        let args = command.args();
        let (code, already_polled) = match Builtin::classify(command.name(), &args) {
            Some(Classified::Builtin(builtin)) => {
                // `jobs` runs a full poll itself; a second sweep in the same
                // iteration would be redundant.
                let polls = matches!(builtin, Builtin::Jobs(_));
                let code = builtin.execute(out, &mut self.env, &self.history, &mut self.jobs)?;
                (code, polls)
            }
            Some(Classified::InvalidArgs { output, code }) => {
                out.write_all(output.as_bytes())?;
                if !output.ends_with('\n') {
                    writeln!(out)?;
                }
                (code, false)
            }
            None => (external::launch(&command, &self.env, &mut self.jobs, out)?, false),
        };

        // Reap jobs that finished since the previous iteration. Done is only
        // ever observed here or in the `jobs` built-in, never asynchronously.
        if !already_polled {
            self.jobs.poll(out, false)?;
        }
        Ok(code)
    }

    fn resolve_recall(&self, args: &[&str]) -> Result<String, RecallError> {
        match args {
            [] => self.history.recall_last().map(str::to_owned),
            [arg] => {
                let mut chars = arg.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.history.recall_by_prefix(c).map(str::to_owned),
                    _ => Err(RecallError::InvalidArgument(arg.to_string())),
                }
            }
            _ => Err(RecallError::InvalidArgument(args.join(" "))),
        }
    }

    /// The read-eval loop: prompt, read one line, execute, repeat.
    ///
    /// Ends cleanly on `exit` or end of input (Ctrl-D). Read errors are
    /// reported and the loop re-prompts; Ctrl-C just discards the current
    /// line, there is no signal forwarding to children.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut stdout = std::io::stdout();

        while !self.env.should_exit {
            match rl.readline(" COMMAND->") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if let Err(e) = self.run_line(truncate_line(&line), &mut stdout) {
                        eprintln!("minishell: {}", e);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("error reading the command: {}", err);
                }
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp input to [`MAX_LINE`] bytes, respecting character boundaries.
fn truncate_line(line: &str) -> &str {
    if line.len() <= MAX_LINE {
        return line;
    }
    let mut end = MAX_LINE;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
