//! Built-in commands, executed in-process by the interpreter.
//!
//! The set is closed: classification produces a [`Builtin`] variant (or
//! usage output when the arguments do not parse) and everything else is an
//! external program. Argument parsing uses [`argh`], so each built-in carries
//! its own usage text.

use crate::command::ExitCode;
use crate::env::Environment;
use crate::history::History;
use crate::jobs::JobTable;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use std::path::PathBuf;

/// One classified built-in invocation, ready to execute.
pub enum Builtin {
    Cd(Cd),
    Pwd(Pwd),
    Exit(Exit),
    History(HistoryCmd),
    Jobs(Jobs),
    Fg(Fg),
}

/// What classification of a command name against the built-in set yielded.
pub enum Classified {
    /// A built-in with well-formed arguments.
    Builtin(Builtin),
    /// A built-in name with arguments argh rejected (or `--help`); `output`
    /// is argh's usage text.
    InvalidArgs { output: String, code: ExitCode },
}

impl Builtin {
    /// Classify `name` against the fixed built-in set. Returns `None` for
    /// anything that should be launched as an external program.
    pub fn classify(name: &str, args: &[&str]) -> Option<Classified> {
        Some(match name {
            "cd" => parse(name, args, Builtin::Cd),
            "pwd" => parse(name, args, Builtin::Pwd),
            "exit" => parse(name, args, Builtin::Exit),
            "history" => parse(name, args, Builtin::History),
            "jobs" => parse(name, args, Builtin::Jobs),
            // A malformed index is an invalid target, not a usage problem.
            "fg" => match parse(name, args, Builtin::Fg) {
                Classified::InvalidArgs { code, .. } if code != 0 => Classified::InvalidArgs {
                    output: format!("fg: no such job: {}\n", args.join(" ")),
                    code,
                },
                classified => classified,
            },
            _ => return None,
        })
    }

    /// Execute the built-in against the interpreter's state.
    pub fn execute(
        self,
        out: &mut dyn Write,
        env: &mut Environment,
        history: &History,
        jobs: &mut JobTable,
    ) -> Result<ExitCode> {
        match self {
            Builtin::Cd(cmd) => cmd.execute(env),
            Builtin::Pwd(cmd) => cmd.execute(out, env),
            Builtin::Exit(cmd) => cmd.execute(env),
            Builtin::History(cmd) => cmd.execute(out, history),
            Builtin::Jobs(cmd) => cmd.execute(out, jobs),
            Builtin::Fg(cmd) => cmd.execute(out, jobs),
        }
    }
}

fn parse<T: FromArgs>(name: &str, args: &[&str], wrap: fn(T) -> Builtin) -> Classified {
    match T::from_args(&[name], args) {
        Ok(cmd) => Classified::Builtin(wrap(cmd)),
        Err(EarlyExit { output, status }) => Classified::InvalidArgs {
            output,
            code: if status.is_err() { 1 } else { 0 },
        },
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
/// Defaults to the directory named by HOME when no target is given.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to, absolute or relative to the current directory
    pub target: Option<String>,
}

impl Cd {
    fn execute(self, env: &mut Environment) -> Result<ExitCode> {
        let target = match &self.target {
            Some(t) if !t.is_empty() => PathBuf::from(t),
            _ => match env.get_var("HOME") {
                Some(home) => PathBuf::from(home),
                None => return Ok(1),
            },
        };

        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        // A failed cd is a silent no-op; the directory just stays put.
        let Ok(canonical) = std::fs::canonicalize(&new_dir) else {
            return Ok(1);
        };
        if std::env::set_current_dir(&canonical).is_err() {
            return Ok(1);
        }
        env.set_var("PWD", canonical.to_string_lossy());
        env.current_dir = canonical;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the current working directory.
pub struct Pwd {}

impl Pwd {
    fn execute(self, out: &mut dyn Write, env: &Environment) -> Result<ExitCode> {
        writeln!(out, "{}", env.current_dir.to_string_lossy())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the interpreter with status 0.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored
    pub _args: Vec<String>,
}

impl Exit {
    fn execute(self, env: &mut Environment) -> Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the retained command history with absolute numbering.
pub struct HistoryCmd {}

impl HistoryCmd {
    fn execute(self, out: &mut dyn Write, history: &History) -> Result<ExitCode> {
        for (index, text) in history.list() {
            writeln!(out, "{} {}", index, text)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List background jobs, reaping any that have finished.
pub struct Jobs {}

impl Jobs {
    fn execute(self, out: &mut dyn Write, jobs: &mut JobTable) -> Result<ExitCode> {
        let reaped = jobs.poll(out, true)?;
        if reaped == 0 && jobs.is_empty() {
            writeln!(out, "no background jobs")?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Bring a background job to the foreground and wait for it.
pub struct Fg {
    #[argh(positional)]
    /// job position (1-based) as shown by `jobs`; the newest job when omitted
    pub index: Option<usize>,
}

impl Fg {
    fn execute(self, out: &mut dyn Write, jobs: &mut JobTable) -> Result<ExitCode> {
        match jobs.wait(self.index) {
            Ok(code) => Ok(code),
            Err(e) => {
                writeln!(out, "fg: {}", e)?;
                Ok(1)
            }
        }
    }
}
