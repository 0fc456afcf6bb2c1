//! Launching external programs with foreground/background wait discipline.

use crate::command::{Command, ExitCode};
use crate::env::Environment;
use crate::jobs::{JobError, JobTable};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::ExitStatus;

/// Launch one external command and apply the right wait discipline.
///
/// Foreground commands block until the child exits and surface its exit code.
/// Background commands are checked once immediately after the spawn: a child
/// that has already finished is reported without ever entering the job table,
/// anything still alive is registered and announced as `[id] pid`.
///
/// Every failure is local to this one command: an unresolvable program name
/// yields 127, a failed spawn 126, and a full job table rejects the command
/// before any process is created. The child side cannot fall back into the
/// interpreter loop — `spawn` either starts the target image or reports the
/// error in this process.
pub fn launch(
    command: &Command,
    env: &Environment,
    jobs: &mut JobTable,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let name = command.name();
    let search_paths = env.search_path();
    let Some(program) = resolve_program(OsStr::new(&search_paths), Path::new(name)) else {
        writeln!(out, "{}: command not found", name)?;
        return Ok(127);
    };

    if command.background && jobs.is_full() {
        writeln!(out, "{}", JobError::CapacityExceeded(jobs.limit()))?;
        return Ok(1);
    }

    let mut child = match std::process::Command::new(program.as_ref())
        .args(command.args())
        .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .current_dir(&env.current_dir)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            writeln!(out, "{}: failed to launch: {}", name, e)?;
            return Ok(126);
        }
    };

    if !command.background {
        let status = child.wait()?;
        return Ok(exit_code(status));
    }

    // Lost race: the child may already be gone before we can track it.
    if child.try_wait()?.is_some() {
        writeln!(out, "Done {}", command.raw_text())?;
        return Ok(0);
    }

    let pid = child.id();
    match jobs.register(child, command.raw_text()) {
        Ok(id) => writeln!(out, "[{}] {}", id, pid)?,
        Err(e) => writeln!(out, "{}", e)?,
    }
    Ok(0)
}

fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    match ExitStatusExt::signal(&status) {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a program name the way a typical shell would.
///
/// Absolute paths and paths with more than one component are checked as
/// given; a bare name is searched through each directory of `search_paths`
/// (the PATH variable) and the first existing match wins.
pub fn resolve_program<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.as_os_str().is_empty() {
        return None;
    }
    if path.is_absolute() || path.components().count() > 1 {
        return path.exists().then(|| Cow::Borrowed(path));
    }
    for dir in std::env::split_paths(search_paths) {
        let candidate = dir.join(path);
        if candidate.exists() {
            return Some(Cow::Owned(candidate));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::parse_line;
    use std::ffi::OsString;

    fn run(line: &str, jobs: &mut JobTable) -> (ExitCode, String) {
        let command = Command::from(parse_line(line));
        let env = Environment::new();
        let mut out = Vec::new();
        let code = launch(&command, &env, jobs, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    #[cfg(unix)]
    fn test_resolve_absolute_path() {
        let found = resolve_program(OsStr::new("/nonexistent"), Path::new("/bin/sh")).unwrap();
        assert_eq!(found.as_ref(), Path::new("/bin/sh"));
    }

    #[test]
    #[cfg(unix)]
    fn test_resolve_bare_name_via_path() {
        let found = resolve_program(OsStr::new("/bin:/usr/bin"), Path::new("sh")).unwrap();
        assert!(found.as_ref().ends_with("sh"));
        assert!(found.as_ref().is_absolute());
    }

    #[test]
    fn test_resolve_missing_is_none() {
        assert!(resolve_program(OsStr::new("/bin"), Path::new("no-such-program-xyz")).is_none());
        assert!(resolve_program(OsStr::new("/bin"), Path::new("")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_foreground_blocks_and_returns_exit_code() {
        let mut jobs = JobTable::default();
        let (code, _) = run("true", &mut jobs);
        assert_eq!(code, 0);
        let (code, _) = run("false", &mut jobs);
        assert_eq!(code, 1);
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_unknown_program_reports_not_found() {
        let mut jobs = JobTable::default();
        let (code, text) = run("definitely-not-a-program-xyz", &mut jobs);
        assert_eq!(code, 127);
        assert!(text.contains("command not found"));
        assert!(jobs.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_background_registers_job() {
        let mut jobs = JobTable::default();
        let (code, text) = run("sleep 0.3 &", &mut jobs);
        assert_eq!(code, 0);
        assert!(text.starts_with("[1] "));
        assert_eq!(jobs.len(), 1);

        // Clean up: reap the sleeper.
        jobs.wait(Some(1)).ok();
    }

    #[test]
    #[cfg(unix)]
    fn test_background_rejected_when_table_full() {
        let mut jobs = JobTable::new(1);
        let (code, _) = run("sleep 0.3 &", &mut jobs);
        assert_eq!(code, 0);

        let (code, text) = run("sleep 0.3 &", &mut jobs);
        assert_eq!(code, 1);
        assert!(text.contains("too many background jobs"));
        assert_eq!(jobs.len(), 1);

        jobs.wait(Some(1)).ok();
    }

    #[test]
    fn test_empty_search_path() {
        assert!(resolve_program(&OsString::new(), Path::new("sh")).is_none());
    }
}
