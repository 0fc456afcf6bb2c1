//! Tracking of backgrounded child processes.
//!
//! The [`JobTable`] owns the [`Child`] handle of every background command
//! until it is reaped. Jobs are displayed with 1-based positions that are
//! recomputed on every report; a position printed by one command is not a
//! stable handle and must not be reused after the table has changed.

use crate::command::ExitCode;
use std::fmt;
use std::io::Write;
use std::process::Child;

/// Default limit on simultaneously tracked background jobs.
pub const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The table already holds its configured maximum of live jobs.
    CapacityExceeded(usize),
    /// A `fg` target did not resolve to a live job.
    NoSuchJob(Option<usize>),
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::CapacityExceeded(limit) => {
                write!(f, "too many background jobs (limit {})", limit)
            }
            JobError::NoSuchJob(Some(index)) => write!(f, "no such job: {}", index),
            JobError::NoSuchJob(None) => write!(f, "no current job"),
        }
    }
}

impl std::error::Error for JobError {}

struct Job {
    child: Child,
    command: String,
}

/// Bounded collection of live background jobs, polled in registration order.
pub struct JobTable {
    jobs: Vec<Job>,
    limit: usize,
}

impl JobTable {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            jobs: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// True when no further job can be registered. The launcher checks this
    /// before spawning so that rejection happens before process creation.
    pub fn is_full(&self) -> bool {
        self.jobs.len() >= self.limit
    }

    /// The configured maximum of simultaneously tracked jobs.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Track a freshly spawned background child. Returns the job's current
    /// 1-based position.
    pub fn register(&mut self, child: Child, command: String) -> Result<usize, JobError> {
        if self.is_full() {
            return Err(JobError::CapacityExceeded(self.limit));
        }
        self.jobs.push(Job { child, command });
        Ok(self.jobs.len())
    }

    /// Non-blocking sweep over every tracked job, in registration order.
    ///
    /// Jobs whose process has exited are reported as `Done` and removed, so a
    /// completion is observed exactly once. A job whose handle errors out is
    /// removed too, but reported as `Lost` with the error so it cannot be
    /// mistaken for a normal completion. With `report_running` set, jobs that
    /// are still alive are reported too (the `jobs` built-in). Returns the
    /// number of jobs removed by this call.
    pub fn poll(&mut self, out: &mut dyn Write, report_running: bool) -> anyhow::Result<usize> {
        let mut reaped = 0;
        let mut i = 0;
        while i < self.jobs.len() {
            match self.jobs[i].child.try_wait() {
                Ok(None) => {
                    if report_running {
                        writeln!(
                            out,
                            "[{}] Running {} {}",
                            i + 1,
                            self.jobs[i].child.id(),
                            self.jobs[i].command
                        )?;
                    }
                    i += 1;
                }
                Ok(Some(_)) => {
                    let job = self.jobs.remove(i);
                    writeln!(out, "[{}] Done {}", i + 1, job.command)?;
                    reaped += 1;
                }
                // A failing handle can never report an exit; drop the job.
                Err(e) => {
                    let job = self.jobs.remove(i);
                    writeln!(out, "[{}] Lost {}: {}", i + 1, job.command, e)?;
                    reaped += 1;
                }
            }
        }
        Ok(reaped)
    }

    /// Blocking wait on one job, then remove it — the `fg` discipline.
    ///
    /// `index` is a 1-based position as shown by the last report; when absent
    /// the most recently registered job is taken. Returns the child's exit
    /// code, or [`JobError::NoSuchJob`] when the target does not resolve.
    pub fn wait(&mut self, index: Option<usize>) -> Result<ExitCode, JobError> {
        let slot = match index {
            Some(index) => {
                if index == 0 || index > self.jobs.len() {
                    return Err(JobError::NoSuchJob(Some(index)));
                }
                index - 1
            }
            None => self.jobs.len().checked_sub(1).ok_or(JobError::NoSuchJob(None))?,
        };
        let mut job = self.jobs.remove(slot);
        match job.child.wait() {
            Ok(status) => Ok(status.code().unwrap_or(-1)),
            Err(_) => Ok(-1),
        }
    }
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}
