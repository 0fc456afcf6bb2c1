use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// The interpreter-owned view of the process environment.
///
/// Variables and the working directory are snapshotted once at startup and
/// owned here from then on: launched children receive `vars` and
/// `current_dir` from this struct, and `cd` keeps both the snapshot's `PWD`
/// and `current_dir` in step. The `should_exit` flag is how the `exit`
/// built-in unwinds the read-eval loop.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Variables handed to launched children.
    pub vars: HashMap<String, String>,
    /// Working directory for built-ins and child processes.
    pub current_dir: PathBuf,
    /// Set by `exit`; the read-eval loop checks it and stops.
    pub should_exit: bool,
}

impl Environment {
    /// Snapshot the variables and working directory of this process.
    pub fn new() -> Self {
        Self {
            vars: stdenv::vars().collect(),
            current_dir: stdenv::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            should_exit: false,
        }
    }

    /// Look up a variable in the snapshot.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    /// Set or override a variable for subsequently launched children.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// The PATH value program lookup searches through; empty when unset.
    pub fn search_path(&self) -> String {
        self.get_var("PATH").unwrap_or_default()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
