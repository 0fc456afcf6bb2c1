//! An interactive command interpreter with job control and history recall.
//!
//! This crate provides the building blocks of a small shell-like interpreter:
//! a line lexer, a bounded command [`history`](crate::history), a
//! [`jobs`](crate::jobs) table tracking background children without blocking
//! the interactive loop, and a launcher for external programs. Built-ins
//! (`cd`, `pwd`, `exit`, `history`, `jobs`, `fg`) run in-process; everything
//! else is resolved through PATH and spawned as a child.
//!
//! The main entry point is [`Interpreter`], which executes one input line at
//! a time or runs a full read-eval loop. There is intentionally no scripting
//! surface: no pipelines, redirection, quoting or signal forwarding.

mod builtin;
pub mod command;
pub mod env;
mod external;
pub mod history;
mod interpreter;
pub mod jobs;
pub mod lexer;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
