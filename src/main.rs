use argh::FromArgs;
use minishell::Interpreter;

#[derive(FromArgs)]
/// Interactive command interpreter with background job control.
struct Options {
    #[argh(option, default = "minishell::history::DEFAULT_CAPACITY")]
    /// number of history entries to retain (default 10)
    history_size: usize,

    #[argh(option, default = "minishell::jobs::DEFAULT_LIMIT")]
    /// maximum number of simultaneous background jobs (default 50)
    job_limit: usize,
}

fn main() {
    let options: Options = argh::from_env();
    let mut interpreter = Interpreter::with_limits(options.history_size, options.job_limit);
    if let Err(e) = interpreter.repl() {
        eprintln!("minishell: {}", e);
        std::process::exit(1);
    }
}
