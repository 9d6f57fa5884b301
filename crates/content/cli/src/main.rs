use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match content_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            err.exit_code()
        }
    }
}
