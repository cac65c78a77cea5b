use std::process::ExitCode;

use colored::Colorize;

fn main() -> ExitCode {
    match pokedex::app::run_cli() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
