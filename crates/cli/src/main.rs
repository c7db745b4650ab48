use std::process::ExitCode;

fn main() -> ExitCode {
    enquire_cli::run()
}
