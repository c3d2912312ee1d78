use std::process::ExitCode;

fn main() -> ExitCode {
    match gotion::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Alas, there's been an error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
