// concatfragments binary entry point
use fragment_core::logging::log_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match fragment::cli::run() {
        Ok(code) => code,
        Err(e) => {
            log_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
