use std::process::{Command, ExitCode};

use log::debug;

/// Bypass the wrapper entirely: run the platform ls with the original
/// arguments minus the toggle itself, and forward its exit code
/// verbatim.
pub fn run_native_ls() -> ExitCode {
    let args: Vec<String> = std::env::args()
        .skip(1)
        .filter(|arg| arg != "--disable-wrapper")
        .collect();
    debug!("delegating to ls {args:?}");

    match Command::new("ls").args(&args).status() {
        Ok(status) => {
            let code = status.code().unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
        Err(err) => {
            eprintln!("Aborting: cannot run ls: {err}");
            ExitCode::FAILURE
        }
    }
}
