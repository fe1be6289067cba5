use std::process::ExitCode;

fn main() -> ExitCode {
    match oi2yolo::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
