use std::process::ExitCode;

fn main() -> ExitCode {
    wallet::common::telemetry::init();

    match wallet::app::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "wallet failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
