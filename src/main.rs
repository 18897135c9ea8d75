use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match chartline_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("chartline: {e}");
            ExitCode::FAILURE
        }
    }
}
