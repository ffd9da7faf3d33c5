use std::future::Future;
use std::process::ExitCode;

use tracing_subscriber::{FmtSubscriber, EnvFilter};

use crate::error;

/// installs the global subscriber. logs go to stderr so that stdout only
/// carries command output.
pub fn init_tracing() {
    let result = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = result {
        eprintln!("failed to initialize global tracing subscriber. {}", err);
    }
}

/// runs the given command to completion on a single threaded runtime
pub fn run<F>(fut: F) -> ExitCode
where
    F: Future<Output = error::Result>
{
    use tokio::runtime::Builder;

    init_tracing();

    let rt = match Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("failed to start tokio runtime. {}", err);

            return ExitCode::FAILURE;
        }
    };

    tracing::debug!("started tokio runtime");

    match rt.block_on(fut) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("{}", err);

            ExitCode::FAILURE
        }
    }
}
