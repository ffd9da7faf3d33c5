use std::process::ExitCode;

use clap::Parser;
use everify::config::DirectoryArgs;
use everify::{cli, commands};

/// lists every directory user whose email is not verified
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    directory: DirectoryArgs,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    cli::run(async move {
        let client = args.directory.into_client()?;
        let mut stdout = std::io::stdout().lock();

        commands::list_unverified(&client, &mut stdout).await
    })
}
