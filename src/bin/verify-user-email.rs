use std::process::ExitCode;

use clap::Parser;
use everify::config::DirectoryArgs;
use everify::{cli, commands};

/// marks the email of a single directory user as verified
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// email of the user to verify
    email: String,

    #[command(flatten)]
    directory: DirectoryArgs,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    cli::run(async move {
        let client = args.directory.into_client()?;
        let mut stdout = std::io::stdout().lock();

        commands::verify_single(&client, &args.email, &mut stdout).await
    })
}
