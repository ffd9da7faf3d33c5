use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use everify::batch::Mode;
use everify::config::DirectoryArgs;
use everify::{cli, commands};

/// verifies every user listed in the first column of a csv file of usernames
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// csv file with a header row, the first column holds the usernames
    file: PathBuf,

    #[command(flatten)]
    directory: DirectoryArgs,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    cli::run(async move {
        let client = args.directory.into_client()?;
        let mut stdout = std::io::stdout().lock();

        commands::verify_from_file(&client, &args.file, Mode::Username, &mut stdout).await?;

        Ok(())
    })
}
