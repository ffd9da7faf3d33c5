use std::io::Write;
use std::path::Path;

use everify_api::client::{CommandRunner, DirectoryClient};

use crate::batch::{self, Mode, VerificationReport};
use crate::error::{self, Context};
use crate::{input, output, scan, verify};

/// verifies a single email and prints the resulting user
pub async fn verify_single<R, W>(
    client: &DirectoryClient<R>,
    email: &str,
    out: &mut W,
) -> error::Result
where
    R: CommandRunner,
    W: Write,
{
    let outcome = verify::verify_user_email(client, Some(email), None)
        .await
        .context(format!("failed to verify \"{}\"", email))?;

    tracing::info!("{} resolved to {}", email, outcome.user().username);

    output::write_outcome(out, &outcome)
}

/// reads identifiers from a csv file and verifies each one, printing the
/// report once every row was attempted.
pub async fn verify_from_file<R, W>(
    client: &DirectoryClient<R>,
    path: &Path,
    mode: Mode,
    out: &mut W,
) -> error::Result<VerificationReport>
where
    R: CommandRunner,
    W: Write,
{
    let identifiers = input::read_identifiers(path)
        .context(format!("failed to read identifiers from \"{}\"", path.display()))?;

    tracing::info!("read {} {} identifiers from {}", identifiers.len(), mode, path.display());

    let report = batch::process_batch(client, &identifiers, mode).await;

    output::write_report(out, &report, mode)?;

    Ok(report)
}

pub async fn list_unverified<R, W>(
    client: &DirectoryClient<R>,
    out: &mut W,
) -> error::Result
where
    R: CommandRunner,
    W: Write,
{
    let users = scan::scan_all_unverified(client)
        .await
        .context("failed to scan users")?;

    output::write_users(out, &users)
}
