use everify_api::client::{CommandRunner, DirectoryClient};
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::lookup::Identifier;
use crate::verify::{self, VerifyOutcome};

/// how the identifiers of a batch are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Email,
    Username,
}

impl Mode {
    pub fn identifier<V>(&self, value: V) -> Identifier
    where
        V: Into<String>
    {
        match self {
            Mode::Email => Identifier::Email(value.into()),
            Mode::Username => Identifier::Username(value.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Bucket {
    Verified,
    Skipped,
    Failed,
}

/// final buckets of a batch run. each processed identifier lands in exactly
/// one of them, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub verified: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl VerificationReport {
    pub fn record(&mut self, bucket: Bucket, identifier: String) {
        match bucket {
            Bucket::Verified => self.verified.push(identifier),
            Bucket::Skipped => self.skipped.push(identifier),
            Bucket::Failed => self.failed.push(identifier),
        }
    }

    pub fn total(&self) -> usize {
        self.verified.len() + self.skipped.len() + self.failed.len()
    }

    pub fn bucket_of(&self, identifier: &str) -> Option<Bucket> {
        let found = |list: &Vec<String>| list.iter().any(|v| v == identifier);

        if found(&self.verified) {
            Some(Bucket::Verified)
        } else if found(&self.skipped) {
            Some(Bucket::Skipped)
        } else if found(&self.failed) {
            Some(Bucket::Failed)
        } else {
            None
        }
    }
}

/// verifies every identifier in input order, one at a time.
///
/// a failed item is recorded and never stops the batch. nothing is kept if
/// the process dies before this returns.
pub async fn process_batch<R>(
    client: &DirectoryClient<R>,
    identifiers: &[String],
    mode: Mode,
) -> VerificationReport
where
    R: CommandRunner
{
    let mut report = VerificationReport::default();
    let total = identifiers.len();

    for (index, value) in identifiers.iter().enumerate() {
        let position = index + 1;

        tracing::info!("[{}/{}] verifying {} {}", position, total, mode, value);

        let bucket = match verify::verify_identifier(client, &mode.identifier(value.as_str())).await {
            Ok(VerifyOutcome::AlreadyVerified { .. }) => {
                tracing::info!("[{}/{}] {} already verified", position, total, value);

                Bucket::Skipped
            },
            Ok(VerifyOutcome::FreshlyVerified { .. }) => {
                tracing::info!("[{}/{}] {} verified", position, total, value);

                Bucket::Verified
            },
            Err(err) => {
                tracing::warn!("[{}/{}] verification failed for {}: {}", position, total, value, err);

                Bucket::Failed
            }
        };

        report.record(bucket, value.clone());
    }

    tracing::info!(
        verified = report.verified.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "batch finished"
    );

    report
}
