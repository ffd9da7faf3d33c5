use everify_api::client::error::RequestError;
use everify_api::client::users::UpdateUserAttributes;
use everify_api::client::{CommandRunner, DirectoryClient};
use everify_api::UserRecord;
use everify_lib::users::{EMAIL_VERIFIED_ATTR, EMAIL_VERIFIED_TRUE};
use serde::Serialize;

use crate::lookup::{self, Identifier};

pub const ALREADY_VERIFIED_MESSAGE: &str = "User is already verified!";

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error(transparent)]
    Remote(#[from] RequestError),
}

/// result of a single verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyOutcome {
    FreshlyVerified {
        user: UserRecord,
    },
    AlreadyVerified {
        message: &'static str,
        user: UserRecord,
    },
}

impl VerifyOutcome {
    pub fn user(&self) -> &UserRecord {
        match self {
            VerifyOutcome::FreshlyVerified { user } |
            VerifyOutcome::AlreadyVerified { user, .. } => user
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            VerifyOutcome::FreshlyVerified { .. } => None,
            VerifyOutcome::AlreadyVerified { message, .. } => Some(*message)
        }
    }

    pub fn is_already_verified(&self) -> bool {
        matches!(self, VerifyOutcome::AlreadyVerified { .. })
    }
}

/// verifies the email of the user named by either an email or a username.
///
/// the email is used when both are given. lookup and update failures are
/// returned as is.
pub async fn verify_user_email<R>(
    client: &DirectoryClient<R>,
    email: Option<&str>,
    username: Option<&str>,
) -> Result<VerifyOutcome, VerifyError>
where
    R: CommandRunner
{
    let identifier = Identifier::from_parts(email, username)?;

    verify_identifier(client, &identifier).await
}

pub async fn verify_identifier<R>(
    client: &DirectoryClient<R>,
    identifier: &Identifier,
) -> Result<VerifyOutcome, VerifyError>
where
    R: CommandRunner
{
    let user = lookup::find_user(client, identifier).await?;

    if lookup::is_email_verified(&user) {
        tracing::debug!("{} is already verified", user.username);

        return Ok(VerifyOutcome::AlreadyVerified {
            message: ALREADY_VERIFIED_MESSAGE,
            user
        });
    }

    let mut update = UpdateUserAttributes::username(user.username.as_str());
    update.attribute(EMAIL_VERIFIED_ATTR, EMAIL_VERIFIED_TRUE);
    update.send(client).await?;

    tracing::debug!("{} marked as verified", user.username);

    Ok(VerifyOutcome::FreshlyVerified { user })
}
