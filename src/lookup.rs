use everify_api::client::users::RetrieveUser;
use everify_api::client::{CommandRunner, DirectoryClient};
use everify_api::UserRecord;
use everify_lib::users::{email_valid, username_from_email, username_valid};

use crate::verify::VerifyError;

/// what a caller supplied to resolve a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Username(String),
}

impl Identifier {
    /// picks the identifier to use, the email wins if both are given.
    ///
    /// empty values count as absent.
    pub fn from_parts(email: Option<&str>, username: Option<&str>) -> Result<Self, VerifyError> {
        let email = email.filter(|v| !v.is_empty());
        let username = username.filter(|v| !v.is_empty());

        match (email, username) {
            (Some(email), _) => Ok(Identifier::Email(email.to_owned())),
            (None, Some(username)) => Ok(Identifier::Username(username.to_owned())),
            (None, None) => Err(VerifyError::InvalidArgument(
                "an email or username is required"
            )),
        }
    }
}

pub async fn find_user_by_username<R>(
    client: &DirectoryClient<R>,
    username: &str
) -> Result<UserRecord, VerifyError>
where
    R: CommandRunner
{
    if username.is_empty() {
        return Err(VerifyError::InvalidArgument("username parameter is required"));
    }

    if !username_valid(username) {
        return Err(VerifyError::InvalidArgument("username is not valid"));
    }

    let record = RetrieveUser::username(username)
        .send(client)
        .await?;

    Ok(record)
}

/// resolves a user by the username derived from their email
pub async fn find_user_by_email<R>(
    client: &DirectoryClient<R>,
    email: &str
) -> Result<UserRecord, VerifyError>
where
    R: CommandRunner
{
    if email.is_empty() {
        return Err(VerifyError::InvalidArgument("email parameter is required"));
    }

    if !email_valid(email) {
        return Err(VerifyError::InvalidArgument("email is not valid"));
    }

    let username = username_from_email(client.namespace(), email);

    tracing::debug!("email {} maps to username {}", email, username);

    find_user_by_username(client, &username).await
}

pub async fn find_user<R>(
    client: &DirectoryClient<R>,
    identifier: &Identifier
) -> Result<UserRecord, VerifyError>
where
    R: CommandRunner
{
    match identifier {
        Identifier::Email(email) => find_user_by_email(client, email).await,
        Identifier::Username(username) => find_user_by_username(client, username).await,
    }
}

pub fn is_email_verified(user: &UserRecord) -> bool {
    user.is_email_verified()
}

#[cfg(test)]
mod test {
    use everify_api::client::mock::{self, arg_value, MockRunner};
    use everify_api::client::{Operation, Response};
    use serde_json::json;

    use super::*;

    fn echo_runner() -> MockRunner {
        MockRunner::new()
            .on(Operation::AdminGetUser, |args| Response::object(json!({
                "Username": arg_value(args, "--username").unwrap_or_default(),
                "UserAttributes": [{"Name": "email_verified", "Value": "false"}]
            })))
    }

    #[test]
    fn identifier_precedence() {
        assert_eq!(
            Identifier::from_parts(Some("a@b.com"), Some("Cognito_x")).unwrap(),
            Identifier::Email("a@b.com".into())
        );
        assert_eq!(
            Identifier::from_parts(Some(""), Some("Cognito_x")).unwrap(),
            Identifier::Username("Cognito_x".into())
        );
        assert!(matches!(
            Identifier::from_parts(None, Some("")),
            Err(VerifyError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn email_and_username_query_same_user() {
        let client = mock::client(echo_runner());

        let by_email = find_user_by_email(&client, "Foo@Bar.com").await.unwrap();
        let by_username = find_user_by_username(&client, "Cognito_foo-bar.com").await.unwrap();

        assert_eq!(by_email, by_username);

        let calls = client.runner().calls_to(Operation::AdminGetUser);

        assert_eq!(calls.len(), 2);
        assert_eq!(arg_value(&calls[0], "--username"), Some("Cognito_foo-bar.com"));
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn empty_values_fail_without_remote_call() {
        let client = mock::client(echo_runner());

        assert!(matches!(
            find_user_by_email(&client, "").await,
            Err(VerifyError::InvalidArgument(_))
        ));
        assert!(matches!(
            find_user_by_username(&client, "").await,
            Err(VerifyError::InvalidArgument(_))
        ));
        assert!(matches!(
            find_user_by_email(&client, "not-an-email").await,
            Err(VerifyError::InvalidArgument(_))
        ));
        assert!(client.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_propagates() {
        let runner = MockRunner::new()
            .on(Operation::AdminGetUser, |_| Response::error("UserNotFoundException"));
        let client = mock::client(runner);

        let err = find_user(&client, &Identifier::Email("gone@example.com".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, VerifyError::Remote(_)));
    }
}
