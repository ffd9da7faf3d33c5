use std::fmt;

use everify_lib::users::DEFAULT_NAMESPACE;
use everify_lib::validation::{namespace_valid, user_pool_id_valid};
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{AsRefStr, Display};

pub mod error;
pub mod runner;
pub mod users;
pub mod iterate;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

use error::{BuildError, RequestError};
pub use runner::{AwsCli, CommandRunner, Credentials, Response};

/// service namespace of the identity provider within the tool
pub const SERVICE: &str = "cognito-idp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    ListUsers,
    AdminGetUser,
    AdminUpdateUserAttributes,
}

/// a command line style invocation for a single operation
#[derive(Debug, Clone)]
pub struct Invocation {
    operation: Operation,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(operation: Operation) -> Self {
        Invocation {
            operation,
            args: vec![SERVICE.to_owned(), operation.as_ref().to_owned()],
        }
    }

    pub fn arg<F, V>(&mut self, flag: F, value: V) -> &mut Self
    where
        F: Into<String>,
        V: Into<String>,
    {
        self.args.push(flag.into());
        self.args.push(value.into());
        self
    }

    pub fn flag<F>(&mut self, flag: F) -> &mut Self
    where
        F: Into<String>
    {
        self.args.push(flag.into());
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for arg in &self.args {
            if !first {
                f.write_str(" ")?;
            }

            first = false;

            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
                write!(f, "{:?}", arg)?;
            } else {
                f.write_str(arg)?;
            }
        }

        Ok(())
    }
}

pub struct Info {
    pub user_pool_id: String,
    pub namespace: String,
}

/// credentialed access to the directory.
///
/// every operation is a single round trip through the runner with no
/// retries or timeouts.
pub struct DirectoryClient<R = AwsCli> {
    pub(crate) runner: R,
    pub(crate) info: Info,
}

impl DirectoryClient {
    pub fn builder() -> DirectoryClientBuilder {
        DirectoryClientBuilder::new()
    }
}

impl<R> DirectoryClient<R> {
    pub fn user_pool_id(&self) -> &str {
        &self.info.user_pool_id
    }

    pub fn namespace(&self) -> &str {
        &self.info.namespace
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// starts an invocation scoped to the configured user pool
    pub(crate) fn command(&self, operation: Operation) -> Invocation {
        let mut invocation = Invocation::new(operation);
        invocation.arg("--user-pool-id", self.info.user_pool_id.as_str());
        invocation
    }
}

impl<R> DirectoryClient<R>
where
    R: CommandRunner
{
    pub(crate) async fn call(&self, invocation: Invocation) -> Result<Option<Value>, RequestError> {
        let operation = invocation.operation();

        tracing::debug!("running {}", invocation);

        let response = self.runner.run(invocation.into_args()).await?;

        response.into_object(operation)
    }

    pub(crate) async fn call_json<T>(&self, invocation: Invocation) -> Result<T, RequestError>
    where
        T: DeserializeOwned
    {
        let operation = invocation.operation();
        let Some(object) = self.call(invocation).await? else {
            return Err(RequestError::MissingPayload { operation });
        };

        serde_json::from_value(object)
            .map_err(|source| RequestError::Decode { operation, source })
    }
}

pub struct DirectoryClientBuilder {
    user_pool_id: Option<String>,
    namespace: String,
}

impl DirectoryClientBuilder {
    pub fn new() -> Self {
        DirectoryClientBuilder {
            user_pool_id: None,
            namespace: DEFAULT_NAMESPACE.to_owned(),
        }
    }

    /// returns false if the id is not usable
    pub fn user_pool_id<U>(&mut self, id: U) -> bool
    where
        U: Into<String>
    {
        let id = id.into();

        if !user_pool_id_valid(&id) {
            return false;
        }

        self.user_pool_id = Some(id);
        true
    }

    /// returns false if the namespace is not usable
    pub fn namespace<N>(&mut self, namespace: N) -> bool
    where
        N: Into<String>
    {
        let namespace = namespace.into();

        if !namespace_valid(&namespace) {
            return false;
        }

        self.namespace = namespace;
        true
    }

    pub fn build<R>(self, runner: R) -> Result<DirectoryClient<R>, BuildError> {
        let Some(user_pool_id) = self.user_pool_id else {
            return Err(BuildError::MissingUserPoolId);
        };

        Ok(DirectoryClient {
            runner,
            info: Info {
                user_pool_id,
                namespace: self.namespace,
            }
        })
    }
}

impl Default for DirectoryClientBuilder {
    fn default() -> Self {
        DirectoryClientBuilder::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::mock::{self, MockRunner};

    #[test]
    fn operation_names() {
        assert_eq!(Operation::ListUsers.as_ref(), "list-users");
        assert_eq!(Operation::AdminGetUser.as_ref(), "admin-get-user");
        assert_eq!(
            Operation::AdminUpdateUserAttributes.to_string(),
            "admin-update-user-attributes"
        );
    }

    #[test]
    fn invocation_display_quotes_when_needed() {
        let mut invocation = Invocation::new(Operation::ListUsers);
        invocation.arg("--filter", "username ^= \"Cognito_\"");

        assert_eq!(
            invocation.to_string(),
            r#"cognito-idp list-users --filter "username ^= \"Cognito_\"""#
        );
    }

    #[test]
    fn builder_requires_user_pool() {
        let builder = DirectoryClientBuilder::new();

        assert!(matches!(
            builder.build(MockRunner::new()),
            Err(BuildError::MissingUserPoolId)
        ));
    }

    #[test]
    fn builder_rejects_bad_values() {
        let mut builder = DirectoryClientBuilder::new();

        assert!(!builder.user_pool_id(""));
        assert!(!builder.user_pool_id("us-east-1 pool"));
        assert!(!builder.user_pool_id("abc123"));
        assert!(!builder.namespace(""));
        assert!(!builder.namespace("Cognito _"));
        assert!(builder.user_pool_id("us-east-1_abc123"));

        let client = builder.build(MockRunner::new()).unwrap();

        assert_eq!(client.user_pool_id(), "us-east-1_abc123");
        assert_eq!(client.namespace(), DEFAULT_NAMESPACE);
    }

    #[tokio::test]
    async fn call_json_missing_payload() {
        let runner = MockRunner::new()
            .on(Operation::AdminGetUser, |_| Response::empty());
        let client = mock::client(runner);

        let result: Result<Value, _> = client.call_json(
            client.command(Operation::AdminGetUser)
        ).await;

        assert!(matches!(
            result,
            Err(RequestError::MissingPayload { operation: Operation::AdminGetUser })
        ));
    }
}
