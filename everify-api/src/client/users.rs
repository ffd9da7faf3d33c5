use crate::client::error::RequestError;
use crate::client::{CommandRunner, DirectoryClient, Operation};
use crate::users::{Attribute, ListUsersResponse, UserRecord};

/// lists one page of users whose username starts with the client namespace
#[derive(Debug, Clone, Default)]
pub struct ListUsers {
    token: Option<String>,
}

impl ListUsers {
    pub fn new() -> Self {
        ListUsers {
            token: None,
        }
    }

    pub fn token<T>(&mut self, token: Option<T>) -> &mut Self
    where
        T: Into<String>
    {
        self.token = token.map(Into::into);
        self
    }

    pub fn filter<R>(client: &DirectoryClient<R>) -> String {
        format!("username ^= \"{}\"", client.namespace())
    }

    pub async fn send<R>(&self, client: &DirectoryClient<R>) -> Result<ListUsersResponse, RequestError>
    where
        R: CommandRunner
    {
        let mut invocation = client.command(Operation::ListUsers);
        invocation.arg("--filter", Self::filter(client))
            // the tool would otherwise follow every token itself
            .flag("--no-paginate");

        if let Some(token) = &self.token {
            invocation.arg("--pagination-token", token.as_str());
        }

        client.call_json(invocation).await
    }
}

pub struct RetrieveUser {
    username: String,
}

impl RetrieveUser {
    pub fn username<U>(username: U) -> Self
    where
        U: Into<String>
    {
        RetrieveUser {
            username: username.into()
        }
    }

    pub async fn send<R>(self, client: &DirectoryClient<R>) -> Result<UserRecord, RequestError>
    where
        R: CommandRunner
    {
        if self.username.is_empty() {
            return Err(RequestError::Invalid {
                operation: Operation::AdminGetUser,
                reason: "username is empty",
            });
        }

        let mut invocation = client.command(Operation::AdminGetUser);
        invocation.arg("--username", self.username);

        client.call_json(invocation).await
    }
}

pub struct UpdateUserAttributes {
    username: String,
    attributes: Vec<Attribute>,
}

impl UpdateUserAttributes {
    pub fn username<U>(username: U) -> Self
    where
        U: Into<String>
    {
        UpdateUserAttributes {
            username: username.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub async fn send<R>(self, client: &DirectoryClient<R>) -> Result<(), RequestError>
    where
        R: CommandRunner
    {
        let operation = Operation::AdminUpdateUserAttributes;

        if self.username.is_empty() {
            return Err(RequestError::Invalid {
                operation,
                reason: "username is empty",
            });
        }

        if self.attributes.is_empty() {
            return Err(RequestError::Invalid {
                operation,
                reason: "no attributes provided",
            });
        }

        let mut invocation = client.command(operation);
        invocation.arg("--username", self.username)
            .flag("--user-attributes");

        for attr in self.attributes {
            invocation.flag(format!(
                "Name={},Value={}",
                attr.name,
                attr.value.unwrap_or_default()
            ));
        }

        // the tool prints nothing on success
        client.call(invocation).await?;

        Ok(())
    }
}
