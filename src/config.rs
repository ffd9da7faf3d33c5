use std::path::PathBuf;

use clap::Args;
use everify_api::client::runner::DEFAULT_AWS_BIN;
use everify_api::client::{AwsCli, DirectoryClient, DirectoryClientBuilder};
use everify_lib::users::DEFAULT_NAMESPACE;

use crate::error::{self, Context};

/// options for reaching the directory, shared by every command.
///
/// each option falls back to an environment variable and is read once when
/// the client is created.
#[derive(Debug, Args)]
pub struct DirectoryArgs {
    /// access key credential used when calling the directory
    ///
    /// when neither key is given the aws tool resolves credentials on its own
    #[arg(long, env = "AWS_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// secret key credential used when calling the directory
    #[arg(long, env = "AWS_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// id of the directory user pool
    #[arg(long, env = "AWS_COGNITO_USER_POOL_ID")]
    pub user_pool_id: String,

    /// region of the user pool
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// path to the aws command line tool
    #[arg(long, env = "EVERIFY_AWS_BIN", default_value = DEFAULT_AWS_BIN)]
    pub aws_bin: PathBuf,

    /// username prefix of the accounts managed by this tool
    #[arg(long, env = "EVERIFY_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

impl DirectoryArgs {
    pub fn runner(&self) -> error::Result<AwsCli> {
        let mut builder = AwsCli::builder();
        builder.bin(self.aws_bin.clone());
        builder.access_key(self.access_key.clone());
        builder.secret_key(self.secret_key.clone());
        builder.region(self.region.clone());

        builder.build().context("invalid directory credentials")
    }

    pub fn builder(&self) -> error::Result<DirectoryClientBuilder> {
        let mut builder = DirectoryClient::builder();

        if !builder.user_pool_id(self.user_pool_id.as_str()) {
            return Err(error::Error::from(format!(
                "cannot use the user pool id provided. \"{}\"",
                self.user_pool_id
            )));
        }

        if !builder.namespace(self.namespace.as_str()) {
            return Err(error::Error::from(format!(
                "cannot use the namespace provided. \"{}\"",
                self.namespace
            )));
        }

        Ok(builder)
    }

    pub fn into_client(self) -> error::Result<DirectoryClient<AwsCli>> {
        let runner = self.runner()?;
        let client = self.builder()?
            .build(runner)
            .context("failed to create directory client")?;

        tracing::debug!(
            user_pool_id = client.user_pool_id(),
            namespace = client.namespace(),
            "directory client ready"
        );

        Ok(client)
    }
}
