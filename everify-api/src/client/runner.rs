use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::client::error::{BuildError, RequestError, RunnerError};
use crate::client::Operation;

pub const DEFAULT_AWS_BIN: &str = "aws";

/// structured result of a single command invocation.
///
/// a non-empty `error` always wins over `object`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn object(object: Value) -> Self {
        Response {
            object: Some(object),
            error: None,
        }
    }

    pub fn error<E>(error: E) -> Self
    where
        E: Into<String>
    {
        Response {
            object: None,
            error: Some(error.into()),
        }
    }

    pub fn empty() -> Self {
        Response::default()
    }

    pub fn into_object(self, operation: Operation) -> Result<Option<Value>, RequestError> {
        match self.error {
            Some(message) if !message.trim().is_empty() => Err(RequestError::Remote {
                operation,
                message,
            }),
            _ => Ok(self.object)
        }
    }
}

/// executes a command line style invocation against the identity provider
/// tool and waits for its structured response.
///
/// `args` never includes the binary itself.
pub trait CommandRunner {
    fn run(&self, args: Vec<String>) -> impl Future<Output = Result<Response, RunnerError>> + Send;
}

#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new<A, S>(access_key: A, secret_key: S) -> Self
    where
        A: Into<String>,
        S: Into<String>,
    {
        Credentials {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// runs invocations through the aws command line tool
#[derive(Debug, Clone)]
pub struct AwsCli {
    bin: PathBuf,
    credentials: Option<Credentials>,
    region: Option<String>,
}

impl AwsCli {
    pub fn builder() -> AwsCliBuilder {
        AwsCliBuilder {
            bin: PathBuf::from(DEFAULT_AWS_BIN),
            access_key: None,
            secret_key: None,
            region: None,
        }
    }

    fn command(&self, args: &[String]) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.bin);
        cmd.args(args)
            .arg("--output")
            .arg("json")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(credentials) = &self.credentials {
            cmd.env("AWS_ACCESS_KEY_ID", &credentials.access_key)
                .env("AWS_SECRET_ACCESS_KEY", &credentials.secret_key);
        }

        if let Some(region) = &self.region {
            cmd.env("AWS_DEFAULT_REGION", region);
        }

        cmd
    }
}

impl CommandRunner for AwsCli {
    async fn run(&self, args: Vec<String>) -> Result<Response, RunnerError> {
        let bin = self.bin.display().to_string();
        let output = self.command(&args)
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                bin: bin.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();

        if !output.status.success() || !stderr.is_empty() {
            let message = if stderr.is_empty() {
                format!("\"{}\" exited with {}", bin, output.status)
            } else {
                stderr.to_owned()
            };

            return Ok(Response::error(message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();

        if stdout.is_empty() {
            return Ok(Response::empty());
        }

        let object = serde_json::from_str(stdout)
            .map_err(|source| RunnerError::Output { bin, source })?;

        Ok(Response::object(object))
    }
}

pub struct AwsCliBuilder {
    bin: PathBuf,
    access_key: Option<String>,
    secret_key: Option<String>,
    region: Option<String>,
}

impl AwsCliBuilder {
    pub fn bin<P>(&mut self, bin: P)
    where
        P: Into<PathBuf>
    {
        self.bin = bin.into();
    }

    pub fn access_key<K>(&mut self, key: Option<K>)
    where
        K: Into<String>
    {
        self.access_key = key.map(Into::into).filter(|v: &String| !v.is_empty());
    }

    pub fn secret_key<K>(&mut self, key: Option<K>)
    where
        K: Into<String>
    {
        self.secret_key = key.map(Into::into).filter(|v: &String| !v.is_empty());
    }

    pub fn region<G>(&mut self, region: Option<G>)
    where
        G: Into<String>
    {
        self.region = region.map(Into::into).filter(|v: &String| !v.is_empty());
    }

    /// without any keys the tool falls back to its own credential chain
    pub fn build(self) -> Result<AwsCli, BuildError> {
        let credentials = match (self.access_key, self.secret_key) {
            (Some(access), Some(secret)) => Some(Credentials::new(access, secret)),
            (None, None) => None,
            _ => {
                return Err(BuildError::PartialCredentials);
            }
        };

        Ok(AwsCli {
            bin: self.bin,
            credentials,
            region: self.region,
        })
    }
}
