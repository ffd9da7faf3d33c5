use std::error::Error;
use std::fmt;

use crate::client::Operation;

/// failures while assembling a client or runner
#[derive(Debug)]
pub enum BuildError {
    MissingUserPoolId,
    PartialCredentials,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingUserPoolId => write!(f, "a user pool id is required"),
            BuildError::PartialCredentials => write!(
                f,
                "both an access key and a secret key must be provided"
            ),
        }
    }
}

impl Error for BuildError {}

/// failures of the runner itself, before the directory had a chance to
/// answer
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to spawn \"{bin}\": {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json output from \"{bin}\": {source}")]
    Output {
        bin: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// the directory answered with an error
    #[error("{operation} failed: {message}")]
    Remote {
        operation: Operation,
        message: String,
    },

    #[error("{operation} returned no payload")]
    MissingPayload {
        operation: Operation,
    },

    #[error("failed to decode {operation} payload: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {operation} request: {reason}")]
    Invalid {
        operation: Operation,
        reason: &'static str,
    },

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

impl RequestError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            RequestError::Remote { operation, .. } |
            RequestError::MissingPayload { operation } |
            RequestError::Decode { operation, .. } |
            RequestError::Invalid { operation, .. } => Some(*operation),
            RequestError::Runner(_) => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, RequestError::Remote { .. })
    }
}
