use everify_api::client::error::{BuildError, RequestError};
use everify_lib::context_trait;

use crate::verify::VerifyError;

type BoxDynError = Box<dyn std::error::Error + Send + Sync>;

/// error reported by the binaries.
///
/// the context reads outermost first, e.g.
/// `failed to verify "a@x.com": directory rejected the request: ...`
#[derive(Debug)]
pub struct Error {
    context: Option<String>,
    src: Option<BoxDynError>,
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    pub fn new() -> Error {
        Error {
            context: None,
            src: None,
        }
    }

    /// places the message in front of any existing context
    pub fn context<C>(mut self, cxt: C) -> Error
    where
        C: Into<String>
    {
        let cxt = cxt.into();

        self.context = match self.context.take() {
            Some(inner) => Some(format!("{}: {}", cxt, inner)),
            None => Some(cxt),
        };
        self
    }

    pub fn source<S>(mut self, src: S) -> Error
    where
        S: Into<BoxDynError>
    {
        self.src = Some(src.into());
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.context, &self.src) {
            (Some(cxt), Some(src)) => write!(f, "{}: {}", cxt, src),
            (Some(cxt), None) => write!(f, "{}", cxt),
            (None, Some(src)) => write!(f, "{}", src),
            (None, None) => write!(f, "unknown error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.src.as_ref().map(|v| & **v as _)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::new().context(msg)
    }
}

context_trait!(Error);

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<Error>
{
    fn context<C>(self, cxt: C) -> std::result::Result<T, Error>
    where
        C: Into<String>
    {
        self.map_err(|err| err.into().context(cxt))
    }
}

macro_rules! simple_catch {
    ($e:path) => {
        impl From<$e> for Error {
            fn from(err: $e) -> Self {
                Error::new().source(err)
            }
        }
    };
}

simple_catch!(std::io::Error);
simple_catch!(csv::Error);
simple_catch!(serde_json::Error);
simple_catch!(BuildError);

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        let cxt = match (&err, err.operation()) {
            (RequestError::Runner(_), _) => String::from("failed to run the directory tool"),
            (RequestError::Remote { .. }, _) => String::from("directory rejected the request"),
            (_, Some(operation)) => format!("unexpected {} response", operation),
            (_, None) => String::from("directory request failed"),
        };

        Error::new().context(cxt).source(err)
    }
}

impl From<VerifyError> for Error {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::InvalidArgument(reason) => Error::new()
                .context(reason),
            VerifyError::Remote(err) => Self::from(err)
        }
    }
}

#[cfg(test)]
mod test {
    use everify_api::client::error::RunnerError;
    use everify_api::client::Operation;

    use super::*;

    #[test]
    fn context_is_stacked_outermost_first() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let result: std::result::Result<(), _> = Err(io);

        let err = result.context("failed to read identifiers")
            .context("batch aborted")
            .unwrap_err();

        assert_eq!(err.to_string(), "batch aborted: failed to read identifiers: no such file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn remote_errors_keep_the_directory_message() {
        let err = Error::from(RequestError::Remote {
            operation: Operation::AdminGetUser,
            message: String::from("UserNotFoundException"),
        });

        assert_eq!(
            err.to_string(),
            "directory rejected the request: admin-get-user failed: UserNotFoundException"
        );
    }

    #[test]
    fn malformed_responses_name_the_operation() {
        let err = Error::from(RequestError::MissingPayload {
            operation: Operation::ListUsers,
        });

        assert_eq!(
            err.to_string(),
            "unexpected list-users response: list-users returned no payload"
        );
    }

    #[test]
    fn runner_failures() {
        let err = Error::from(RequestError::Runner(RunnerError::Spawn {
            bin: String::from("aws"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }));

        assert!(err.to_string().starts_with("failed to run the directory tool: "));
    }

    #[test]
    fn invalid_arguments_read_plainly() {
        let result: std::result::Result<(), _> = Err(
            VerifyError::InvalidArgument("email is not valid")
        );

        let err = result.context("failed to verify \"nope\"").unwrap_err();

        assert_eq!(err.to_string(), "failed to verify \"nope\": email is not valid");
        assert!(std::error::Error::source(&err).is_none());
    }
}
