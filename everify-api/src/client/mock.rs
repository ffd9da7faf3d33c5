//! scripted runner for exercising the client without the real tool.

use std::sync::{Arc, Mutex};

use crate::client::error::RunnerError;
use crate::client::runner::{CommandRunner, Response};
use crate::client::{DirectoryClient, DirectoryClientBuilder, Operation};

pub const TEST_USER_POOL: &str = "us-east-1_TEST";

type Handler = Box<dyn Fn(&[String]) -> Response + Send + Sync>;

/// answers invocations with registered handlers and records every call.
///
/// operations without a handler answer with a remote error.
#[derive(Clone)]
pub struct MockRunner {
    handlers: Arc<Vec<(Operation, Handler)>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner {
            handlers: Arc::new(Vec::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// registers a handler, must be called before the runner is shared
    pub fn on<F>(mut self, operation: Operation, handler: F) -> Self
    where
        F: Fn(&[String]) -> Response + Send + Sync + 'static
    {
        Arc::get_mut(&mut self.handlers)
            .expect("handlers registered after the runner was cloned")
            .push((operation, Box::new(handler)));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock()
            .expect("poisoned call log")
            .clone()
    }

    pub fn calls_to(&self, operation: Operation) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|args| args.get(1).map(String::as_str) == Some(operation.as_ref()))
            .collect()
    }

    fn respond(&self, args: &[String]) -> Response {
        let requested = args.get(1).map(String::as_str).unwrap_or_default();

        for (operation, handler) in self.handlers.iter() {
            if operation.as_ref() == requested {
                return handler(args);
            }
        }

        Response::error(format!("no handler registered for \"{}\"", requested))
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        MockRunner::new()
    }
}

impl CommandRunner for MockRunner {
    async fn run(&self, args: Vec<String>) -> Result<Response, RunnerError> {
        self.calls.lock()
            .expect("poisoned call log")
            .push(args.clone());

        Ok(self.respond(&args))
    }
}

/// retrieves the value that follows `flag` in an argument list
pub fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

/// builds a client for [`TEST_USER_POOL`] around the given runner
pub fn client(runner: MockRunner) -> DirectoryClient<MockRunner> {
    let mut builder = DirectoryClientBuilder::new();
    builder.user_pool_id(TEST_USER_POOL);

    builder.build(runner).expect("test user pool is valid")
}
