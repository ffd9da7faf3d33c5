use std::future::Future;

use crate::client::error::RequestError;
use crate::client::users::ListUsers;
use crate::client::{CommandRunner, DirectoryClient};
use crate::users::UserRecord;

/// a single page along with the token for the page after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<I> {
    pub items: Vec<I>,
    pub next_token: Option<String>,
}

/// a request that can be resent with the token of the page before it
pub trait Pageable {
    type Item;

    fn set_token(&mut self, token: Option<String>);

    fn send_page<R>(
        &self,
        client: &DirectoryClient<R>
    ) -> impl Future<Output = Result<Page<Self::Item>, RequestError>>
    where
        R: CommandRunner;
}

impl Pageable for ListUsers {
    type Item = UserRecord;

    fn set_token(&mut self, token: Option<String>) {
        self.token(token);
    }

    async fn send_page<R>(&self, client: &DirectoryClient<R>) -> Result<Page<UserRecord>, RequestError>
    where
        R: CommandRunner
    {
        let response = self.send(client).await?;

        Ok(Page {
            items: response.users,
            next_token: response.pagination_token,
        })
    }
}

enum PagesState {
    Ready,
    Done,
}

/// follows pagination tokens one page at a time.
///
/// stops after the first page without a token, an empty token counts as
/// none. an error is yielded once and ends the cursor.
pub struct Pages<'a, 'b, R, P> {
    client: &'a DirectoryClient<R>,
    pageable: &'b mut P,
    state: PagesState,
    fetched: usize,
}

impl<'a, 'b, R, P> Pages<'a, 'b, R, P>
where
    R: CommandRunner,
    P: Pageable,
{
    pub fn new(client: &'a DirectoryClient<R>, pageable: &'b mut P) -> Self {
        Pages {
            client,
            pageable,
            state: PagesState::Ready,
            fetched: 0,
        }
    }

    /// number of pages successfully retrieved so far
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    pub async fn next(&mut self) -> Option<Result<Page<P::Item>, RequestError>> {
        if let PagesState::Done = self.state {
            return None;
        }

        match self.pageable.send_page(self.client).await {
            Ok(mut page) => {
                self.fetched += 1;

                page.next_token = page.next_token.filter(|token| !token.is_empty());

                if page.next_token.is_none() {
                    self.state = PagesState::Done;
                }

                self.pageable.set_token(page.next_token.clone());

                tracing::debug!(
                    page = self.fetched,
                    items = page.items.len(),
                    more = page.next_token.is_some(),
                    "retrieved page"
                );

                Some(Ok(page))
            },
            Err(err) => {
                self.state = PagesState::Done;

                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::client::{Operation, Response};
    use crate::client::mock::{self, arg_value, MockRunner};

    fn paged_runner() -> MockRunner {
        MockRunner::new()
            .on(Operation::ListUsers, |args| {
                match arg_value(args, "--pagination-token") {
                    None => Response::object(json!({
                        "Users": [{"Username": "Cognito_a-a.com", "Attributes": []}],
                        "PaginationToken": "t1"
                    })),
                    Some("t1") => Response::object(json!({
                        "Users": [{"Username": "Cognito_b-b.com", "Attributes": []}],
                        "PaginationToken": "t2"
                    })),
                    Some("t2") => Response::object(json!({
                        "Users": [{"Username": "Cognito_c-c.com", "Attributes": []}]
                    })),
                    Some(other) => Response::error(format!("unknown token {other}")),
                }
            })
    }

    #[tokio::test]
    async fn follows_tokens_until_absent() {
        let client = mock::client(paged_runner());
        let mut request = ListUsers::new();
        let mut pages = Pages::new(&client, &mut request);
        let mut names = Vec::new();

        while let Some(result) = pages.next().await {
            let page = result.unwrap();

            names.extend(page.items.into_iter().map(|u| u.username));
        }

        assert_eq!(pages.fetched(), 3);
        assert_eq!(names, vec!["Cognito_a-a.com", "Cognito_b-b.com", "Cognito_c-c.com"]);
        assert_eq!(client.runner().calls_to(Operation::ListUsers).len(), 3);
    }

    #[tokio::test]
    async fn empty_token_ends_cursor() {
        let runner = MockRunner::new()
            .on(Operation::ListUsers, |_| Response::object(json!({
                "Users": [],
                "PaginationToken": ""
            })));
        let client = mock::client(runner);
        let mut request = ListUsers::new();
        let mut pages = Pages::new(&client, &mut request);

        assert!(pages.next().await.unwrap().unwrap().next_token.is_none());
        assert!(pages.next().await.is_none());
        assert_eq!(client.runner().calls().len(), 1);
    }

    #[tokio::test]
    async fn error_ends_cursor() {
        let runner = MockRunner::new()
            .on(Operation::ListUsers, |_| Response::error("throttled"));
        let client = mock::client(runner);
        let mut request = ListUsers::new();
        let mut pages = Pages::new(&client, &mut request);

        assert!(pages.next().await.unwrap().is_err());
        assert!(pages.next().await.is_none());
        assert_eq!(pages.fetched(), 0);
    }
}
