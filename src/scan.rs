use everify_api::client::error::RequestError;
use everify_api::client::iterate::Pages;
use everify_api::client::users::ListUsers;
use everify_api::client::{CommandRunner, DirectoryClient};
use everify_api::UserRecord;
use everify_lib::{User, UsersPage};

fn unverified<I>(records: I) -> Vec<User>
where
    I: IntoIterator<Item = UserRecord>
{
    records.into_iter()
        .map(User::from)
        .filter(|user| !user.email_verified)
        .collect()
}

/// retrieves a single page of the directory keeping only unverified users
pub async fn unverified_page<R>(
    client: &DirectoryClient<R>,
    token: Option<String>,
) -> Result<UsersPage, RequestError>
where
    R: CommandRunner
{
    let response = ListUsers::new()
        .token(token)
        .send(client)
        .await?;

    Ok(UsersPage {
        users: unverified(response.users),
        next_page_token: response.pagination_token.filter(|token| !token.is_empty()),
    })
}

/// walks every page of the directory and collects the unverified users in
/// page order.
///
/// any failing page fails the whole scan, users from earlier pages are
/// dropped with it.
pub async fn scan_all_unverified<R>(client: &DirectoryClient<R>) -> Result<Vec<User>, RequestError>
where
    R: CommandRunner
{
    let mut request = ListUsers::new();
    let mut pages = Pages::new(client, &mut request);
    let mut users = Vec::new();

    while let Some(result) = pages.next().await {
        let page = result?;

        users.extend(unverified(page.items));
    }

    tracing::info!("scanned {} pages, {} unverified users", pages.fetched(), users.len());

    Ok(users)
}
