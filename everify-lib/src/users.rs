use email_address::EmailAddress;
use serde::{Serialize, Deserialize};

use crate::validation::is_plain_token;

/// name of the directory attribute that flags an email as verified
pub const EMAIL_VERIFIED_ATTR: &str = "email_verified";

/// the only value of [`EMAIL_VERIFIED_ATTR`] that counts as verified
pub const EMAIL_VERIFIED_TRUE: &str = "true";

/// prefix carried by every username this tool manages in the directory
pub const DEFAULT_NAMESPACE: &str = "Cognito_";

pub const MAX_USERNAME_CHARS: usize = 128;

pub fn username_valid(given: &str) -> bool {
    is_plain_token(given, MAX_USERNAME_CHARS)
}

pub fn email_valid(given: &str) -> bool {
    EmailAddress::is_valid(given)
}

/// derives the directory username for an email.
///
/// accounts are expected to have been created as `<namespace><email>` with
/// the email lowercased and its `@` swapped for `-`. any account created
/// another way cannot be found by email.
pub fn username_from_email(namespace: &str, email: &str) -> String {
    let lowered = email.to_lowercase();

    format!("{}{}", namespace, lowered.replacen('@', "-", 1))
}

/// checks an attribute value against the verified flag
pub fn is_verified_value(value: Option<&str>) -> bool {
    value == Some(EMAIL_VERIFIED_TRUE)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email_verified: bool,
}

impl User {
    pub fn new<U>(username: U, email_verified: bool) -> Self
    where
        U: Into<String>
    {
        User {
            username: username.into(),
            email_verified,
        }
    }
}

/// a single page of a directory scan.
///
/// `next_page_token` is only present when more pages remain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub users: Vec<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl UsersPage {
    pub fn has_next(&self) -> bool {
        self.next_page_token.is_some()
    }
}
