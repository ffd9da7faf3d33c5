//! shape checks for the identifiers handed to the directory tool.
//!
//! values end up as separate process arguments so quoting is not a concern,
//! but whitespace or control characters always point to a bad copy paste.

pub const MAX_USER_POOL_ID_CHARS: usize = 55;

pub const MAX_NAMESPACE_CHARS: usize = 32;

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// true when the value is non empty, at most `max_chars` long and free of
/// whitespace and control characters
pub fn is_plain_token(given: &str, max_chars: usize) -> bool {
    let mut count = 0;

    for ch in given.chars() {
        if ch.is_control() || ch.is_whitespace() {
            return false;
        }

        count += 1;

        if count > max_chars {
            return false;
        }
    }

    count > 0
}

/// user pool ids are `<region>_<id>`, e.g. `us-east-1_AbC123`
pub fn user_pool_id_valid(given: &str) -> bool {
    if given.len() > MAX_USER_POOL_ID_CHARS {
        return false;
    }

    let Some((region, id)) = given.rsplit_once('_') else {
        return false;
    };

    !region.is_empty() &&
        region.chars().all(is_word_char) &&
        !id.is_empty() &&
        id.chars().all(|ch| ch.is_ascii_alphanumeric())
}

/// the namespace prefixes every managed username, e.g. `Cognito_`
pub fn namespace_valid(given: &str) -> bool {
    is_plain_token(given, MAX_NAMESPACE_CHARS) && !given.contains('@')
}
