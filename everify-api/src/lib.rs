pub mod users;
pub use users::{Attribute, UserRecord, ListUsersResponse};

pub mod client;
