pub mod error;
pub mod validation;
pub mod users;

pub use users::{User, UsersPage};
