//! The `users` table: row types, fixed queries and stores.

pub mod mock;
pub mod store;
pub mod types;

pub use mock::MockUserStore;
pub use store::{MySqlUserStore, UserStore};
pub use types::{LastNameCount, User, UserQuery};
