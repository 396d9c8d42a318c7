//! Read-only JSON endpoints over a MySQL `users` table.
//!
//! Every query route runs one fixed SQL statement and returns the result as
//! JSON. `/` serves a status page that polls `/user-count` every two seconds.
//!
//! ```text
//! GET /all-users          every user, ascending id
//! GET /unconfirmed-users  confirmed_at IS NULL
//! GET /gmail-users        email LIKE '%@gmail.com'
//! GET /2022-users         YEAR(created_at) = 2022
//! GET /user-count         { "count": N }
//! GET /last-name-count    [{ "last_name", "count" }] by last_name
//! GET /first-user         lowest id, or 404
//! GET /info               { "nodeVersion", "mysqlVersion" }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error types and the HTTP error boundary
//! - [`users`]: Row types, fixed queries, MySQL and in-memory stores
//! - [`api`]: Router and handlers
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Shutdown signal handling

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod users;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
