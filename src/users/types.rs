//! User rows and the closed set of fixed queries.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum::{Display, EnumIter};

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Primary key.
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// `None` means unconfirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Number of users sharing one last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LastNameCount {
    pub last_name: Option<String>,
    pub count: i64,
}

/// Fixed, parameter-free queries returning a list of users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum UserQuery {
    /// Every user, ascending by id.
    #[strum(serialize = "all-users")]
    All,
    /// Users with no confirmation timestamp.
    #[strum(serialize = "unconfirmed-users")]
    Unconfirmed,
    /// Users with an `@gmail.com` address.
    #[strum(serialize = "gmail-users")]
    Gmail,
    /// Users created during calendar year 2022.
    #[strum(serialize = "2022-users")]
    CreatedIn2022,
}

/// Column list shared by every row-returning statement.
///
/// `id` is cast so signed and unsigned key columns decode the same way.
macro_rules! select_users {
    ($tail:literal) => {
        concat!(
            "SELECT CAST(id AS SIGNED) AS id, first_name, last_name, email, confirmed_at, created_at FROM users",
            $tail
        )
    };
}

pub(crate) const SELECT_FIRST_USER: &str = select_users!(" ORDER BY id LIMIT 1");
pub(crate) const SELECT_VERSION: &str = "SELECT VERSION()";
pub(crate) const SELECT_USER_COUNT: &str = "SELECT COUNT(*) AS count FROM users";
pub(crate) const SELECT_LAST_NAME_COUNTS: &str =
    "SELECT last_name, COUNT(*) AS count FROM users GROUP BY last_name ORDER BY last_name";

impl UserQuery {
    /// The SQL statement this query runs.
    pub fn sql(self) -> &'static str {
        match self {
            UserQuery::All => select_users!(" ORDER BY id"),
            UserQuery::Unconfirmed => select_users!(" WHERE confirmed_at IS NULL"),
            UserQuery::Gmail => select_users!(" WHERE email LIKE '%@gmail.com'"),
            UserQuery::CreatedIn2022 => select_users!(" WHERE YEAR(created_at) = 2022"),
        }
    }

    /// HTTP path serving this query.
    pub fn path(self) -> &'static str {
        match self {
            UserQuery::All => "/all-users",
            UserQuery::Unconfirmed => "/unconfirmed-users",
            UserQuery::Gmail => "/gmail-users",
            UserQuery::CreatedIn2022 => "/2022-users",
        }
    }

    /// Row filter equivalent to the SQL `WHERE` clause.
    ///
    /// The gmail match is case-sensitive here; in MySQL it follows the
    /// column collation.
    pub fn matches(self, user: &User) -> bool {
        match self {
            UserQuery::All => true,
            UserQuery::Unconfirmed => user.confirmed_at.is_none(),
            UserQuery::Gmail => user
                .email
                .as_deref()
                .is_some_and(|email| email.ends_with("@gmail.com")),
            UserQuery::CreatedIn2022 => user.created_at.year() == 2022,
        }
    }
}
