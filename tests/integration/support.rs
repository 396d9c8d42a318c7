//! Shared fixtures.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;
use users_api::users::User;

pub fn user(
    id: i64,
    first: &str,
    last: Option<&str>,
    email: &str,
    confirmed: Option<(i32, u32, u32)>,
    created: (i32, u32, u32),
) -> User {
    User {
        id,
        first_name: Some(first.to_string()),
        last_name: last.map(str::to_string),
        email: Some(email.to_string()),
        confirmed_at: confirmed.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
        created_at: Utc
            .with_ymd_and_hms(created.0, created.1, created.2, 0, 0, 0)
            .unwrap(),
    }
}

/// Ada and Grace.
pub fn seed_pair() -> Vec<User> {
    vec![
        user(1, "Ada", Some("Lovelace"), "ada@gmail.com", None, (2022, 1, 5)),
        user(
            2,
            "Grace",
            Some("Hopper"),
            "grace@navy.mil",
            Some((2021, 5, 1)),
            (2021, 6, 1),
        ),
    ]
}

/// A larger dataset with repeated last names and edge-of-year dates.
pub fn seed_mixed() -> Vec<User> {
    vec![
        user(5, "Alan", Some("Turing"), "alan@gmail.com", Some((2022, 2, 1)), (2022, 12, 31)),
        user(3, "Ada", Some("Lovelace"), "ada@gmail.com", None, (2022, 1, 1)),
        user(9, "Dora", Some("Turing"), "dora@gmail.co", None, (2023, 1, 1)),
        user(7, "Edsger", Some("Dijkstra"), "ed@tue.nl", None, (2021, 12, 31)),
        user(4, "Barbara", Some("Liskov"), "barbara@mit.edu", Some((2020, 1, 1)), (2020, 1, 1)),
        user(8, "Linus", Some("Torvalds"), "linus@gmail.com", Some((2023, 3, 3)), (2022, 6, 15)),
    ]
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// `id` values of a JSON array of users.
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|u| u["id"].as_i64().expect("numeric id"))
        .collect()
}
