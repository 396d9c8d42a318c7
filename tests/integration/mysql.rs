//! Checks against a real MySQL server.
//!
//! The seeded tests recreate the `users` table in the database named by
//! `TEST_DB_NAME`, so never point it at data you want to keep.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use users_api::api::{create_router, AppState};
use users_api::config::Config;
use users_api::users::{MySqlUserStore, User};

use crate::support::{get, ids, seed_mixed, seed_pair};

/// Test config from environment, or `None` when no test database is set.
fn test_config() -> Option<Config> {
    dotenvy::dotenv().ok();

    let db_name = std::env::var("TEST_DB_NAME").ok()?;
    let mut config = Config::load().ok()?;
    config.db_name = db_name;
    Some(config)
}

async fn reset_table(pool: &MySqlPool, users: &[User]) {
    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        r#"
        CREATE TABLE users (
            id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            first_name VARCHAR(255),
            last_name VARCHAR(255),
            email VARCHAR(255),
            confirmed_at DATETIME NULL,
            created_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .unwrap();

    for u in users {
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, confirmed_at, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(u.id)
        .bind(&u.first_name)
        .bind(&u.last_name)
        .bind(&u.email)
        .bind(u.confirmed_at)
        .bind(u.created_at)
        .execute(pool)
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn unreachable_database_yields_500() {
    let config = Config {
        db_port: 1,
        ..Config::default()
    };
    let pool = MySqlPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy_with(config.connect_options());
    let router = create_router(AppState::new(Arc::new(MySqlUserStore::new(pool))));

    for uri in ["/info", "/user-count", "/first-user", "/gmail-users"] {
        let (status, body) = get(router.clone(), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    let (status, _) = get(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

// Both phases share one table, so they run in a single test.
#[tokio::test]
#[ignore = "requires MySQL"]
async fn mysql_store_serves_every_route() {
    let Some(config) = test_config() else {
        println!("Skipping: TEST_DB_NAME not set");
        return;
    };

    let store = MySqlUserStore::new(
        MySqlPoolOptions::new()
            .connect_with(config.connect_options())
            .await
            .expect("connect to test database"),
    );
    let pool = store.pool().clone();
    let router = create_router(AppState::new(Arc::new(store)));

    // Empty table
    reset_table(&pool, &[]).await;
    let (status, body) = get(router.clone(), "/first-user").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No user found" }));
    let (_, body) = get(router.clone(), "/user-count").await;
    assert_eq!(body, json!({ "count": 0 }));

    // Documented pair
    reset_table(&pool, &seed_pair()).await;
    for uri in ["/gmail-users", "/unconfirmed-users", "/2022-users"] {
        let (status, body) = get(router.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(ids(&body), vec![1], "{}", uri);
    }
    let (_, body) = get(router.clone(), "/first-user").await;
    assert_eq!(body, serde_json::to_value(&seed_pair()[0]).unwrap());

    // Mixed dataset
    reset_table(&pool, &seed_mixed()).await;
    let (_, body) = get(router.clone(), "/all-users").await;
    assert_eq!(ids(&body), vec![3, 4, 5, 7, 8, 9]);
    let (_, body) = get(router.clone(), "/unconfirmed-users").await;
    assert_eq!(ids(&body), vec![3, 7, 9]);
    let (_, body) = get(router.clone(), "/gmail-users").await;
    assert_eq!(ids(&body), vec![3, 5, 8]);
    let (_, body) = get(router.clone(), "/2022-users").await;
    assert_eq!(ids(&body), vec![3, 5, 8]);
    let (_, body) = get(router.clone(), "/user-count").await;
    assert_eq!(body, json!({ "count": 6 }));
    let (_, body) = get(router.clone(), "/last-name-count").await;
    assert_eq!(
        body,
        json!([
            { "last_name": "Dijkstra", "count": 1 },
            { "last_name": "Liskov", "count": 1 },
            { "last_name": "Lovelace", "count": 1 },
            { "last_name": "Torvalds", "count": 1 },
            { "last_name": "Turing", "count": 2 },
        ])
    );

    let (status, body) = get(router, "/info").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mysqlVersion"].as_str().is_some_and(|v| !v.is_empty()));
    assert!(body["nodeVersion"].is_string());
}
