//! Integration tests for the users service.
//!
//! `api` drives the public router with the in-memory store. `mysql` runs the
//! same checks against a real database; those tests are ignored by default.
//! Run them with: TEST_DB_NAME=users_test cargo test --test integration -- --ignored

mod mysql;
mod support;
