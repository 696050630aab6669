//! Integration test suite.
//!
//! One test binary; the modules share [`helpers`]. Tests that need a real
//! PostgreSQL instance are `#[ignore]`d and read `REUNITE_TEST_DATABASE_URL`;
//! everything else runs against an app whose pool has nothing behind it.

mod helpers;

mod admin_test;
mod auth_test;
mod ws_test;
