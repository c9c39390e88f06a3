//! Integration test harness.
//!
//! These tests exercise the HTTP surface against a real PostgreSQL instance
//! and are gated behind a configured TEST_DATABASE_URL.

mod analysis_tests;
mod cases_tests;
mod documents_tests;
