//! End-to-end tests for the bounty-board HTTP surface live in `tests/`.
//! This crate intentionally exports nothing.
