//! End-to-end release tests against a fake toolchain.
//!
//! The fake toolchain and product binary are shell scripts.
#![cfg(unix)]

mod collision_tests;
mod common;
mod failure_tests;
