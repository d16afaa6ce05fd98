//! Subcommand handlers for the `cartomancer` binary

pub mod deck;
pub mod show;
pub mod validate;
