//! # Cartomancer
//!
//! Tarot deck tooling for the terminal. Validates deck bundles, manages a
//! per-user deck library and shows cards as half-block art beside their
//! metadata.

pub mod art;
pub mod canvas;
pub mod config;
pub mod deck;
pub mod errors;
pub mod layout;
pub mod validator;

pub use errors::{CartomancerError, Result};
