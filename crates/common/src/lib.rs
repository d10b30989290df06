//! Shared runtime helpers for the product workspace.

pub mod utils;
