// ABOUTME: Library root for repull; the upgrade core and its engine client.
// ABOUTME: The CLI entry point is in main.rs.

pub mod config;
pub mod error;
pub mod output;
pub mod runtime;
pub mod types;
pub mod upgrade;
