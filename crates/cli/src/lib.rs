//! `storefront-cli` — interactive shell over the storefront domain.
//!
//! Owns everything the domain crates leave out: configuration, catalog
//! seeding, user-facing text and input parsing.

pub mod catalog;
pub mod config;
pub mod shell;

pub use catalog::Catalog;
pub use config::Config;
pub use shell::Shell;
