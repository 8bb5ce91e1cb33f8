//! Console CLI building blocks
//!
//! The binary wires these together; they live in a library so the dev server and the
//! publisher can be exercised from integration tests.

pub mod commands;
pub mod config;
pub mod devserver;
pub mod logging;
pub mod publish;
pub mod session_file;
pub mod terminal;
pub mod validation;

pub use config::ConsoleConfig;
