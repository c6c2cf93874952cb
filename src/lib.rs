//! Sheet Match CLI
//!
//! 照合サーバーの `/get-columns` と `/match` をターミナルから使うクライアント

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod terminal;
