//! tetsuocode - launcher and web shell for the AI coding assistant.

pub mod assets;
pub mod browser;
pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod handlers;
pub mod launcher;
pub mod middleware;
pub mod package;
pub mod server;
pub mod state;
pub mod workspace;
