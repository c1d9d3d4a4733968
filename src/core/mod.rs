//! Core services and infrastructure

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod styles; // palette shared by the status report and clap help
pub mod terminal;
pub mod version;
