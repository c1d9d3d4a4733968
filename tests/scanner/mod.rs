//! Scanner Integration Test Modules

mod discovery;
mod manager;
mod registry;
mod repository_status;
