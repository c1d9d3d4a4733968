//! CLI Integration Test Modules

mod argument_parsing;
