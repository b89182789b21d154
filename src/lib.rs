//! Roamy library
//!
//! Everything except the terminal loop lives here so that integration tests
//! can drive the query service and the CLI parsing directly.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod debounce;
pub mod fetch;
pub mod filter_bar;
pub mod logging;
pub mod pages;
pub mod sequence;
pub mod ui;
