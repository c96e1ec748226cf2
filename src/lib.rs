//! vodforge - VOD encoding and packaging automation
//!
//! This library crate exposes the workflows behind the CLI for integration testing.

pub mod config;
pub mod manifest;
pub mod poller;
pub mod recipes;

pub use poller::TaskFailed;
