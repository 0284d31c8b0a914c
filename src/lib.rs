//! Cordial client library.
//!
//! This module re-exports the core components for testing and extension.

pub mod app;
pub mod backend;
pub mod buffer;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod logging;
pub mod markup;
pub mod protocol;
pub mod state;
pub mod typing;
pub mod ui;

#[cfg(test)]
mod integration_tests;
