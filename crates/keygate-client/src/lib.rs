//! Keygate client library
//!
//! This crate provides the core functionality for the Keygate desktop client:
//! configuration, the normalized API-call helper, and the form controller
//! behind the login and registration views.

pub mod config;
pub mod network;
pub mod state;
pub mod ui;
