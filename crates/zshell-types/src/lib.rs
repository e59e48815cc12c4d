//! Foundation types for zShell.
//!
//! This crate holds the pieces shared by every zShell crate: the error type,
//! the configuration file format, and home-directory path expansion.

pub mod config;
pub mod error;
pub mod path;
