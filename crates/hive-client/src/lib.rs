//! # hive-client
//!
//! HTTP client for the Hive project-management API.
//!
//! This crate provides the network half of the store layer:
//! - Async client for the Hive REST surface (auth, projects, tasks)
//! - Bearer-token authenticated requests
//! - HTTP status → error-taxonomy mapping
//!
//! Store crates inject an [`ApiClient`] and never touch the wire directly.

pub mod client;
pub mod config;

pub use client::{ApiClient, AuthResponse, RegisterRequest, TokenResponse};
pub use config::ClientConfig;
pub use hive_core::{Error, Result};
