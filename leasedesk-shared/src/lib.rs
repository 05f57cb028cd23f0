//! # LeaseDesk Shared Library
//!
//! This crate contains the types shared by every part of the LeaseDesk
//! client: the tenant wire schema, the authentication state holder and the
//! tenant event bus.
//!
//! ## Module Organization
//!
//! - `models`: Tenant records and the creation payload
//! - `auth`: Authentication provider seam and auth state holder
//! - `events`: Process-local tenant change notifications

pub mod auth;
pub mod events;
pub mod models;

/// Current version of the LeaseDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
