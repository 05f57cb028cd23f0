//! # LeaseDesk Client Library
//!
//! Headless tenant-management client for property owners: a typed tenant
//! API client, the owner dashboard and tenant creation screens, the app
//! shell with auth state and navigation, and a console front-end.
//!
//! ## Modules
//!
//! - `alert`: User-facing alerts
//! - `api`: Tenant backend trait, HTTP client and in-memory mock
//! - `config`: Configuration from the environment
//! - `console`: Line-oriented terminal driver
//! - `error`: Client error type
//! - `navigation`: Route table and navigation stack
//! - `scope`: Screen-scoped request cancellation
//! - `screens`: Owner dashboard and tenant creation form
//! - `shell`: App shell (auth state + navigator)

pub mod alert;
pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod navigation;
pub mod scope;
pub mod screens;
pub mod shell;
