//! Relikt Arte Core - Shared types library.
//!
//! This crate provides common types used across all Relikt Arte components:
//! - `storefront` - Public-facing e-commerce site
//! - `cli` - Admin command-line tools (URL resolution, backend diagnostics)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe ids and prices
//! - [`url`] - Backend URL construction and normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod url;

pub use types::*;
