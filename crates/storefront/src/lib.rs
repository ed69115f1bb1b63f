//! Relikt Arte Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused (the admin CLI uses the catalog
//! client from here).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod classify;
pub mod config;
pub mod defaults;
pub mod error;
pub mod filters;
pub mod routes;
pub mod state;
