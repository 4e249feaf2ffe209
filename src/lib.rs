//! Library crate for openrexcheck, exposing modules for binaries and tests.

pub mod config;
/// Upstream gateway access.
pub mod dao;
mod dto;
mod error;
/// HTTP routes.
pub mod routes;
/// Business logic behind the routes.
pub mod services;
/// Shared application state.
pub mod state;

#[cfg(test)]
mod test_support;
