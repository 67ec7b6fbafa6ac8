//! HTTP/JSON API server for the music shop inventory.
//!
//! Exposes one route group per entity (list, create, update, delete) plus a
//! song search route. This crate contains the router, handlers, service,
//! application state, error mapping and environment configuration.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
