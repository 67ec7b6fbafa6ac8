//! Client access to the music shop inventory.
//!
//! [`ShopClient`] offers one operation set over two interchangeable
//! backends: the HTTP API ([`HttpBackend`]) and a directory-backed local
//! store ([`LocalBackend`]). Which one is used is decided by
//! [`ClientConfig`] when the client is built.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod local;

pub use backend::ShopBackend;
pub use client::ShopClient;
pub use config::{Backend, ClientConfig, ConfigError};
pub use error::ClientError;
pub use http::HttpBackend;
pub use local::LocalBackend;
