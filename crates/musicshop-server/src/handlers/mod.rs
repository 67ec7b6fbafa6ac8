//! HTTP handler modules for the shop API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! service lock, delegate to [`ShopService`](crate::service::ShopService), and
//! return JSON responses. No business logic lives in handlers.

pub mod parties;
pub mod songs;
