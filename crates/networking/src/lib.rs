//! Campus Finders Networking - HTTP client and API wrappers for the matching service

pub mod api;
pub mod http;

pub use http::{ClientConfig, FindersClient};
