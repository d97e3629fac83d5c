//! HTTP transport for the matching service

mod client;

pub use client::{ClientConfig, FindersClient};
