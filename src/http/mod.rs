//! Outbound HTTP client with redirect resolution.

mod client;

pub use client::HttpClient;
