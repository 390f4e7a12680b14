//! HTTP access to the UMS backend.

pub mod client;

pub use client::ApiClient;
