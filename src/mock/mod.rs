//! A lightweight mock HTTP server that stands in for an LLM inference
//! endpoint. Every request gets the same canned completion after a short
//! artificial delay, which is enough for latency and integration testing
//! of dashboard clients without contacting a real provider.

mod server;

pub use server::*;
