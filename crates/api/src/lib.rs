//! HTTP API: the reference inventory backend.

pub mod app;
pub mod context;
pub mod middleware;
