//! HTTP surface of the explorer: axum handlers, the route table and the
//! tower middleware around it. The binary in `main.rs` only wires config,
//! logging and shutdown around [`router::create_app`].

pub mod api;
pub mod middleware;
pub mod router;
