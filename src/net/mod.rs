//! Networking modules for the REST endpoints and the duplex channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `socket_client` manages the websocket lifecycle,
//! and `types` defines the shared wire schema.

pub mod api;
pub mod socket_client;
pub mod types;
