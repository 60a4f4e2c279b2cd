//! Infrastructure layer for the FoodieSpot chat client.
//!
//! Contains implementations of the ports defined in `foodiespot-core`:
//! the reqwest-backed conversation transport, the file-backed session id
//! store, and the toml configuration loader.

pub mod config;
pub mod filesystem;
pub mod http;
