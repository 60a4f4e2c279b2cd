//! Session id persistence port.

pub mod store;
