//! Conversation management: transport port, message log, recovery state
//! machine, and the orchestrating session manager.

pub mod client;
pub mod log;
pub mod manager;
pub mod recovery;
