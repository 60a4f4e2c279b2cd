//! Shared domain types for the FoodieSpot chat client.
//!
//! This crate contains the types used across the client: session
//! identifiers, messages, conversation snapshots, chat phases, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
