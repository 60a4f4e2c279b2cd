//! Session manager logic and port definitions for the FoodieSpot chat client.
//!
//! This crate defines the "ports" (the `ConversationClient` transport
//! trait and the `SessionStore` persistence trait) that the infrastructure
//! layer implements, plus the components built on them: the append-only
//! `MessageLog`, the `RecoveryController` state machine, and the
//! orchestrating `SessionManager`. It depends only on `foodiespot-types`
//! -- never on `foodiespot-infra` or any network/IO crate.

pub mod chat;
pub mod session;
