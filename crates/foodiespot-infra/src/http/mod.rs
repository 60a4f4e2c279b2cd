//! HTTP transport for the conversation server.

mod client;
mod types;

pub use client::HttpConversationClient;
