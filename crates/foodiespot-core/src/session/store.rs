//! SessionStore trait definition.
//!
//! The store owns the mapping from the local device to its single active
//! conversation id. Implementations live in foodiespot-infra (e.g.,
//! `FileSessionStore`). Uses native async fn in traits (RPITIT, Rust 2024
//! edition).

use foodiespot_types::chat::SessionId;
use foodiespot_types::error::SessionStoreError;

/// Persistence port for the locally held session id.
///
/// At most one id is stored at any time, and only after the server has
/// acknowledged it as canonical -- no phantom or partial ids. `save` and
/// `clear` are idempotent; the write must be atomic from the store's
/// perspective (concurrent writers are last-writer-wins but never corrupt
/// the stored value).
pub trait SessionStore: Send + Sync {
    /// Read the persisted id. `None` means "no active session".
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<SessionId>, SessionStoreError>> + Send;

    /// Overwrite the persisted id. Call only after a server acknowledgment.
    fn save(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;

    /// Remove the persisted id (explicit delete or invalid-session reset).
    fn clear(
        &self,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;
}
