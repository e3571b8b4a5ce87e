//! Token storage abstraction.
//!
//! [`TokenStore`] stands in for browser local storage: a single optional
//! string that survives plugin restarts. The API client receives one through
//! its constructor and clears it when the server answers `401 Unauthorized`.

use crate::domain::error::Result;

/// Persistence for the bearer token sent to the authenticated endpoint.
///
/// # Implementations
///
/// - [`FileTokenStore`](crate::storage::FileTokenStore): JSON file with atomic writes
/// - [`MemoryTokenStore`](crate::storage::MemoryTokenStore): process-local fallback
pub trait TokenStore {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear(&mut self) -> Result<()>;
}
