//! Lock marker constants and the skin capability interface.

use crate::error::Result;

/// Name of the marker directory created inside a skin's directory while it is
/// locked. Its presence on disk is the persisted state of the lock.
pub const LOCK_DIR: &str = "lock";

/// Capability interface for anything that manages a named skin.
///
/// Concrete skin kinds (page sets, form sets, stylesheet sets) compose a
/// [`super::SkinHandle`] and expose this interface rather than inheriting
/// behavior from each other.
pub trait SkinAsset {
    /// Bind the handle to a skin, normalizing the raw name and clearing any
    /// cached state for the previous name.
    fn set_skin(&mut self, raw: &str);

    /// Whether the bound skin has a record in the backing store. Memoized
    /// per handle until the name changes or the caches are invalidated.
    fn is_installed(&mut self) -> Result<bool>;

    /// Whether the skin path (optionally extended by a sub-path) exists with
    /// read permission. Re-probed on every call.
    fn is_readable(&self, sub: Option<&str>) -> bool;

    /// Whether the skin path (optionally extended by a sub-path) exists with
    /// write permission. Re-probed on every call.
    fn is_writable(&self, sub: Option<&str>) -> bool;

    /// Take the skin's marker-directory lock, waiting up to the configured
    /// deadline. Idempotent when this handle already holds the lock.
    fn acquire(&mut self) -> Result<()>;

    /// Release the marker-directory lock taken by `acquire`.
    fn release(&mut self) -> Result<()>;
}
