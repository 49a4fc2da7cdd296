//! Locking subsystem for skindir.
//!
//! Destructive or long-running operations on a skin are serialized with a
//! marker directory named `lock` inside the skin's directory
//! (`{base}/{skin}/lock/`). Directory creation is atomic on POSIX and most
//! other filesystems, so among any number of competing processes exactly one
//! `mkdir` succeeds; the rest see "already exists" and retry on a fixed
//! cadence until a wall-clock deadline.
//!
//! # Lock protocol
//!
//! - [`SkinHandle::acquire`] spins with the configured poll interval
//!   (default 500ms) until the deadline (default 3s) measured from the start
//!   of the call. Creation failures other than pre-existence are reported
//!   immediately, never retried.
//! - [`SkinHandle::release`] removes the marker; on failure the handle stays
//!   locked so the caller never proceeds believing a held lock is free.
//! - The in-memory locked flag only caches "this handle created the marker".
//!   If an external actor removes the marker behind the handle's back the
//!   flag goes stale; [`SkinHandle::marker_present`] reconciles against disk.
//!
//! # Holder metadata
//!
//! The winner writes a `holder.json` inside the marker directory (owner,
//! pid, creation time) so contention diagnostics can say who is holding the
//! lock and for how long. The file is best-effort and removed before the
//! marker itself on release.
//!
//! # Scoped acquisition
//!
//! [`SkinHandle::lock`] returns a [`LockGuard`] that releases on drop,
//! covering error paths and early returns. Manual [`SkinHandle::acquire`] /
//! [`SkinHandle::release`] remain available for callers that need to hold a
//! lock across a scope boundary.

mod guard;
mod handle;
mod metadata;
mod types;


// Re-export public API
pub use guard::LockGuard;
pub use handle::SkinHandle;
pub use metadata::LockMetadata;
pub use types::{LOCK_DIR, SkinAsset};
