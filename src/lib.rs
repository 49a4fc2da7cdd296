//! skindir: directory-backed skin management core.
//!
//! A "skin" is a named unit of on-disk content living under a configured base
//! path, with its installation state tracked in a backing record store. This
//! crate provides the pieces every skin operation builds on:
//!
//! - path resolution and file/directory classification ([`paths`])
//! - installation and usage checks against the record store ([`store`]),
//!   memoized per handle with an optional preloaded snapshot fast path
//! - read/write permission probes
//! - an advisory lock based on atomic marker-directory creation ([`lock`]),
//!   with bounded spin-wait retry, used to serialize destructive operations
//!   on a skin across independent processes sharing one filesystem
//!
//! Higher-level operations (import, export, duplication) and any CLI or admin
//! surface are left to embedders; they compose [`lock::SkinHandle`] and the
//! [`store::SkinStore`] trait.
//!
//! # Example
//!
//! ```no_run
//! use skindir::{Config, MemorySkinStore, SkinHandle};
//!
//! let config = Config::new("/var/www/skins");
//! let mut handle = SkinHandle::for_skin(config, MemorySkinStore::new(), "Clean Sweep");
//!
//! let guard = handle.lock()?;
//! // ... mutate the skin directory while the lock is held ...
//! guard.release()?;
//! # Ok::<(), skindir::SkinError>(())
//! ```

pub mod config;
pub mod error;
pub mod lock;
pub mod paths;
pub mod results;
pub mod store;

pub use config::Config;
pub use error::{Result, SkinError};
pub use lock::{LockGuard, LockMetadata, SkinAsset, SkinHandle};
pub use paths::PathKind;
pub use results::Results;
pub use store::{InstalledSnapshot, MemorySkinStore, SkinStore};
