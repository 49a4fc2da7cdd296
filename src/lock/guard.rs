//! RAII lock guard.

use super::handle::SkinHandle;
use crate::error::Result;
use crate::store::SkinStore;
use std::ops::{Deref, DerefMut};

/// RAII guard for a skin's marker-directory lock.
///
/// Obtained from [`SkinHandle::lock`]. While the guard is alive the handle is
/// borrowed mutably, so all work on the skin goes through the guard (it
/// derefs to the handle). When dropped, the lock is released; if the release
/// fails a warning is printed but no panic occurs, since a drop path cannot
/// return the error.
///
/// Callers that need to observe a release failure use
/// [`release`](LockGuard::release) instead of relying on drop.
#[derive(Debug)]
pub struct LockGuard<'a, S: SkinStore> {
    handle: &'a mut SkinHandle<S>,
    released: bool,
}

impl<'a, S: SkinStore> LockGuard<'a, S> {
    pub(super) fn new(handle: &'a mut SkinHandle<S>) -> Self {
        Self {
            handle,
            released: false,
        }
    }

    /// Release the lock now and report the outcome.
    ///
    /// On failure the handle stays locked (see [`SkinHandle::release`]) and
    /// the caller keeps the error; the drop path will not retry.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.handle.release()
    }
}

impl<'a, S: SkinStore> Deref for LockGuard<'a, S> {
    type Target = SkinHandle<S>;

    fn deref(&self) -> &Self::Target {
        self.handle
    }
}

impl<'a, S: SkinStore> DerefMut for LockGuard<'a, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.handle
    }
}

impl<'a, S: SkinStore> Drop for LockGuard<'a, S> {
    fn drop(&mut self) {
        if !self.released
            && self.handle.locked()
            && let Err(e) = self.handle.release()
        {
            eprintln!(
                "Warning: failed to release lock for skin '{}': {}",
                self.handle.skin().unwrap_or("<unbound>"),
                e
            );
        }
    }
}
