//! Stateful skin handle: identity, cached record-store checks, permission
//! probes, and the marker-directory lock protocol.

use super::guard::LockGuard;
use super::metadata::LockMetadata;
use super::types::{LOCK_DIR, SkinAsset};
use crate::config::Config;
use crate::error::{Result, SkinError};
use crate::paths::{self, PathKind};
use crate::results::Results;
use crate::store::{InstalledSnapshot, SkinStore};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// A handle on one named skin.
///
/// Holds the memoized installation/usage checks and the lock state for a
/// single skin name. Rebinding the handle to a different name with
/// [`set_skin`](SkinHandle::set_skin) clears the memoized state; the lock
/// state is per handle and survives a rebind only as a caller error, so
/// release before renaming.
///
/// Multiple handles pointed at the same name are independent lock clients,
/// whether they live in one process or many: coordination happens purely
/// through the marker directory on disk.
#[derive(Debug)]
pub struct SkinHandle<S: SkinStore> {
    config: Config,
    store: S,
    snapshot: Option<InstalledSnapshot>,
    skin: Option<String>,
    is_installed: Option<bool>,
    is_in_use: Option<bool>,
    locked: bool,
    results: Results,
}

impl<S: SkinStore> SkinHandle<S> {
    /// Create a handle with no bound skin.
    pub fn new(config: Config, store: S) -> Self {
        Self {
            config,
            store,
            snapshot: None,
            skin: None,
            is_installed: None,
            is_in_use: None,
            locked: false,
            results: Results::new(),
        }
    }

    /// Create a handle bound to a skin name (normalized on the way in).
    pub fn for_skin(config: Config, store: S, raw: &str) -> Self {
        let mut handle = Self::new(config, store);
        handle.set_skin(raw);
        handle
    }

    /// Attach a preloaded snapshot of known-installed names.
    ///
    /// The snapshot is a fast path in front of the store's point query; a
    /// name missing from it still falls through to the store.
    pub fn with_snapshot(mut self, snapshot: InstalledSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Replace the installed-names snapshot and drop the memoized checks,
    /// since the snapshot may contradict them.
    pub fn refresh_snapshot(&mut self, snapshot: InstalledSnapshot) {
        self.snapshot = Some(snapshot);
        self.invalidate();
    }

    /// The normalized skin name, if one is bound.
    pub fn skin(&self) -> Option<&str> {
        self.skin.as_deref()
    }

    /// Whether this handle believes it holds the marker lock.
    ///
    /// This is a cache of "this handle most recently created the marker",
    /// not a statement about the filesystem; see
    /// [`marker_present`](SkinHandle::marker_present) for the on-disk truth.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Outcome messages recorded so far.
    pub fn results(&self) -> &Results {
        &self.results
    }

    /// Drain the recorded outcome messages.
    pub fn take_results(&mut self) -> Vec<String> {
        self.results.take()
    }

    /// Drop the memoized installation/usage checks.
    ///
    /// Call after any operation that changes the underlying truth, such as
    /// installing or removing the skin's record.
    pub fn invalidate(&mut self) {
        self.is_installed = None;
        self.is_in_use = None;
    }

    fn skin_name(&self) -> Result<&str> {
        self.skin.as_deref().ok_or_else(|| {
            SkinError::InvalidSkin("no skin name is bound to this handle".to_string())
        })
    }

    /// Resolve the on-disk path for the bound skin, optionally extended by a
    /// sub-path.
    pub fn path(&self, sub: Option<&str>) -> Result<PathBuf> {
        Ok(paths::skin_path(
            &self.config.skin_base_path,
            self.skin_name()?,
            sub,
        ))
    }

    fn marker_path(&self) -> Result<PathBuf> {
        self.path(Some(LOCK_DIR))
    }

    /// Bind the handle to a skin name.
    ///
    /// The raw name is normalized via [`paths::sanitize_skin_name`]; a name
    /// that normalizes to empty leaves the handle unbound, and subsequent
    /// path-dependent operations fail with [`SkinError::InvalidSkin`].
    /// Rebinding clears the memoized installation/usage checks.
    pub fn set_skin(&mut self, raw: &str) {
        let name = paths::sanitize_skin_name(raw);
        self.skin = if name.is_empty() { None } else { Some(name) };
        self.invalidate();
    }

    /// Whether the bound skin has a record in the backing store.
    ///
    /// Consults the installed-names snapshot first when one is attached,
    /// falling back to the store's point query. The result is memoized until
    /// the name changes or [`invalidate`](SkinHandle::invalidate) is called.
    pub fn is_installed(&mut self) -> Result<bool> {
        if let Some(installed) = self.is_installed {
            return Ok(installed);
        }

        let skin = self.skin_name()?;
        let installed = match &self.snapshot {
            Some(snapshot) if snapshot.contains(skin) => true,
            _ => self.store.is_installed(skin)?,
        };

        self.is_installed = Some(installed);
        Ok(installed)
    }

    /// Whether the skin path (optionally extended by a sub-path) exists with
    /// read permission. Never memoized: permissions can change between
    /// calls, and staleness here would be a correctness hazard.
    pub fn is_readable(&self, sub: Option<&str>) -> bool {
        self.probe(sub, false)
    }

    /// Whether the skin path (optionally extended by a sub-path) exists with
    /// write permission. Never memoized, for the same reason as
    /// [`is_readable`](SkinHandle::is_readable).
    pub fn is_writable(&self, sub: Option<&str>) -> bool {
        self.probe(sub, true)
    }

    /// Whether the skin is referenced by any dependent configuration.
    /// Memoized until the name changes or [`invalidate`](SkinHandle::invalidate).
    pub fn is_in_use(&mut self) -> Result<bool> {
        if let Some(in_use) = self.is_in_use {
            return Ok(in_use);
        }

        let in_use = self.store.is_in_use(self.skin_name()?)?;
        self.is_in_use = Some(in_use);
        Ok(in_use)
    }

    /// Whether the marker directory is on disk right now.
    ///
    /// Reconciliation check for the narrow race where an external actor
    /// removes the marker without going through [`release`](SkinHandle::release).
    pub fn marker_present(&self) -> Result<bool> {
        Ok(self.marker_path()?.is_dir())
    }

    /// Create a directory under the skin's path with a single `mkdir`.
    ///
    /// Low-level primitive: no retry, no existence pre-check. Failure is
    /// reported with the target's base name. Retry policy lives only in
    /// [`acquire`](SkinHandle::acquire).
    pub fn create_marker(&mut self, sub: Option<&str>) -> Result<()> {
        let path = self.path(sub)?;

        if let Err(e) = fs::create_dir(&path) {
            let msg = creation_failure(&path, &e);
            self.results.push(msg.clone());
            return Err(SkinError::LockCreateFailed(msg));
        }

        Ok(())
    }

    /// Remove a directory under the skin's path with a single `rmdir`.
    ///
    /// Low-level primitive: fails on a non-empty directory, reported with
    /// the target's base name. No retry.
    pub fn remove_marker(&mut self, sub: Option<&str>) -> Result<()> {
        let path = self.path(sub)?;

        if let Err(e) = fs::remove_dir(&path) {
            let msg = removal_failure(&path, &e);
            self.results.push(msg.clone());
            return Err(SkinError::LockReleaseFailed(msg));
        }

        Ok(())
    }

    /// Take the skin's marker-directory lock.
    ///
    /// Returns immediately when this handle already holds the lock. Otherwise
    /// attempts an atomic `mkdir` of `{base}/{skin}/lock`, retrying on
    /// "already exists" at the configured poll interval until the deadline
    /// measured from the start of this call.
    ///
    /// On timeout the skin is untouched and [`SkinError::LockTimeout`] is
    /// returned. Creation failures other than pre-existence (permissions,
    /// missing parent) come back as [`SkinError::LockCreateFailed`] without
    /// any retry, since waiting cannot fix them.
    pub fn acquire(&mut self) -> Result<()> {
        if self.locked {
            return Ok(());
        }

        let skin = self.skin_name()?.to_string();
        let marker = self.marker_path()?;
        let start = Instant::now();

        loop {
            match fs::create_dir(&marker) {
                Ok(()) => {
                    self.locked = true;
                    // Best effort: the marker itself is the lock.
                    if let Err(e) = LockMetadata::new().write_to(&marker) {
                        self.results.push(e.to_string());
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    if start.elapsed() >= self.config.lock_wait() {
                        let msg = timeout_message(&skin, &marker);
                        self.results.push(msg.clone());
                        return Err(SkinError::LockTimeout(msg));
                    }
                    thread::sleep(self.config.lock_poll());
                }
                Err(e) => {
                    let msg = creation_failure(&marker, &e);
                    self.results.push(msg.clone());
                    return Err(SkinError::LockCreateFailed(msg));
                }
            }
        }
    }

    /// Release the marker-directory lock taken by [`acquire`](SkinHandle::acquire).
    ///
    /// Releasing a lock this handle does not hold is a caller error and
    /// returns [`SkinError::NotLocked`]. When marker removal fails the handle
    /// stays locked, so the caller can never proceed believing it released a
    /// lock it still holds.
    pub fn release(&mut self) -> Result<()> {
        if !self.locked {
            return Err(SkinError::NotLocked(format!(
                "skin '{}' is not locked by this handle",
                self.skin.as_deref().unwrap_or("<unbound>")
            )));
        }

        let marker = self.marker_path()?;
        LockMetadata::remove_from(&marker);

        if let Err(e) = fs::remove_dir(&marker) {
            let msg = removal_failure(&marker, &e);
            self.results.push(msg.clone());
            return Err(SkinError::LockReleaseFailed(msg));
        }

        self.locked = false;
        Ok(())
    }

    /// Acquire the lock and return a guard that releases it on drop.
    ///
    /// This is the preferred way to hold the lock: the release runs on every
    /// exit path, including error returns and panics unwinding through the
    /// scope.
    pub fn lock(&mut self) -> Result<LockGuard<'_, S>> {
        self.acquire()?;
        Ok(LockGuard::new(self))
    }

    fn probe(&self, sub: Option<&str>, write: bool) -> bool {
        let Ok(path) = self.path(sub) else {
            return false;
        };

        let Ok(meta) = fs::metadata(&path) else {
            return false;
        };

        let kind_matches = match paths::classify(&path) {
            PathKind::File => meta.is_file(),
            PathKind::Directory => meta.is_dir(),
        };

        kind_matches
            && if write {
                permits_write(&meta)
            } else {
                permits_read(&meta)
            }
    }
}

impl<S: SkinStore> SkinAsset for SkinHandle<S> {
    fn set_skin(&mut self, raw: &str) {
        SkinHandle::set_skin(self, raw);
    }

    fn is_installed(&mut self) -> Result<bool> {
        SkinHandle::is_installed(self)
    }

    fn is_readable(&self, sub: Option<&str>) -> bool {
        SkinHandle::is_readable(self, sub)
    }

    fn is_writable(&self, sub: Option<&str>) -> bool {
        SkinHandle::is_writable(self, sub)
    }

    fn acquire(&mut self) -> Result<()> {
        SkinHandle::acquire(self)
    }

    fn release(&mut self) -> Result<()> {
        SkinHandle::release(self)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn creation_failure(path: &Path, err: &io::Error) -> String {
    format!("directory creation failed for '{}': {}", base_name(path), err)
}

fn removal_failure(path: &Path, err: &io::Error) -> String {
    format!("directory removal failed for '{}': {}", base_name(path), err)
}

fn timeout_message(skin: &str, marker: &Path) -> String {
    match LockMetadata::from_marker(marker) {
        Ok(meta) => format!(
            "unable to lock skin '{}': held by {} for {}",
            skin,
            meta.owner,
            meta.age_string()
        ),
        Err(_) => format!("unable to lock skin '{}'", skin),
    }
}

/// Permission checks go by mode bits, not by effective access: a directory
/// chmodded read-only must probe as unwritable even for a privileged user,
/// because these probes guard operations that will run on arbitrary hosts.
#[cfg(unix)]
fn permits_read(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o444 != 0
}

#[cfg(unix)]
fn permits_write(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o222 != 0
}

#[cfg(not(unix))]
fn permits_read(_meta: &fs::Metadata) -> bool {
    true
}

#[cfg(not(unix))]
fn permits_write(meta: &fs::Metadata) -> bool {
    !meta.permissions().readonly()
}
