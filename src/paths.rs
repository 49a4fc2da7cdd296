//! Skin path resolution and classification.
//!
//! Pure string computation: mapping (base path, skin name, optional sub-path)
//! to a filesystem path, classifying a path as file-like or directory-like,
//! and normalizing raw skin names into their canonical on-disk form.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9._-]").expect("disallowed pattern is valid"));

/// How a path should be treated when probing the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// The final segment carries an extension-style suffix.
    File,
    /// Everything else.
    Directory,
}

/// Resolve the path for a skin, optionally extended by a sub-path.
///
/// Produces `base/skin` or `base/skin/sub`. The skin name must already be
/// normalized via [`sanitize_skin_name`]; no sanitization happens here.
pub fn skin_path(base: &str, skin: &str, sub: Option<&str>) -> PathBuf {
    let mut path = Path::new(base).join(skin);
    if let Some(sub) = sub {
        path = path.join(sub);
    }
    path
}

/// Classify a path as file-like or directory-like.
///
/// A path is a [`PathKind::File`] if its final segment contains a `.`
/// followed by at least one character. This is a naming heuristic used to
/// pick the right existence check, not a filesystem stat.
pub fn classify<P: AsRef<Path>>(path: P) -> PathKind {
    let name = path
        .as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() => PathKind::File,
        _ => PathKind::Directory,
    }
}

/// Normalize a raw skin name into its canonical form.
///
/// Lowercases, collapses whitespace runs into hyphens, strips anything
/// outside `[a-z0-9._-]`, and trims leading/trailing separators. Returns an
/// empty string when nothing survives; callers must treat that as an invalid
/// name rather than a usable one.
pub fn sanitize_skin_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    let cleaned = DISALLOWED.replace_all(&hyphenated, "");
    cleaned.trim_matches(|c| c == '-' || c == '.').to_string()
}
