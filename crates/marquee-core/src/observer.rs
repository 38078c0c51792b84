//! Progress reporting for vault operations
//!
//! The vault narrates what it does through a [`VaultObserver`]. Observers
//! only ever watch; nothing they do can change what ends up on disk.

use crate::cast::SelectedActor;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// The two kinds of empty link-target notes a vault maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubKind {
    Actor,
    Genre,
}

impl StubKind {
    /// Directory under the vault root holding this kind of stub
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Actor => "actors",
            Self::Genre => "genres",
        }
    }
}

impl fmt::Display for StubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor => write!(f, "actor"),
            Self::Genre => write!(f, "genre"),
        }
    }
}

/// Hooks called by [`Vault`](crate::Vault) at each step. All methods default
/// to doing nothing.
pub trait VaultObserver: Send + Sync {
    fn loading_stubs(&self, _kind: StubKind, _dir: &Path) {}

    fn loaded_stubs(&self, _kind: StubKind, _count: usize) {}

    fn downloading_poster(&self, _url: &str) {}

    fn cast_member_selected(&self, _actor: &SelectedActor) {}

    fn cast_members_skipped(&self, _count: usize) {}

    fn stub_created(&self, _kind: StubKind, _path: &Path) {}

    fn note_created(&self, _path: &Path) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl VaultObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl VaultObserver for TracingObserver {
    fn loading_stubs(&self, kind: StubKind, dir: &Path) {
        info!("Loading {}s from: {}", kind, dir.display());
    }

    fn loaded_stubs(&self, kind: StubKind, count: usize) {
        info!("Loaded {} {}s", count, kind);
    }

    fn downloading_poster(&self, url: &str) {
        info!("Downloading poster: {}", url);
    }

    fn cast_member_selected(&self, actor: &SelectedActor) {
        debug!("  {} (Reason: {})", actor.name, actor.reason);
    }

    fn cast_members_skipped(&self, count: usize) {
        info!("Skipped {} cast members", count);
    }

    fn stub_created(&self, kind: StubKind, path: &Path) {
        debug!("Created {} file: {}", kind, path.display());
    }

    fn note_created(&self, path: &Path) {
        info!("Created movie file: {}", path.display());
    }
}
