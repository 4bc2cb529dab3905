//! Upcall handling: a backend's channel back into the cache for events it
//! cannot wait on the calling thread to process — a lease expiring, another
//! client renaming something out from under a cached dirent, a delegation
//! the backend needs back.
//!
//! Every upcall for a given entry is serialized by taking that entry's
//! `attr_lock` in write mode before acting, so two upcalls racing on the
//! same object never interleave.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::vfs::{FileHandle, FileName};

use super::entry::{Entry, EntryKey};
use super::store::GetOutcome;
use super::CacheContext;

/// Resolve `handle` to a live entry, taking a transient refcount that the
/// caller must release with [`super::store::EntryStore::put`] when done.
fn resolve(ctx: &Arc<CacheContext>, handle: &FileHandle) -> Option<Arc<Entry>> {
    match ctx.store.get(&EntryKey::from_handle(handle)) {
        GetOutcome::Found(entry) => Some(entry),
        GetOutcome::Stale | GetOutcome::NotPresent => None,
    }
}

/// Events a sub-backend pushes back into the cache.
#[derive(Debug, Clone)]
pub enum Upcall {
    InvalidateAttr(FileHandle),
    InvalidateContent(FileHandle),
    InvalidateDirent { parent: FileHandle, name: FileName },
    RecallDelegation(FileHandle),
    RenameNotify {
        from_parent: FileHandle,
        from_name: FileName,
        to_parent: FileHandle,
        to_name: FileName,
    },
}

/// Handle used by a sub-backend to push [`Upcall`]s. Cloning is cheap; every
/// clone shares the same delivery task.
#[derive(Clone)]
pub struct UpcallHandler {
    sender: mpsc::UnboundedSender<Upcall>,
}

impl UpcallHandler {
    /// Spawn the delivery task and return a handle plus its join handle, so
    /// the caller can fold it into an orderly shutdown sequence.
    pub fn spawn(ctx: Arc<CacheContext>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Upcall>();
        let task = tokio::spawn(async move {
            while let Some(upcall) = receiver.recv().await {
                process(&ctx, upcall);
            }
            debug!("upcall delivery task drained and exiting");
        });
        (UpcallHandler { sender }, task)
    }

    pub fn notify(&self, upcall: Upcall) {
        if self.sender.send(upcall).is_err() {
            warn!("upcall dropped: delivery task already exited");
        }
    }
}

fn process(ctx: &Arc<CacheContext>, upcall: Upcall) {
    match upcall {
        Upcall::InvalidateAttr(handle) => invalidate_attr(ctx, &handle),
        Upcall::InvalidateContent(handle) => invalidate_content(ctx, &handle),
        Upcall::InvalidateDirent { parent, name } => invalidate_dirent(ctx, &parent, &name),
        Upcall::RecallDelegation(handle) => recall_delegation(ctx, &handle),
        Upcall::RenameNotify { from_parent, from_name, to_parent, to_name } => {
            invalidate_dirent(ctx, &from_parent, &from_name);
            invalidate_dirent(ctx, &to_parent, &to_name);
        }
    }
}

fn invalidate_attr(ctx: &Arc<CacheContext>, handle: &FileHandle) {
    let Some(entry) = resolve(ctx, handle) else { return };
    {
        let mut attrs = entry.attr_lock.write().expect("attr_lock poisoned");
        attrs.fetched_at = Instant::now() - ctx.config.attr_ttl() * 2;
    }
    debug!(entry = entry.id.0, "upcall invalidated attrs");
    ctx.store.put(&entry);
}

fn invalidate_content(ctx: &Arc<CacheContext>, handle: &FileHandle) {
    let Some(entry) = resolve(ctx, handle) else { return };
    {
        let mut content = entry.content_lock.write().expect("content_lock poisoned");
        if let Some(dirents) = content.dirents.as_mut() {
            dirents.clean_tree();
        }
        content.complete = false;
    }
    debug!(entry = entry.id.0, "upcall invalidated content");
    ctx.store.put(&entry);
}

fn invalidate_dirent(ctx: &Arc<CacheContext>, parent: &FileHandle, name: &FileName) {
    let Some(entry) = resolve(ctx, parent) else { return };
    {
        let mut content = entry.content_lock.write().expect("content_lock poisoned");
        if let Some(dirents) = content.dirents.as_mut() {
            if let Some(slot) = dirents.lookup_by_name(name.0.as_bytes()).map(|d| d.slot) {
                dirents.set_deleted(slot);
            }
        }
    }
    ctx.store.put(&entry);
}

fn recall_delegation(ctx: &Arc<CacheContext>, handle: &FileHandle) {
    let Some(entry) = resolve(ctx, handle) else { return };
    {
        // attr_lock is held first even though this only touches state_lock,
        // to keep every upcall serialized per-entry through the same gate.
        let _attrs = entry.attr_lock.write().expect("attr_lock poisoned");
        let mut state = entry.state_lock.lock().expect("state_lock poisoned");
        state.delegation_recalled = true;
    }
    debug!(entry = entry.id.0, "upcall recalled delegation");
    ctx.store.put(&entry);
}
