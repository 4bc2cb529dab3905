//! Process-wide entry allocation and lookup, sharded for low contention.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::export::ExportId;
use crate::vfs::{FileAttr, FileHandle, Vfs};

use super::entry::{Entry, EntryFlags, EntryId, EntryKey};
use super::lru::LruEngine;

/// Outcome of a [`EntryStore::get`] call.
pub enum GetOutcome {
    Found(Arc<Entry>),
    /// The entry exists but has been marked unreachable (already reclaimed
    /// or queued for cleanup); callers must treat this as a cache miss.
    Stale,
    NotPresent,
}

/// Sharded concurrent map from backend identity to cache entry, backed by
/// [`dashmap`] so `get_or_create` resolves creation races with a single
/// atomic entry API call rather than a crate-wide lock.
pub struct EntryStore {
    by_key: DashMap<EntryKey, Arc<Entry>>,
    by_id: DashMap<EntryId, Arc<Entry>>,
    next_id: AtomicU64,
    lru: Arc<LruEngine>,
}

impl EntryStore {
    pub fn new(lru: Arc<LruEngine>) -> Arc<Self> {
        Arc::new(EntryStore {
            by_key: DashMap::new(),
            by_id: DashMap::new(),
            next_id: AtomicU64::new(1),
            lru,
        })
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Atomically resolve an existing entry for `key`, or create one using
    /// `fetch_attr` (called at most once, only on the winning insert).
    pub fn get_or_create(
        &self,
        key: EntryKey,
        sub_handle: FileHandle,
        backend: Arc<dyn Vfs>,
        fetch_attr: impl FnOnce() -> FileAttr,
    ) -> Arc<Entry> {
        if let Some(existing) = self.by_key.get(&key) {
            existing.get_ref();
            return Arc::clone(&existing);
        }

        let id = EntryId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let lane = self.lru.lane_for(&key.0);
        let entry = Arc::new(Entry::new(id, key.clone(), sub_handle, fetch_attr(), lane, backend));
        entry.get_ref();

        match self.by_key.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(slot) => {
                // Lost the race: drop our half-built entry, use the winner's.
                let winner = Arc::clone(slot.get());
                winner.get_ref();
                winner
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                self.by_id.insert(id, Arc::clone(&entry));
                slot.insert(Arc::clone(&entry));
                entry
            }
        }
    }

    /// Resolve a key to a live entry, incrementing its refcount. Returns
    /// [`GetOutcome::Stale`] for an entry marked unreachable, without
    /// touching the refcount.
    pub fn get(&self, key: &EntryKey) -> GetOutcome {
        match self.by_key.get(key) {
            Some(entry) if entry.is_unreachable() => GetOutcome::Stale,
            Some(entry) => {
                entry.get_ref();
                GetOutcome::Found(Arc::clone(&entry))
            }
            None => GetOutcome::NotPresent,
        }
    }

    /// Look up by id without touching the refcount, used by the LRU lane
    /// and dirent weak references to materialize a handle.
    pub fn get_by_id(&self, id: EntryId) -> Option<Arc<Entry>> {
        self.by_id.get(&id).map(|e| Arc::clone(&e))
    }

    /// Test/introspection helper: look up by key without touching refcount.
    #[cfg(test)]
    pub fn peek(&self, key: &EntryKey) -> Option<Arc<Entry>> {
        self.by_key.get(key).map(|e| Arc::clone(&e))
    }

    /// Release a reference. If it was the last one, the entry becomes a
    /// reclamation candidate: the cleanup queue if it was already marked
    /// unreachable (its last export association is gone), otherwise the
    /// ordinary cold queue to age out under normal LRU pressure.
    pub fn put(&self, entry: &Arc<Entry>) {
        if entry.put_ref() == 0 {
            if entry.is_unreachable() {
                self.lru.cleanup_try_push(entry);
            } else {
                self.lru.insert_cold(entry);
            }
        }
    }

    /// Force an entry unreachable immediately. If its refcount is already
    /// zero, push it straight to the cleanup queue.
    pub fn mark_unreachable(&self, entry: &Arc<Entry>) {
        {
            let mut attrs = entry.attr_lock.write().expect("attr_lock poisoned");
            attrs.flags.insert(EntryFlags::UNREACHABLE);
        }
        entry.set_unreachable_quick(true);
        if entry.ref_count() == 0 {
            self.lru.cleanup_try_push(entry);
        }
    }

    /// Unlink a reclaimed entry from both maps. Called only by the reaper
    /// after it has confirmed the entry is unreferenced and unreachable.
    pub fn remove(&self, key: &EntryKey, id: EntryId) {
        self.by_key.remove(key);
        self.by_id.remove(&id);
    }

    /// Every entry currently associated with `export`, each with a ref taken
    /// so the caller can enumerate and disassociate them without a
    /// concurrent reclaim invalidating the list mid-walk. The caller must
    /// release each ref (e.g. via [`Self::put`]) once done.
    pub fn entries_for_export(&self, export: ExportId) -> Vec<Arc<Entry>> {
        self.by_key
            .iter()
            .filter_map(|kv| {
                let entry = kv.value();
                let has_export = {
                    let attrs = entry.attr_lock.read().expect("attr_lock poisoned");
                    attrs.exports.contains(&export)
                };
                has_export.then(|| {
                    entry.get_ref();
                    Arc::clone(entry)
                })
            })
            .collect()
    }

    /// Every live entry, without touching refcounts. Used for shutdown-time
    /// enumeration only.
    pub fn all_entries(&self) -> Vec<Arc<Entry>> {
        self.by_key.iter().map(|kv| Arc::clone(kv.value())).collect()
    }
}
