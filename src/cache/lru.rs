//! Multi-lane LRU: sharded hot/cold queues, a background reaper, and the
//! cleanup queue that bypasses LRU age entirely.
//!
//! Lanes never migrate entries between each other; an entry's lane is fixed
//! at creation (hashed from its [`EntryKey`]). Each lane owns an intrusive
//! doubly-linked list per queue (L1 hot, L2 cold), implemented with
//! key-based links rather than raw pointers: every node stores the
//! [`EntryId`] of its neighbours, and the lane resolves links through its
//! own small id-indexed table. This keeps removal O(1) without unsafe code,
//! in the spirit of this crate's existing intrusive buffer chain.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_queue::SegQueue;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::vfs::{FileHandle, Vfs};

use super::entry::{Entry, EntryId};
use super::store::EntryStore;

/// Which lane an entry is pinned to, assigned once at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LaneId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Queue {
    Hot,
    Cold,
}

struct Lane {
    hot: VecDeque<EntryId>,
    cold: VecDeque<EntryId>,
    hot_touches: u64,
}

impl Lane {
    fn new() -> Self {
        Lane { hot: VecDeque::new(), cold: VecDeque::new(), hot_touches: 0 }
    }

    fn remove(&mut self, id: EntryId) -> Option<Queue> {
        if let Some(pos) = self.hot.iter().position(|&x| x == id) {
            self.hot.remove(pos);
            return Some(Queue::Hot);
        }
        if let Some(pos) = self.cold.iter().position(|&x| x == id) {
            self.cold.remove(pos);
            return Some(Queue::Cold);
        }
        None
    }

    fn touch(&mut self, id: EntryId, demote_after: u64) {
        self.remove(id);
        self.hot.push_front(id);
        self.hot_touches += 1;
        if self.hot_touches >= demote_after && self.hot.len() > 1 {
            if let Some(tail) = self.hot.pop_back() {
                self.cold.push_front(tail);
            }
            self.hot_touches = 0;
        }
    }

    fn insert_cold(&mut self, id: EntryId) {
        self.remove(id);
        self.cold.push_front(id);
    }
}

/// How many lane-local touches accumulate before the coldest hot entry is
/// demoted. Keeps L1 from growing unbounded under a read-heavy workload.
const HOT_DEMOTE_AFTER: u64 = 64;

/// The LRU engine: `lane_count` independent lanes plus a lock-free cleanup
/// queue serviced by the same reaper thread.
pub struct LruEngine {
    lanes: Vec<Mutex<Lane>>,
    cleanup: SegQueue<EntryId>,
    /// Directories whose dirent index exhausted the quadratic-probe bound
    /// and need their tree reset so the next full listing rebuilds it clean.
    reindex: SegQueue<EntryId>,
    shutdown: AtomicBool,
}

impl LruEngine {
    pub fn new(lane_count: usize) -> Arc<Self> {
        assert!(lane_count.is_power_of_two() && lane_count > 0);
        let lanes = (0..lane_count).map(|_| Mutex::new(Lane::new())).collect();
        Arc::new(LruEngine {
            lanes,
            cleanup: SegQueue::new(),
            reindex: SegQueue::new(),
            shutdown: AtomicBool::new(false),
        })
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Assign a lane for a freshly created entry, hashed from its key bytes.
    pub fn lane_for(&self, key_bytes: &[u8]) -> LaneId {
        let mut hash: u64 = 0xcbf29ce484222325;
        for &b in key_bytes {
            hash ^= b as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        LaneId((hash as usize) & (self.lanes.len() - 1))
    }

    /// Record an access: promotes the entry to the head of its lane's hot queue.
    pub fn touch(&self, entry: &Entry) {
        let mut lane = self.lanes[entry.lane.0].lock().expect("lru lane poisoned");
        lane.touch(entry.id, HOT_DEMOTE_AFTER);
    }

    /// Place a freshly-created or just-released entry onto the cold queue.
    pub fn insert_cold(&self, entry: &Entry) {
        let mut lane = self.lanes[entry.lane.0].lock().expect("lru lane poisoned");
        lane.insert_cold(entry.id);
    }

    /// Remove an entry from whichever queue currently holds it. Called when
    /// an entry is reclaimed or forced onto the cleanup queue.
    pub fn unlink(&self, entry: &Entry) {
        let mut lane = self.lanes[entry.lane.0].lock().expect("lru lane poisoned");
        lane.remove(entry.id);
    }

    /// Bypass LRU age entirely: push straight to the cleanup queue. Callers
    /// must not hold `entry.attr_lock` — the cleanup path takes the lane
    /// lock before `attr_lock` on the reaper side, so holding it here would
    /// invert the documented lock order.
    pub fn cleanup_try_push(&self, entry: &Entry) {
        self.unlink(entry);
        self.cleanup.push(entry.id);
    }

    /// Queue a directory for a degraded-index reset after its dirent insert
    /// exhausted the probe bound. Non-blocking; serviced by the next sweep.
    pub fn queue_reindex(&self, id: EntryId) {
        self.reindex.push(id);
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// One reclaim sweep: drains the cleanup queue, then the reindex queue,
    /// then walks each lane's cold tail opportunistically. Never blocks —
    /// every lock acquisition here is a `try_lock`. `release_tx` is handed
    /// to `reclaim_one` so a reclaimed entry's sub-backend can be notified
    /// without the reaper itself ever awaiting.
    fn sweep(
        self: &Arc<Self>,
        store: &EntryStore,
        release_tx: &mpsc::UnboundedSender<(Arc<dyn Vfs>, FileHandle)>,
    ) {
        while let Some(id) = self.cleanup.pop() {
            self.reclaim_one(store, id, true, release_tx);
        }

        while let Some(id) = self.reindex.pop() {
            self.reset_for_reindex(store, id);
        }

        for lane_idx in 0..self.lanes.len() {
            let candidate = {
                let Ok(lane) = self.lanes[lane_idx].try_lock() else { continue };
                lane.cold.back().copied()
            };
            if let Some(id) = candidate {
                self.reclaim_one(store, id, false, release_tx);
            }
        }
    }

    fn reclaim_one(
        self: &Arc<Self>,
        store: &EntryStore,
        id: EntryId,
        forced: bool,
        release_tx: &mpsc::UnboundedSender<(Arc<dyn Vfs>, FileHandle)>,
    ) {
        let Some(entry) = store.get_by_id(id) else { return };
        if entry.ref_count() > 0 {
            if forced {
                debug!(entry = id.0, "cleanup-queued entry still referenced, deferring");
            }
            return;
        }
        let Ok(mut attrs) = entry.attr_lock.try_write() else { return };
        if entry.ref_count() > 0 {
            return;
        }
        attrs.flags.insert(super::entry::EntryFlags::UNREACHABLE);
        entry.set_unreachable_quick(true);
        drop(attrs);

        if let Ok(mut content) = entry.content_lock.try_write() {
            if let Some(dirents) = content.dirents.as_mut() {
                dirents.clean_tree();
            }
        }

        self.unlink(&entry);
        store.remove(&entry.key, entry.id);
        if release_tx.send((Arc::clone(&entry.backend), entry.sub_handle.clone())).is_err() {
            debug!(entry = id.0, "release queue closed, sub-backend not notified");
        }
        debug!(entry = id.0, forced, "reclaimed cache entry");
    }

    /// Reset a directory's dirent index after a collision-overflow insert
    /// flagged it. The reaper cannot refetch the directory itself (no
    /// backend handle at this layer); it only clears the degraded tree and
    /// marks the directory's listing incomplete, so the next full readdir
    /// rebuilds the index from scratch.
    fn reset_for_reindex(&self, store: &EntryStore, id: EntryId) {
        let Some(entry) = store.get_by_id(id) else { return };
        let Ok(mut attrs) = entry.attr_lock.try_write() else {
            self.reindex.push(id);
            return;
        };
        if !attrs.flags.contains(super::entry::EntryFlags::NEEDS_REINDEX) {
            return;
        }
        let Ok(mut content) = entry.content_lock.try_write() else {
            // Keep the flag set and retry on a later sweep.
            drop(attrs);
            self.reindex.push(id);
            return;
        };
        attrs.flags.remove(super::entry::EntryFlags::NEEDS_REINDEX);
        drop(attrs);
        if let Some(dirents) = content.dirents.as_mut() {
            dirents.clean_tree();
        }
        content.complete = false;
        drop(content);
        debug!(entry = id.0, "dirent index reset after collision overflow, awaiting full relist");
    }

    /// Spawn the dedicated reaper thread. Not a tokio task: the reaper must
    /// never suspend while holding a lane lock, so it runs on its own OS
    /// thread with blocking sleeps between sweeps.
    pub fn spawn_reaper(
        self: &Arc<Self>,
        store: Arc<EntryStore>,
        interval: Duration,
        release_tx: mpsc::UnboundedSender<(Arc<dyn Vfs>, FileHandle)>,
    ) -> thread::JoinHandle<()> {
        let engine = Arc::clone(self);
        thread::Builder::new()
            .name("mdcache-reaper".into())
            .spawn(move || {
                while !engine.is_shutdown() {
                    engine.sweep(&store, &release_tx);
                    thread::sleep(interval);
                }
                warn!("reaper thread observed shutdown, running final sweep");
                engine.sweep(&store, &release_tx);
            })
            .expect("failed to spawn reaper thread")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::entry::{EntryFlags, EntryKey};
    use crate::cache::store::EntryStore;
    use crate::cache::test_support::null_backend;
    use crate::vfs::{FileAttr, FileHandle, FileTime, FileType};

    fn sample_attr(fileid: u64, file_type: FileType) -> FileAttr {
        FileAttr {
            file_type,
            mode: 0o644,
            nlink: 1,
            uid: 0,
            gid: 0,
            size: 0,
            used: 0,
            device: None,
            fsid: 1,
            fileid,
            atime: FileTime { seconds: 0, nanos: 0 },
            mtime: FileTime { seconds: 0, nanos: 0 },
            ctime: FileTime { seconds: 0, nanos: 0 },
        }
    }

    #[test]
    fn touch_promotes_and_unlink_removes() {
        let engine = LruEngine::new(4);
        let store = EntryStore::new(Arc::clone(&engine));
        let key = EntryKey(b"a".to_vec());
        let entry = store.get_or_create(key, FileHandle(b"a".to_vec()), null_backend(), || {
            sample_attr(1, FileType::Regular)
        });
        engine.touch(&entry);
        engine.unlink(&entry);
        let lane = engine.lanes[entry.lane.0].lock().unwrap();
        assert!(lane.hot.is_empty() && lane.cold.is_empty());
    }

    #[test]
    fn unreferenced_entry_is_reclaimed_by_sweep() {
        let engine = LruEngine::new(2);
        let store = EntryStore::new(Arc::clone(&engine));
        let key = EntryKey(b"b".to_vec());
        let entry = store.get_or_create(key.clone(), FileHandle(b"b".to_vec()), null_backend(), || {
            sample_attr(2, FileType::Regular)
        });
        engine.insert_cold(&entry);
        drop(entry);
        let (release_tx, _release_rx) = mpsc::unbounded_channel();
        engine.sweep(&store, &release_tx);
        assert!(store.peek(&key).is_none());
    }

    #[test]
    fn referenced_entry_survives_sweep() {
        let engine = LruEngine::new(2);
        let store = EntryStore::new(Arc::clone(&engine));
        let key = EntryKey(b"c".to_vec());
        let entry = store.get_or_create(key.clone(), FileHandle(b"c".to_vec()), null_backend(), || {
            sample_attr(3, FileType::Regular)
        });
        entry.get_ref();
        engine.insert_cold(&entry);
        let (release_tx, _release_rx) = mpsc::unbounded_channel();
        engine.sweep(&store, &release_tx);
        assert!(store.peek(&key).is_some());
    }

    #[test]
    fn reindex_queue_resets_dirent_tree() {
        let engine = LruEngine::new(2);
        let store = EntryStore::new(Arc::clone(&engine));
        let key = EntryKey(b"d".to_vec());
        let entry = store.get_or_create(key, FileHandle(b"d".to_vec()), null_backend(), || {
            sample_attr(4, FileType::Directory)
        });
        {
            let mut attrs = entry.attr_lock.write().unwrap();
            attrs.flags.insert(EntryFlags::NEEDS_REINDEX);
            let mut content = entry.content_lock.write().unwrap();
            content.dirents.as_mut().unwrap().insert(b"stale".to_vec(), None).unwrap();
            content.complete = true;
        }
        engine.queue_reindex(entry.id);
        let (release_tx, _release_rx) = mpsc::unbounded_channel();
        engine.sweep(&store, &release_tx);

        let attrs = entry.attr_lock.read().unwrap();
        assert!(!attrs.flags.contains(EntryFlags::NEEDS_REINDEX));
        let content = entry.content_lock.read().unwrap();
        assert_eq!(content.dirents.as_ref().unwrap().len_live(), 0);
        assert!(!content.complete);
    }
}
