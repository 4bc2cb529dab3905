//! The cache entry: a process-wide handle to a backend object.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use crate::vfs::{FileAttr, FileHandle, FileType, Vfs};

use super::dirent::DirentIndex;
use super::lru::LaneId;

/// Process-local, monotonically increasing identity used for LRU lane links
/// and weak dirent references. Never reused within a process lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

/// Backend-opaque identity of the object an entry wraps, used to key the
/// entry store. Two exports pointing at the same backend object yield the
/// same key, so they share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey(pub Vec<u8>);

impl EntryKey {
    pub fn from_handle(handle: &FileHandle) -> Self {
        EntryKey(handle.0.clone())
    }
}

bitflags::bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct EntryFlags: u32 {
        /// Never returned from lookup again, even if still refcounted.
        const UNREACHABLE = 0x1;
        /// Queued on the cleanup queue; the reaper owns it exclusively now.
        const IN_CLEANUP = 0x2;
        /// Directory's dirent index needs a full rebuild (collision overflow).
        const NEEDS_REINDEX = 0x4;
    }
}

/// Cached attributes plus the bookkeeping [`super::store::EntryStore`] and
/// [`super::export_map`] need under `attr_lock`.
pub struct AttrState {
    pub attr: FileAttr,
    pub fetched_at: Instant,
    pub flags: EntryFlags,
    pub exports: Vec<crate::export::ExportId>,
}

/// Directory-only bookkeeping kept under `content_lock`. Regular files carry
/// an empty `None` here; only directories populate the dirent index.
pub struct ContentState {
    pub dirents: Option<DirentIndex>,
    pub enumeration_epoch: u64,
    pub complete: bool,
}

impl ContentState {
    fn for_type(file_type: FileType) -> Self {
        ContentState {
            dirents: matches!(file_type, FileType::Directory).then(DirentIndex::new),
            enumeration_epoch: 0,
            complete: false,
        }
    }
}

/// NFS state (locks/delegations/shares) associated with the entry. Kept
/// minimal: the stacking facade in this crate does not yet issue NLM state,
/// but the lock exists so upcalls and future state owners have a documented
/// place to serialize against, per the global lock order.
#[derive(Default)]
pub struct StateState {
    pub delegation_recalled: bool,
}

/// The unit of cache: a refcounted, lock-guarded handle to one backend
/// object, reachable from the entry store by [`EntryKey`] and from LRU
/// lanes / dirent weak references by [`EntryId`].
pub struct Entry {
    pub id: EntryId,
    pub key: EntryKey,
    pub sub_handle: FileHandle,
    pub file_type: FileType,
    pub lane: LaneId,
    /// The sub-backend this entry's object lives behind, kept so the LRU
    /// reaper can notify it when the entry is reclaimed.
    pub(crate) backend: Arc<dyn Vfs>,

    pub(crate) attr_lock: RwLock<AttrState>,
    pub(crate) content_lock: RwLock<ContentState>,
    pub(crate) state_lock: Mutex<StateState>,

    refcount: AtomicU64,
    quick_flags: AtomicU32,
}

impl Entry {
    pub fn new(
        id: EntryId,
        key: EntryKey,
        sub_handle: FileHandle,
        attr: FileAttr,
        lane: LaneId,
        backend: Arc<dyn Vfs>,
    ) -> Self {
        let file_type = attr.file_type;
        Entry {
            id,
            key,
            sub_handle,
            file_type,
            lane,
            backend,
            attr_lock: RwLock::new(AttrState {
                attr,
                fetched_at: Instant::now(),
                flags: EntryFlags::empty(),
                exports: Vec::new(),
            }),
            content_lock: RwLock::new(ContentState::for_type(file_type)),
            state_lock: Mutex::new(StateState::default()),
            refcount: AtomicU64::new(0),
            quick_flags: AtomicU32::new(0),
        }
    }

    /// Increment the refcount; returns the value *after* incrementing.
    pub fn get_ref(&self) -> u64 {
        self.refcount.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Decrement the refcount; returns the value *after* decrementing.
    pub fn put_ref(&self) -> u64 {
        let prev = self.refcount.fetch_sub(1, Ordering::AcqRel);
        assert!(prev > 0, "entry refcount underflow");
        prev - 1
    }

    pub fn ref_count(&self) -> u64 {
        self.refcount.load(Ordering::Acquire)
    }

    pub fn is_unreachable(&self) -> bool {
        self.quick_flags.load(Ordering::Acquire) & EntryFlags::UNREACHABLE.bits() != 0
    }

    /// Mirror `attr_lock`'s unreachable bit onto a lock-free flag so hot-path
    /// reads (LRU walk, lookup) don't need to take `attr_lock` just to check it.
    pub(crate) fn set_unreachable_quick(&self, value: bool) {
        if value {
            self.quick_flags.fetch_or(EntryFlags::UNREACHABLE.bits(), Ordering::AcqRel);
        } else {
            self.quick_flags.fetch_and(!EntryFlags::UNREACHABLE.bits(), Ordering::AcqRel);
        }
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("file_type", &self.file_type)
            .field("refcount", &self.ref_count())
            .finish()
    }
}
