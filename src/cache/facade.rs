//! The stacking facade: a [`Vfs`] implementation that sits in front of a
//! sub-backend and answers from the entry store and dirent index whenever
//! it safely can, falling through to the backend otherwise.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::export::ExportId;
use crate::vfs::{
    AccessMask, AccessResult, CommitResult, CreateMode, CreatedNode, DirectoryCookie, FileAttr,
    FileHandle, FileName, FsInfo, FsStat, LinkResult, LookupResult, NfsError, PathConfig,
    ReadDirPlusResult, ReadDirResult, ReadResult, RemovalResult, RenameResult, SetAttr,
    SetAttrGuard, SpecialNode, StableVerifier, SymlinkTarget, Vfs, VfsResult, WccData, WriteMode,
    WriteResult,
};

use super::entry::{Entry, EntryFlags, EntryKey};
use super::error::MdCacheError;
use super::export_map;
use super::store::GetOutcome;
use super::CacheContext;

thread_local! {
    static JITTER_STATE: Cell<u64> = Cell::new(0);
}

/// Sample a uniform value in `[0, max)`, using a cheap thread-local xorshift
/// generator rather than pulling in an RNG crate for one call site.
fn jitter_sample(max: Duration) -> Duration {
    if max.is_zero() {
        return Duration::ZERO;
    }
    JITTER_STATE.with(|cell| {
        let mut x = cell.get();
        if x == 0 {
            x = (cell as *const Cell<u64> as u64) | 1;
        }
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        cell.set(x);
        let frac = (x >> 11) as f64 / (1u64 << 53) as f64;
        Duration::from_secs_f64(max.as_secs_f64() * frac)
    })
}

/// Wraps one sub-backend behind the cache, serving a single export.
pub struct CacheFacade {
    ctx: Arc<CacheContext>,
    backend: Arc<dyn Vfs>,
    export: ExportId,
    accepting: AtomicBool,
    inflight: AtomicU64,
}

impl CacheFacade {
    pub fn new(ctx: Arc<CacheContext>, backend: Arc<dyn Vfs>, export: ExportId) -> Arc<Self> {
        Arc::new(CacheFacade {
            ctx,
            backend,
            export,
            accepting: AtomicBool::new(true),
            inflight: AtomicU64::new(0),
        })
    }

    fn begin_op(&self) -> Result<(), MdCacheError> {
        if !self.accepting.load(Ordering::Acquire) {
            return Err(MdCacheError::Shutdown);
        }
        self.inflight.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn end_op(&self) {
        self.inflight.fetch_sub(1, Ordering::AcqRel);
    }

    pub fn export_id(&self) -> ExportId {
        self.export
    }

    /// Stage 1 of orderly shutdown: stop admitting new operations. Already
    /// in-flight operations are unaffected; see [`Self::drain`].
    pub fn stop_accepting(&self) {
        self.accepting.store(false, Ordering::Release);
    }

    fn inflight_count(&self) -> u64 {
        self.inflight.load(Ordering::Acquire)
    }

    /// Poll until every in-flight operation finishes or `timeout` elapses.
    /// Returns `false` if operations were still outstanding at the deadline,
    /// the signal for the caller to fall back to the disorderly path.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.inflight_count() == 0 {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Stage 6 of orderly shutdown: release every cache association this
    /// facade's export holds, handing the affected entries to the cleanup
    /// queue ahead of their normal LRU age. Also usable standalone as an
    /// admin unexport.
    pub fn unexport(&self) {
        let entries = self.ctx.store.entries_for_export(self.export);
        export_map::unexport_all(&self.ctx.store, &entries, self.export);
        for entry in entries {
            self.ctx.store.put(&entry);
        }
    }

    fn is_fresh(&self, fetched_at: Instant) -> bool {
        let ttl = self.ctx.config.attr_ttl() + jitter_sample(self.ctx.config.attr_ttl_jitter());
        fetched_at.elapsed() < ttl
    }

    fn find(&self, handle: &FileHandle) -> Option<Arc<Entry>> {
        match self.ctx.store.get(&EntryKey::from_handle(handle)) {
            GetOutcome::Found(entry) => Some(entry),
            GetOutcome::Stale | GetOutcome::NotPresent => None,
        }
    }

    fn observe(&self, handle: &FileHandle, attr: &FileAttr) -> Arc<Entry> {
        let key = EntryKey::from_handle(handle);
        let entry = self.ctx.store.get_or_create(key, handle.clone(), Arc::clone(&self.backend), || {
            attr.clone()
        });
        {
            let mut attrs = entry.attr_lock.write().expect("attr_lock poisoned");
            attrs.attr = attr.clone();
            attrs.fetched_at = Instant::now();
        }
        export_map::associate(&entry, self.export);
        self.ctx.lru.touch(&entry);
        self.ctx.store.put(&entry);
        entry
    }

    /// Forget everything cached about `handle`: the next read of it goes to
    /// the backend. Called after any operation that mutates attributes.
    fn invalidate_attr(&self, handle: &FileHandle) {
        if let Some(entry) = self.find(handle) {
            {
                let mut attrs = entry.attr_lock.write().expect("attr_lock poisoned");
                attrs.fetched_at = Instant::now() - self.ctx.config.attr_ttl() * 2;
            }
            self.ctx.store.put(&entry);
        }
    }

    /// Mark a directory's cached listing stale after a structural change.
    fn invalidate_dirent(&self, parent: &FileHandle, name: &FileName) {
        if let Some(entry) = self.find(parent) {
            let mut content = entry.content_lock.write().expect("content_lock poisoned");
            if let Some(dirents) = content.dirents.as_mut() {
                if let Some(slot) = dirents.lookup_by_name(name.0.as_bytes()).map(|d| d.slot) {
                    dirents.set_deleted(slot);
                }
                content.complete = false;
            }
            drop(content);
            self.ctx.store.put(&entry);
        }
    }

    async fn cached_get_attr(&self, handle: &FileHandle) -> VfsResult<FileAttr> {
        if let Some(entry) = self.find(handle) {
            self.ctx.lru.touch(&entry);
            let cached = {
                let attrs = entry.attr_lock.read().expect("attr_lock poisoned");
                self.is_fresh(attrs.fetched_at).then(|| attrs.attr.clone())
            };
            if let Some(attr) = cached {
                trace!(handle = ?handle.0, "attr cache hit");
                self.ctx.store.put(&entry);
                return Ok(attr);
            }
            let attr = self.backend.get_attr(handle).await?;
            {
                let mut attrs = entry.attr_lock.write().expect("attr_lock poisoned");
                attrs.attr = attr.clone();
                attrs.fetched_at = Instant::now();
            }
            self.ctx.store.put(&entry);
            return Ok(attr);
        }

        let attr = self.backend.get_attr(handle).await?;
        self.observe(handle, &attr);
        Ok(attr)
    }
}

#[async_trait]
impl Vfs for CacheFacade {
    async fn null(&self) -> VfsResult<()> {
        self.backend.null().await
    }

    async fn get_attr(&self, handle: &FileHandle) -> VfsResult<FileAttr> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.cached_get_attr(handle).await;
        self.end_op();
        result
    }

    async fn set_attr(
        &self,
        handle: &FileHandle,
        attr: SetAttr,
        guard: SetAttrGuard,
    ) -> VfsResult<WccData> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.set_attr(handle, attr, guard).await;
        if let Ok(wcc) = &result {
            if let Some(after) = &wcc.after {
                self.observe(handle, after);
            } else {
                self.invalidate_attr(handle);
            }
        }
        self.end_op();
        result
    }

    async fn lookup(&self, parent: &FileHandle, name: &FileName) -> VfsResult<LookupResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.lookup_inner(parent, name).await;
        self.end_op();
        result
    }

    async fn access(&self, handle: &FileHandle, mask: AccessMask) -> VfsResult<AccessResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.access(handle, mask).await;
        if let Ok(res) = &result {
            if let Some(attr) = &res.file_attr {
                self.observe(handle, attr);
            }
        }
        self.end_op();
        result
    }

    async fn read_link(&self, handle: &FileHandle) -> VfsResult<(SymlinkTarget, Option<FileAttr>)> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.read_link(handle).await;
        self.end_op();
        result
    }

    async fn read(&self, handle: &FileHandle, offset: u64, count: u32) -> VfsResult<ReadResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.read(handle, offset, count).await;
        if let Ok(res) = &result {
            if let Some(attr) = &res.file_attr {
                self.observe(handle, attr);
            }
        }
        self.end_op();
        result
    }

    async fn write(
        &self,
        handle: &FileHandle,
        offset: u64,
        data: &[u8],
        mode: WriteMode,
    ) -> VfsResult<WriteResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.write(handle, offset, data, mode).await;
        if let Ok(res) = &result {
            if let Some(attr) = &res.file_attr {
                self.observe(handle, attr);
            } else {
                self.invalidate_attr(handle);
            }
        }
        self.end_op();
        result
    }

    async fn create(
        &self,
        parent: &FileHandle,
        name: &FileName,
        mode: CreateMode,
    ) -> VfsResult<CreatedNode> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.create(parent, name, mode).await;
        if let Ok(created) = &result {
            self.observe(&created.handle, &created.attr);
            self.invalidate_dirent(parent, name);
        }
        self.end_op();
        result
    }

    async fn make_dir(
        &self,
        parent: &FileHandle,
        name: &FileName,
        attr: SetAttr,
    ) -> VfsResult<CreatedNode> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.make_dir(parent, name, attr).await;
        if let Ok(created) = &result {
            self.observe(&created.handle, &created.attr);
            self.invalidate_dirent(parent, name);
        }
        self.end_op();
        result
    }

    async fn make_symlink(
        &self,
        parent: &FileHandle,
        name: &FileName,
        target: &SymlinkTarget,
        attr: SetAttr,
    ) -> VfsResult<CreatedNode> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.make_symlink(parent, name, target, attr).await;
        if let Ok(created) = &result {
            self.observe(&created.handle, &created.attr);
            self.invalidate_dirent(parent, name);
        }
        self.end_op();
        result
    }

    async fn make_node(
        &self,
        parent: &FileHandle,
        name: &FileName,
        node: SpecialNode,
    ) -> VfsResult<CreatedNode> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.make_node(parent, name, node).await;
        if let Ok(created) = &result {
            self.observe(&created.handle, &created.attr);
            self.invalidate_dirent(parent, name);
        }
        self.end_op();
        result
    }

    async fn remove(&self, parent: &FileHandle, name: &FileName) -> VfsResult<RemovalResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.remove(parent, name).await;
        if result.is_ok() {
            self.invalidate_dirent(parent, name);
        }
        self.end_op();
        result
    }

    async fn remove_dir(&self, parent: &FileHandle, name: &FileName) -> VfsResult<RemovalResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.remove_dir(parent, name).await;
        if result.is_ok() {
            self.invalidate_dirent(parent, name);
        }
        self.end_op();
        result
    }

    async fn rename(
        &self,
        from_parent: &FileHandle,
        from_name: &FileName,
        to_parent: &FileHandle,
        to_name: &FileName,
    ) -> VfsResult<RenameResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.rename(from_parent, from_name, to_parent, to_name).await;
        if result.is_ok() {
            // Lock order for the two parents: lower EntryId's content_lock first,
            // so a concurrent rename the other direction cannot deadlock.
            let mut parents = [(from_parent, from_name), (to_parent, to_name)];
            let ids = parents.map(|(h, _)| {
                self.find(h)
                    .map(|entry| {
                        let id = entry.id.0;
                        self.ctx.store.put(&entry);
                        id
                    })
                    .unwrap_or(u64::MAX)
            });
            if ids[0] > ids[1] {
                parents.swap(0, 1);
            }
            for (handle, name) in parents {
                self.invalidate_dirent(handle, name);
            }
        }
        self.end_op();
        result
    }

    async fn link(
        &self,
        source: &FileHandle,
        new_parent: &FileHandle,
        new_name: &FileName,
    ) -> VfsResult<LinkResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.link(source, new_parent, new_name).await;
        if let Ok(res) = &result {
            if let Some(attr) = &res.new_file_attr {
                self.observe(source, attr);
            }
            self.invalidate_dirent(new_parent, new_name);
        }
        self.end_op();
        result
    }

    async fn read_dir(
        &self,
        handle: &FileHandle,
        cookie: DirectoryCookie,
        verifier: crate::vfs::CookieVerifier,
        max_bytes: u32,
    ) -> VfsResult<ReadDirResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.read_dir(handle, cookie, verifier, max_bytes).await;
        if let Ok(res) = &result {
            if let Some(attr) = &res.directory_attr {
                self.observe(handle, attr);
            }
        }
        self.end_op();
        result
    }

    async fn read_dir_plus(
        &self,
        handle: &FileHandle,
        cookie: DirectoryCookie,
        verifier: crate::vfs::CookieVerifier,
        max_bytes: u32,
        max_handles: u32,
    ) -> VfsResult<ReadDirPlusResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result =
            self.backend.read_dir_plus(handle, cookie, verifier, max_bytes, max_handles).await;
        if let Ok(res) = &result {
            if let Some(attr) = &res.directory_attr {
                self.observe(handle, attr);
            }
            for child in &res.entries {
                if let (Some(child_handle), Some(attr)) = (&child.handle, &child.attr) {
                    self.observe(child_handle, attr);
                }
            }
        }
        self.end_op();
        result
    }

    async fn fs_stat(&self, handle: &FileHandle) -> VfsResult<FsStat> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.fs_stat(handle).await;
        self.end_op();
        result
    }

    async fn fs_info(&self, handle: &FileHandle) -> VfsResult<FsInfo> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.fs_info(handle).await;
        self.end_op();
        result
    }

    async fn path_conf(&self, handle: &FileHandle) -> VfsResult<PathConfig> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.path_conf(handle).await;
        self.end_op();
        result
    }

    async fn commit(&self, handle: &FileHandle, offset: u64, count: u32) -> VfsResult<CommitResult> {
        self.begin_op().map_err(NfsError::from)?;
        let result = self.backend.commit(handle, offset, count).await;
        self.end_op();
        result
    }
}

impl CacheFacade {
    async fn lookup_inner(&self, parent: &FileHandle, name: &FileName) -> VfsResult<LookupResult> {
        if let Some(parent_entry) = self.find(parent) {
            self.ctx.lru.touch(&parent_entry);
            let cached_child = {
                let content = parent_entry.content_lock.read().expect("content_lock poisoned");
                content
                    .dirents
                    .as_ref()
                    .and_then(|d| d.lookup_by_name(name.0.as_bytes()))
                    .and_then(|d| d.child)
            };
            if let Some(child_id) = cached_child {
                if let Some(child_entry) = self.ctx.store.get_by_id(child_id) {
                    let fresh = {
                        let attrs = child_entry.attr_lock.read().expect("attr_lock poisoned");
                        self.is_fresh(attrs.fetched_at).then(|| attrs.attr.clone())
                    };
                    if let Some(attr) = fresh {
                        debug!(parent = parent_entry.id.0, name = %name.0, "dirent cache hit");
                        self.ctx.lru.touch(&child_entry);
                        self.ctx.store.put(&parent_entry);
                        return Ok(LookupResult {
                            handle: child_entry.sub_handle.clone(),
                            object_attr: attr,
                            directory_attr: None,
                        });
                    }
                }
            }
            self.ctx.store.put(&parent_entry);
        }

        let result = self.backend.lookup(parent, name).await?;
        let child_entry = self.observe(&result.handle, &result.object_attr);
        if let Some(parent_entry) = self.find(parent) {
            let mut needs_reindex = false;
            {
                let mut content = parent_entry.content_lock.write().expect("content_lock poisoned");
                if let Some(dirents) = content.dirents.as_mut() {
                    if let Err(MdCacheError::TooManyCollisions) =
                        dirents.insert(name.0.as_bytes().to_vec(), Some(child_entry.id))
                    {
                        needs_reindex = true;
                    }
                }
            }
            if needs_reindex {
                debug!(
                    parent = parent_entry.id.0,
                    name = %name.0,
                    "dirent probe bound exhausted, queuing directory for reindex"
                );
                {
                    let mut attrs = parent_entry.attr_lock.write().expect("attr_lock poisoned");
                    attrs.flags.insert(EntryFlags::NEEDS_REINDEX);
                }
                self.ctx.lru.queue_reindex(parent_entry.id);
            }
            self.ctx.store.put(&parent_entry);
        }
        if let Some(dir_attr) = &result.directory_attr {
            self.observe(parent, dir_attr);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::config::CacheConfig;
    use crate::cache::dirent::DirentIndex;
    use crate::fs::LocalFs;

    fn facade(root: &std::path::Path) -> Arc<CacheFacade> {
        let ctx = CacheContext::new(CacheConfig::default());
        let backend: Arc<dyn Vfs> = Arc::new(LocalFs::new(root.to_path_buf()));
        CacheFacade::new(ctx, backend, ExportId(1))
    }

    #[tokio::test]
    async fn get_attr_is_served_from_cache_on_second_call() {
        let tmp = tempfile::tempdir().unwrap();
        let facade = facade(tmp.path());
        let root = {
            let local = LocalFs::new(tmp.path().to_path_buf());
            local.root_handle()
        };

        let first = facade.get_attr(&root).await.expect("first get_attr");
        let second = facade.get_attr(&root).await.expect("cached get_attr");
        assert_eq!(first, second);
        assert_eq!(facade.ctx.entry_count(), 1);
        facade.ctx.shutdown(&[]).await;
    }

    #[tokio::test]
    async fn lookup_hits_dirent_cache_on_second_call() {
        let tmp = tempfile::tempdir().unwrap();
        let facade = facade(tmp.path());
        std::fs::write(tmp.path().join("a.txt"), b"x").unwrap();
        let root = {
            let local = LocalFs::new(tmp.path().to_path_buf());
            local.root_handle()
        };
        let name = FileName("a.txt".into());

        // The first lookup populates the parent entry; the parent must
        // already be cached before a dirent insert can attach to it, so the
        // dirent itself isn't indexed until the second call. Only the third
        // call can be served purely from the dirent cache.
        let first = facade.lookup(&root, &name).await.expect("first lookup");
        let second = facade.lookup(&root, &name).await.expect("second lookup");
        let third = facade.lookup(&root, &name).await.expect("third lookup");
        assert_eq!(first.handle, second.handle);
        assert_eq!(second.handle, third.handle);
        assert!(third.directory_attr.is_none(), "third lookup should be a dirent cache hit");
        facade.ctx.shutdown(&[]).await;
    }

    #[tokio::test]
    async fn rename_does_not_leak_parent_refs() {
        let tmp = tempfile::tempdir().unwrap();
        let facade = facade(tmp.path());
        std::fs::write(tmp.path().join("a.txt"), b"x").unwrap();
        let root = {
            let local = LocalFs::new(tmp.path().to_path_buf());
            local.root_handle()
        };
        // Populate the entry store with the root directory entry.
        facade.lookup(&root, &FileName("a.txt".into())).await.unwrap();
        let entry = facade.find(&root).expect("root entry present");
        let before = entry.ref_count();
        facade.ctx.store.put(&entry);

        facade
            .rename(
                &root,
                &FileName("a.txt".into()),
                &root,
                &FileName("b.txt".into()),
            )
            .await
            .expect("rename ok");

        let entry = facade.find(&root).expect("root entry still present");
        let after = entry.ref_count();
        facade.ctx.store.put(&entry);
        assert_eq!(before, after, "rename must not leak a ref on the shared parent entry");
        facade.ctx.shutdown(&[]).await;
    }

    #[tokio::test]
    async fn unexport_marks_entries_unreachable() {
        let tmp = tempfile::tempdir().unwrap();
        let facade = facade(tmp.path());
        let root = {
            let local = LocalFs::new(tmp.path().to_path_buf());
            local.root_handle()
        };
        facade.get_attr(&root).await.expect("get_attr ok");
        let entry = facade.find(&root).expect("root entry present");
        assert!(!entry.is_unreachable());
        facade.ctx.store.put(&entry);

        facade.unexport();

        let entry = facade.find(&root).expect("root entry still in the store");
        assert!(entry.is_unreachable());
        facade.ctx.store.put(&entry);
        facade.ctx.shutdown(&[]).await;
    }

    #[tokio::test]
    async fn collision_overflow_queues_directory_for_reindex() {
        let tmp = tempfile::tempdir().unwrap();
        let facade = facade(tmp.path());
        let root = {
            let local = LocalFs::new(tmp.path().to_path_buf());
            local.root_handle()
        };
        facade.get_attr(&root).await.expect("get_attr ok");
        let entry = facade.find(&root).expect("root entry present");
        let name = b"fresh.txt".to_vec();
        let key = DirentIndex::hash_name_for_test(&name);
        {
            let mut content = entry.content_lock.write().unwrap();
            let dirents = content.dirents.as_mut().unwrap();
            // Occupy every slot the real insert(name, ..) will probe (the
            // same quadratic sequence: key + j + j*j), so it is forced to
            // exhaust MAX_PROBE and return TooManyCollisions.
            for j in 0..crate::cache::dirent::MAX_PROBE {
                let slot = key.wrapping_add(j).wrapping_add(j.wrapping_mul(j));
                let _ = dirents.insert_at_key(slot, format!("filler{j}").into_bytes());
            }
        }
        facade.ctx.store.put(&entry);

        std::fs::write(tmp.path().join("fresh.txt"), b"x").unwrap();
        let _ = facade.lookup(&root, &FileName("fresh.txt".into())).await;

        let entry = facade.find(&root).expect("root entry present");
        let reindex_queued = {
            let attrs = entry.attr_lock.read().unwrap();
            attrs.flags.contains(EntryFlags::NEEDS_REINDEX)
        };
        facade.ctx.store.put(&entry);
        assert!(reindex_queued, "probe overflow on insert should request a reindex");
        facade.ctx.shutdown(&[]).await;
    }
}
