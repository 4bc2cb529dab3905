//! NFS Metadata Cache: a stacking layer that sits between the RPC dispatch
//! path and a concrete [`crate::vfs::Vfs`] backend, caching attributes and
//! directory contents the way nfs-ganesha's FSAL_MDCACHE does.
//!
//! [`CacheContext`] owns the process-wide entry store and LRU engine;
//! [`facade::CacheFacade`] is the per-export [`crate::vfs::Vfs`] front door
//! that consults them, and [`upcall::UpcallHandler`] lets a backend push
//! invalidations back into the cache out of band.

pub mod config;
pub mod dirent;
pub mod entry;
pub mod error;
pub mod export_map;
pub mod facade;
pub mod lru;
pub mod store;
#[cfg(test)]
pub(crate) mod test_support;
pub mod upcall;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::vfs::{FileHandle, Vfs};

use self::config::CacheConfig;
use self::facade::CacheFacade;
use self::lru::LruEngine;
use self::store::EntryStore;

/// Process-wide cache state: the entry store, the LRU engine that reclaims
/// it, and the dedicated reaper thread sweeping both. One context is shared
/// by every [`facade::CacheFacade`] in the process, regardless of how many
/// exports stack over it.
pub struct CacheContext {
    pub(crate) config: CacheConfig,
    pub(crate) store: Arc<EntryStore>,
    pub(crate) lru: Arc<LruEngine>,
    reaper: Mutex<Option<thread::JoinHandle<()>>>,
    release_tx: Mutex<Option<mpsc::UnboundedSender<(Arc<dyn Vfs>, FileHandle)>>>,
    release_worker: Mutex<Option<tokio::task::JoinHandle<()>>>,
    grace_deadline: Mutex<Option<Instant>>,
    /// Cache of a uid's supplementary gids, for a future idmapper front end.
    /// Purely an admin-surface convenience: never consulted by the facade.
    gid_cache: moka::sync::Cache<u32, Arc<Vec<u32>>>,
    /// Cache of (netgroup, host) membership decisions; same rationale.
    netgroup_cache: moka::sync::Cache<(String, String), bool>,
}

impl CacheContext {
    pub fn new(config: CacheConfig) -> Arc<Self> {
        config.validate().expect("invalid cache configuration");
        let lru = LruEngine::new(config.lru_lanes);
        let store = EntryStore::new(Arc::clone(&lru));
        let (release_tx, release_rx) = mpsc::unbounded_channel();
        let ctx = Arc::new(CacheContext {
            config,
            store: Arc::clone(&store),
            lru: Arc::clone(&lru),
            reaper: Mutex::new(None),
            release_tx: Mutex::new(Some(release_tx.clone())),
            release_worker: Mutex::new(None),
            grace_deadline: Mutex::new(None),
            gid_cache: moka::sync::Cache::new(10_000),
            netgroup_cache: moka::sync::Cache::new(10_000),
        });
        let reaper = lru.spawn_reaper(store, config.reap_interval(), release_tx);
        *ctx.reaper.lock().expect("reaper handle poisoned") = Some(reaper);
        *ctx.release_worker.lock().expect("release worker poisoned") =
            Some(spawn_release_worker(release_rx));
        ctx
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// Run the orderly teardown sequence. Stages 1-4 (stop accepting, drain
    /// in-flight operations) are driven per-export through `facades`, since
    /// this single-process library has no separate listener/decoder stage
    /// to stop; stages 5-7 (stop the reaper, remove exports, release
    /// sub-backends) live here. Falls back to [`Self::emergency_cleanup`]
    /// if any facade fails to drain within its configured timeout.
    pub async fn shutdown(self: &Arc<Self>, facades: &[Arc<CacheFacade>]) {
        info!("metadata cache context shutting down");

        for facade in facades {
            facade.stop_accepting();
        }

        let mut orderly = true;
        for facade in facades {
            if !facade.drain(self.config.shutdown_stage_timeout()).await {
                warn!(export = facade.export_id().0, "facade drain timed out, going disorderly");
                orderly = false;
            }
        }

        for facade in facades {
            facade.unexport();
        }

        self.lru.request_shutdown();
        if let Some(handle) = self.reaper.lock().expect("reaper handle poisoned").take() {
            let _ = handle.join();
        }

        drop(self.release_tx.lock().expect("release_tx poisoned").take());
        if let Some(worker) = self.release_worker.lock().expect("release worker poisoned").take() {
            let _ = worker.await;
        }

        if !orderly {
            warn!("running emergency cleanup on the disorderly shutdown path");
            self.emergency_cleanup();
        }

        info!(orderly, "metadata cache context shutdown complete");
    }

    /// Disorderly-path teardown: force every remaining entry unreachable and
    /// drop it directly, without waiting on refcounts or taking any lock the
    /// entry itself might still be holding open. Used only when a shutdown
    /// stage times out (scenario S6).
    fn emergency_cleanup(&self) {
        for entry in self.store.all_entries() {
            self.store.mark_unreachable(&entry);
            self.lru.unlink(&entry);
            self.store.remove(&entry.key, entry.id);
            debug!(entry = entry.id.0, "emergency-cleaned cache entry");
        }
    }

    /// Whether the cache is currently within a reclaim grace period.
    pub fn get_grace(&self) -> bool {
        self.grace_deadline
            .lock()
            .expect("grace_deadline poisoned")
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Start (or restart) a grace period of `duration` from now.
    pub fn start_grace(&self, duration: Duration) {
        *self.grace_deadline.lock().expect("grace_deadline poisoned") =
            Some(Instant::now() + duration);
        info!(?duration, "grace period started");
    }

    /// Cache a uid's supplementary gids.
    pub fn cache_gids(&self, uid: u32, gids: Vec<u32>) {
        self.gid_cache.insert(uid, Arc::new(gids));
    }

    /// Look up a uid's cached supplementary gids, if present.
    pub fn cached_gids(&self, uid: u32) -> Option<Arc<Vec<u32>>> {
        self.gid_cache.get(&uid)
    }

    /// Drop every cached gid mapping. Exposed for a future admin surface to
    /// call after an identity-mapping change upstream.
    pub fn purge_gids(&self) {
        self.gid_cache.invalidate_all();
        debug!("gid mapping cache purged");
    }

    /// Cache a netgroup membership decision for (netgroup, host).
    pub fn cache_netgroup_membership(&self, netgroup: String, host: String, member: bool) {
        self.netgroup_cache.insert((netgroup, host), member);
    }

    /// Look up a cached netgroup membership decision, if present.
    pub fn cached_netgroup_membership(&self, netgroup: &str, host: &str) -> Option<bool> {
        self.netgroup_cache.get(&(netgroup.to_string(), host.to_string()))
    }

    /// Drop every cached netgroup membership decision. Same rationale as
    /// [`Self::purge_gids`].
    pub fn purge_netgroups(&self) {
        self.netgroup_cache.invalidate_all();
        debug!("netgroup membership cache purged");
    }
}

/// Drain reclaimed-entry release notifications and hand each one to its
/// sub-backend. A separate tokio task rather than folded into the reaper
/// thread, since `Vfs::release` is async and the reaper must never await.
fn spawn_release_worker(
    mut receiver: mpsc::UnboundedReceiver<(Arc<dyn Vfs>, FileHandle)>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some((backend, handle)) = receiver.recv().await {
            backend.release(&handle).await;
        }
        debug!("release worker drained and exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_context_starts_empty() {
        let ctx = CacheContext::new(CacheConfig::default());
        assert_eq!(ctx.entry_count(), 0);
        ctx.shutdown(&[]).await;
    }

    #[tokio::test]
    async fn grace_period_expires() {
        let ctx = CacheContext::new(CacheConfig::default());
        assert!(!ctx.get_grace());
        ctx.start_grace(Duration::from_millis(20));
        assert!(ctx.get_grace());
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!ctx.get_grace());
        ctx.shutdown(&[]).await;
    }

    #[tokio::test]
    async fn purge_gids_clears_cache() {
        let ctx = CacheContext::new(CacheConfig::default());
        ctx.cache_gids(1000, vec![100, 101]);
        assert!(ctx.cached_gids(1000).is_some());
        ctx.purge_gids();
        assert!(ctx.cached_gids(1000).is_none());
        ctx.shutdown(&[]).await;
    }
}
