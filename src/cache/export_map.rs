//! Many-to-many association between cache entries and exports.
//!
//! An entry may be visible through several exports (the same backend
//! object re-exported under two export points); an export, symmetrically,
//! is associated with every entry it has ever handed out a handle for.
//! Removing the last association from an entry hands it to
//! [`super::lru::LruEngine::cleanup_try_push`], bypassing normal LRU age.

use std::sync::Arc;

use tracing::debug;

use crate::export::ExportId;

use super::entry::Entry;
use super::store::EntryStore;

/// Add an association between `entry` and `export`, taking `entry.attr_lock`
/// per the documented lock order.
pub fn associate(entry: &Arc<Entry>, export: ExportId) {
    let mut attrs = entry.attr_lock.write().expect("attr_lock poisoned");
    if !attrs.exports.contains(&export) {
        attrs.exports.push(export);
    }
}

/// Remove the association between `entry` and `export`. If this was the
/// entry's last export, push it onto the cleanup queue.
///
/// Lock order: `attr_lock` is taken and released before the LRU engine's
/// lane lock is touched by `cleanup_try_push`, matching the documented
/// global order (lane lock, then `attr_lock`) — never the reverse.
pub fn disassociate(store: &EntryStore, entry: &Arc<Entry>, export: ExportId) {
    let now_empty = {
        let mut attrs = entry.attr_lock.write().expect("attr_lock poisoned");
        attrs.exports.retain(|&e| e != export);
        attrs.exports.is_empty()
    };
    if now_empty {
        debug!(entry = entry.id.0, export = export.0, "last export removed, queuing cleanup");
        store.mark_unreachable(entry);
    }
}

/// Drive a full unexport: called with every entry the export map has on
/// record for `export`. The caller (the export registry) is responsible
/// for enumerating those entries and holding a ref across the call, which
/// `disassociate` itself does not take — it only releases the association,
/// it does not pin the entry.
pub fn unexport_all(store: &EntryStore, entries: &[Arc<Entry>], export: ExportId) {
    for entry in entries {
        disassociate(store, entry, export);
    }
}
