//! NFS exports: the directory trees this server makes available to clients,
//! each backed by one [`crate::vfs::Vfs`] implementation.
//!
//! An export is the protocol-level unit the admin surface mounts and
//! unmounts; the metadata cache's [`crate::cache::export_map`] tracks which
//! cache entries are currently reachable through a given export so that
//! unexport can release them in bulk.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::vfs::Vfs;

/// Stable identifier for one export, assigned by whatever owns the export
/// table (the admin surface, or a config file at startup).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExportId(pub u32);

/// One exported directory tree.
pub struct Export {
    pub id: ExportId,
    pub root: PathBuf,
    pub backend: Arc<dyn Vfs>,
}

impl Export {
    pub fn new(id: ExportId, root: PathBuf, backend: Arc<dyn Vfs>) -> Self {
        Export { id, root, backend }
    }
}

/// Validate `dir` exists and is a directory before wrapping it in an export.
/// The caller supplies the [`Vfs`] backend; this function only checks the
/// path, mirroring the sanity check a real mount-time export table does.
pub fn make_export(id: ExportId, dir: &str, backend: Arc<dyn Vfs>) -> io::Result<Export> {
    let root = PathBuf::from(dir);
    let meta = std::fs::metadata(&root)?;
    if !meta.is_dir() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "export root is not a directory"));
    }
    Ok(Export::new(id, root, backend))
}
