//! Test-only fixtures shared by this module's unit tests.
#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;

use crate::vfs::*;

/// A [`Vfs`] that exists only to give `Entry`/`EntryStore` tests a concrete
/// backend to hold, never actually called through.
pub(crate) struct NullBackend;

#[async_trait]
impl Vfs for NullBackend {
    async fn get_attr(&self, _handle: &FileHandle) -> VfsResult<FileAttr> {
        unimplemented!("NullBackend is a type fixture, not a callable backend")
    }

    async fn set_attr(
        &self,
        _handle: &FileHandle,
        _attr: SetAttr,
        _guard: SetAttrGuard,
    ) -> VfsResult<WccData> {
        unimplemented!()
    }

    async fn lookup(&self, _parent: &FileHandle, _name: &FileName) -> VfsResult<LookupResult> {
        unimplemented!()
    }

    async fn access(&self, _handle: &FileHandle, _mask: AccessMask) -> VfsResult<AccessResult> {
        unimplemented!()
    }

    async fn read_link(
        &self,
        _handle: &FileHandle,
    ) -> VfsResult<(SymlinkTarget, Option<FileAttr>)> {
        unimplemented!()
    }

    async fn read(&self, _handle: &FileHandle, _offset: u64, _count: u32) -> VfsResult<ReadResult> {
        unimplemented!()
    }

    async fn write(
        &self,
        _handle: &FileHandle,
        _offset: u64,
        _data: &[u8],
        _mode: WriteMode,
    ) -> VfsResult<WriteResult> {
        unimplemented!()
    }

    async fn create(
        &self,
        _parent: &FileHandle,
        _name: &FileName,
        _mode: CreateMode,
    ) -> VfsResult<CreatedNode> {
        unimplemented!()
    }

    async fn make_dir(
        &self,
        _parent: &FileHandle,
        _name: &FileName,
        _attr: SetAttr,
    ) -> VfsResult<CreatedNode> {
        unimplemented!()
    }

    async fn make_symlink(
        &self,
        _parent: &FileHandle,
        _name: &FileName,
        _target: &SymlinkTarget,
        _attr: SetAttr,
    ) -> VfsResult<CreatedNode> {
        unimplemented!()
    }

    async fn make_node(
        &self,
        _parent: &FileHandle,
        _name: &FileName,
        _node: SpecialNode,
    ) -> VfsResult<CreatedNode> {
        unimplemented!()
    }

    async fn remove(&self, _parent: &FileHandle, _name: &FileName) -> VfsResult<RemovalResult> {
        unimplemented!()
    }

    async fn remove_dir(&self, _parent: &FileHandle, _name: &FileName) -> VfsResult<RemovalResult> {
        unimplemented!()
    }

    async fn rename(
        &self,
        _from_parent: &FileHandle,
        _from_name: &FileName,
        _to_parent: &FileHandle,
        _to_name: &FileName,
    ) -> VfsResult<RenameResult> {
        unimplemented!()
    }

    async fn link(
        &self,
        _source: &FileHandle,
        _new_parent: &FileHandle,
        _new_name: &FileName,
    ) -> VfsResult<LinkResult> {
        unimplemented!()
    }

    async fn read_dir(
        &self,
        _handle: &FileHandle,
        _cookie: DirectoryCookie,
        _verifier: CookieVerifier,
        _max_bytes: u32,
    ) -> VfsResult<ReadDirResult> {
        unimplemented!()
    }

    async fn read_dir_plus(
        &self,
        _handle: &FileHandle,
        _cookie: DirectoryCookie,
        _verifier: CookieVerifier,
        _max_bytes: u32,
        _max_handles: u32,
    ) -> VfsResult<ReadDirPlusResult> {
        unimplemented!()
    }

    async fn fs_stat(&self, _handle: &FileHandle) -> VfsResult<FsStat> {
        unimplemented!()
    }

    async fn fs_info(&self, _handle: &FileHandle) -> VfsResult<FsInfo> {
        unimplemented!()
    }

    async fn path_conf(&self, _handle: &FileHandle) -> VfsResult<PathConfig> {
        unimplemented!()
    }

    async fn commit(
        &self,
        _handle: &FileHandle,
        _offset: u64,
        _count: u32,
    ) -> VfsResult<CommitResult> {
        unimplemented!()
    }
}

pub(crate) fn null_backend() -> Arc<dyn Vfs> {
    Arc::new(NullBackend)
}
