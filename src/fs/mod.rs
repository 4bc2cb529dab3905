//! `LocalFs`: a disk-backed [`crate::vfs::Vfs`] sub-FSAL that maps every
//! NFS object handle onto a path under one root directory. This is the
//! backend the metadata cache stacks over in production; `demos/shadow_fs`
//! and `demos/in_memory` are the lighter fixtures used for protocol tests.

mod state;
mod utils;

use std::cmp;
use std::ffi::OsString;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::task;

use crate::vfs::{self, Vfs};

use state::{State, ROOT_ID};
use utils::{
    apply_setattr, digest_from_attr, join_child, map_io_error, metadata_to_attr,
    name_to_file_name,
};

const ENTRY_ESTIMATE_BYTES: u32 = 64;

pub struct LocalFs {
    root: PathBuf,
    state: Mutex<State>,
    verifier: vfs::StableVerifier,
}

impl LocalFs {
    pub fn new(root: PathBuf) -> Self {
        let canonical = root.canonicalize().unwrap_or(root);
        let seed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos() as u64;
        LocalFs {
            root: canonical,
            state: Mutex::new(State::new()),
            verifier: vfs::StableVerifier(seed.to_le_bytes()),
        }
    }

    pub fn root_handle(&self) -> vfs::FileHandle {
        Self::encode_handle(ROOT_ID)
    }

    fn encode_handle(id: u64) -> vfs::FileHandle {
        vfs::FileHandle(id.to_le_bytes().to_vec())
    }

    fn decode_handle(handle: &vfs::FileHandle) -> vfs::VfsResult<u64> {
        let buf: [u8; 8] = handle.0.as_slice().try_into().map_err(|_| vfs::NfsError::BadHandle)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn full_path(&self, rel: &Path) -> PathBuf {
        if rel.as_os_str().is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    fn rel_path(&self, id: u64) -> vfs::VfsResult<PathBuf> {
        self.state.lock().expect("fs state poisoned").rel_path(id).ok_or(vfs::NfsError::Stale)
    }

    fn rel_path_from_handle(&self, handle: &vfs::FileHandle) -> vfs::VfsResult<PathBuf> {
        self.rel_path(Self::decode_handle(handle)?)
    }

    fn ensure_id(&self, rel: PathBuf) -> u64 {
        self.state.lock().expect("fs state poisoned").ensure_id(rel)
    }

    fn remove_subtree(&self, rel: &Path) {
        self.state.lock().expect("fs state poisoned").remove_subtree(rel);
    }

    fn rename_subtree(&self, old: &Path, new: PathBuf) {
        let mut state = self.state.lock().expect("fs state poisoned");
        state.remove_subtree(&new);
        state.rename_subtree(old, new);
    }

    async fn metadata_for_rel(&self, rel: &Path) -> vfs::VfsResult<std::fs::Metadata> {
        fs::symlink_metadata(self.full_path(rel)).await.map_err(map_io_error)
    }

    fn cookie_verifier(&self) -> vfs::CookieVerifier {
        vfs::CookieVerifier(self.verifier.0)
    }

    fn verify_cookie(&self, provided: vfs::CookieVerifier) -> vfs::VfsResult<()> {
        if provided.0 == [0; 8] || provided == self.cookie_verifier() {
            Ok(())
        } else {
            Err(vfs::NfsError::BadCookie)
        }
    }
}

#[async_trait]
impl Vfs for LocalFs {
    async fn get_attr(&self, handle: &vfs::FileHandle) -> vfs::VfsResult<vfs::FileAttr> {
        let id = Self::decode_handle(handle)?;
        let rel = self.rel_path(id)?;
        let meta = self.metadata_for_rel(&rel).await?;
        Ok(metadata_to_attr(&meta, id))
    }

    async fn set_attr(
        &self,
        handle: &vfs::FileHandle,
        attr: vfs::SetAttr,
        guard: vfs::SetAttrGuard,
    ) -> vfs::VfsResult<vfs::WccData> {
        let id = Self::decode_handle(handle)?;
        let rel = self.rel_path(id)?;
        let abs = self.full_path(&rel);
        let before_meta = self.metadata_for_rel(&rel).await?;
        let before_attr = metadata_to_attr(&before_meta, id);

        if let vfs::SetAttrGuard::Check { ctime } = guard {
            if before_attr.ctime != ctime {
                return Err(vfs::NfsError::NotSync);
            }
        }

        apply_setattr(&abs, &attr).await?;

        let after_meta = self.metadata_for_rel(&rel).await?;
        Ok(vfs::WccData {
            before: Some(digest_from_attr(&before_attr)),
            after: Some(metadata_to_attr(&after_meta, id)),
        })
    }

    async fn lookup(
        &self,
        parent: &vfs::FileHandle,
        name: &vfs::FileName,
    ) -> vfs::VfsResult<vfs::LookupResult> {
        let parent_id = Self::decode_handle(parent)?;
        let parent_rel = self.rel_path(parent_id)?;
        let child_rel = join_child(&parent_rel, &OsString::from(&name.0))?;
        let meta = self.metadata_for_rel(&child_rel).await?;
        let fileid = self.ensure_id(child_rel);
        let dir_meta = self.metadata_for_rel(&parent_rel).await?;
        Ok(vfs::LookupResult {
            handle: Self::encode_handle(fileid),
            object_attr: metadata_to_attr(&meta, fileid),
            directory_attr: Some(metadata_to_attr(&dir_meta, parent_id)),
        })
    }

    async fn access(
        &self,
        handle: &vfs::FileHandle,
        mask: vfs::AccessMask,
    ) -> vfs::VfsResult<vfs::AccessResult> {
        let id = Self::decode_handle(handle)?;
        let rel = self.rel_path(id)?;
        let meta = self.metadata_for_rel(&rel).await?;
        let mode = meta.permissions().mode();
        let is_dir = meta.is_dir();

        let mut granted = vfs::AccessMask::empty();
        let has_read = mode & 0o444 != 0;
        let has_write = mode & 0o222 != 0;
        let has_exec = mode & 0o111 != 0;

        if mask.contains(vfs::AccessMask::READ) && (has_read || is_dir) {
            granted.insert(vfs::AccessMask::READ);
        }
        if mask.contains(vfs::AccessMask::LOOKUP) && is_dir && has_exec {
            granted.insert(vfs::AccessMask::LOOKUP);
        }
        if mask.contains(vfs::AccessMask::MODIFY) && has_write {
            granted.insert(vfs::AccessMask::MODIFY);
        }
        if mask.contains(vfs::AccessMask::EXTEND) && has_write {
            granted.insert(vfs::AccessMask::EXTEND);
        }
        if mask.contains(vfs::AccessMask::EXECUTE) && has_exec {
            granted.insert(vfs::AccessMask::EXECUTE);
        }
        if mask.contains(vfs::AccessMask::DELETE) {
            let parent_rel = rel.parent().map(Path::to_path_buf).unwrap_or_default();
            if let Ok(parent_meta) = self.metadata_for_rel(&parent_rel).await {
                if parent_meta.permissions().mode() & 0o300 != 0 {
                    granted.insert(vfs::AccessMask::DELETE);
                }
            }
        }

        Ok(vfs::AccessResult { granted, file_attr: Some(metadata_to_attr(&meta, id)) })
    }

    async fn read_link(
        &self,
        handle: &vfs::FileHandle,
    ) -> vfs::VfsResult<(vfs::SymlinkTarget, Option<vfs::FileAttr>)> {
        let id = Self::decode_handle(handle)?;
        let rel = self.rel_path(id)?;
        let target = fs::read_link(self.full_path(&rel)).await.map_err(map_io_error)?;
        let attr = self.metadata_for_rel(&rel).await.ok().map(|meta| metadata_to_attr(&meta, id));
        Ok((vfs::SymlinkTarget(target.to_string_lossy().into_owned()), attr))
    }

    async fn read(
        &self,
        handle: &vfs::FileHandle,
        offset: u64,
        count: u32,
    ) -> vfs::VfsResult<vfs::ReadResult> {
        let id = Self::decode_handle(handle)?;
        let rel = self.rel_path(id)?;
        let abs = self.full_path(&rel);
        let meta = fs::metadata(&abs).await.map_err(map_io_error)?;
        let size = meta.len();
        let to_read = if offset >= size { 0 } else { cmp::min(count as u64, size - offset) as usize };

        let mut data = vec![0u8; to_read];
        if to_read > 0 {
            let mut file = File::open(&abs).await.map_err(map_io_error)?;
            file.seek(io::SeekFrom::Start(offset)).await.map_err(map_io_error)?;
            file.read_exact(&mut data).await.map_err(map_io_error)?;
        }

        Ok(vfs::ReadResult { data, file_attr: Some(metadata_to_attr(&meta, id)) })
    }

    async fn write(
        &self,
        handle: &vfs::FileHandle,
        offset: u64,
        data: &[u8],
        mode: vfs::WriteMode,
    ) -> vfs::VfsResult<vfs::WriteResult> {
        let id = Self::decode_handle(handle)?;
        let rel = self.rel_path(id)?;
        let abs = self.full_path(&rel);
        let mut file = OpenOptions::new().write(true).open(&abs).await.map_err(map_io_error)?;
        file.seek(io::SeekFrom::Start(offset)).await.map_err(map_io_error)?;
        file.write_all(data).await.map_err(map_io_error)?;
        file.flush().await.map_err(map_io_error)?;
        match mode {
            vfs::WriteMode::Unstable => {}
            vfs::WriteMode::DataSync => file.sync_data().await.map_err(map_io_error)?,
            vfs::WriteMode::FileSync => file.sync_all().await.map_err(map_io_error)?,
        }

        let meta = fs::metadata(&abs).await.map_err(map_io_error)?;
        Ok(vfs::WriteResult {
            count: data.len() as u32,
            committed: mode,
            verifier: self.verifier,
            file_attr: Some(metadata_to_attr(&meta, id)),
        })
    }

    async fn create(
        &self,
        parent: &vfs::FileHandle,
        name: &vfs::FileName,
        mode: vfs::CreateMode,
    ) -> vfs::VfsResult<vfs::CreatedNode> {
        let parent_rel = self.rel_path_from_handle(parent)?;
        let child_rel = join_child(&parent_rel, &OsString::from(&name.0))?;
        let abs = self.full_path(&child_rel);

        let exists = fs::symlink_metadata(&abs).await.is_ok();
        if matches!(mode, vfs::CreateMode::Exclusive { .. } | vfs::CreateMode::Guarded { .. })
            && exists
        {
            return Err(vfs::NfsError::Exist);
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true);
        if matches!(mode, vfs::CreateMode::Exclusive { .. }) {
            options.create_new(true);
        }
        options.open(&abs).await.map_err(map_io_error)?;

        if let vfs::CreateMode::Unchecked { attr } | vfs::CreateMode::Guarded { attr, .. } = mode {
            let _ = apply_setattr(&abs, &attr).await;
        }

        let meta = fs::symlink_metadata(&abs).await.map_err(map_io_error)?;
        let fileid = self.ensure_id(child_rel);
        Ok(vfs::CreatedNode {
            handle: Self::encode_handle(fileid),
            attr: metadata_to_attr(&meta, fileid),
            directory_wcc: vfs::WccData { before: None, after: None },
        })
    }

    async fn make_dir(
        &self,
        parent: &vfs::FileHandle,
        name: &vfs::FileName,
        attr: vfs::SetAttr,
    ) -> vfs::VfsResult<vfs::CreatedNode> {
        let parent_rel = self.rel_path_from_handle(parent)?;
        let child_rel = join_child(&parent_rel, &OsString::from(&name.0))?;
        let abs = self.full_path(&child_rel);
        fs::create_dir(&abs).await.map_err(map_io_error)?;
        if let Some(mode) = attr.mode {
            let path = abs.clone();
            task::spawn_blocking(move || {
                std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
            })
            .await
            .map_err(|_| vfs::NfsError::ServerFault)?
            .map_err(map_io_error)?;
        }
        let meta = fs::symlink_metadata(&abs).await.map_err(map_io_error)?;
        let fileid = self.ensure_id(child_rel);
        Ok(vfs::CreatedNode {
            handle: Self::encode_handle(fileid),
            attr: metadata_to_attr(&meta, fileid),
            directory_wcc: vfs::WccData { before: None, after: None },
        })
    }

    async fn make_symlink(
        &self,
        parent: &vfs::FileHandle,
        name: &vfs::FileName,
        target: &vfs::SymlinkTarget,
        attr: vfs::SetAttr,
    ) -> vfs::VfsResult<vfs::CreatedNode> {
        if attr.size.is_some() {
            return Err(vfs::NfsError::NotSupp);
        }
        let parent_rel = self.rel_path_from_handle(parent)?;
        let child_rel = join_child(&parent_rel, &OsString::from(&name.0))?;
        let abs = self.full_path(&child_rel);
        let target_path = target.0.clone();
        let path_clone = abs.clone();
        task::spawn_blocking(move || std::os::unix::fs::symlink(&target_path, &path_clone))
            .await
            .map_err(|_| vfs::NfsError::ServerFault)?
            .map_err(map_io_error)?;

        let meta = fs::symlink_metadata(&abs).await.map_err(map_io_error)?;
        let fileid = self.ensure_id(child_rel);
        Ok(vfs::CreatedNode {
            handle: Self::encode_handle(fileid),
            attr: metadata_to_attr(&meta, fileid),
            directory_wcc: vfs::WccData { before: None, after: None },
        })
    }

    async fn make_node(
        &self,
        _parent: &vfs::FileHandle,
        _name: &vfs::FileName,
        _node: vfs::SpecialNode,
    ) -> vfs::VfsResult<vfs::CreatedNode> {
        Err(vfs::NfsError::NotSupp)
    }

    async fn remove(
        &self,
        parent: &vfs::FileHandle,
        name: &vfs::FileName,
    ) -> vfs::VfsResult<vfs::RemovalResult> {
        let parent_rel = self.rel_path_from_handle(parent)?;
        let child_rel = join_child(&parent_rel, &OsString::from(&name.0))?;
        let abs = self.full_path(&child_rel);
        let meta = fs::symlink_metadata(&abs).await.map_err(map_io_error)?;
        if meta.is_dir() {
            return Err(vfs::NfsError::IsDir);
        }
        fs::remove_file(&abs).await.map_err(map_io_error)?;
        self.remove_subtree(&child_rel);
        Ok(vfs::RemovalResult { directory_wcc: vfs::WccData { before: None, after: None } })
    }

    async fn remove_dir(
        &self,
        parent: &vfs::FileHandle,
        name: &vfs::FileName,
    ) -> vfs::VfsResult<vfs::RemovalResult> {
        let parent_rel = self.rel_path_from_handle(parent)?;
        let child_rel = join_child(&parent_rel, &OsString::from(&name.0))?;
        fs::remove_dir(self.full_path(&child_rel)).await.map_err(map_io_error)?;
        self.remove_subtree(&child_rel);
        Ok(vfs::RemovalResult { directory_wcc: vfs::WccData { before: None, after: None } })
    }

    async fn rename(
        &self,
        from_parent: &vfs::FileHandle,
        from_name: &vfs::FileName,
        to_parent: &vfs::FileHandle,
        to_name: &vfs::FileName,
    ) -> vfs::VfsResult<vfs::RenameResult> {
        let from_parent_rel = self.rel_path_from_handle(from_parent)?;
        let to_parent_rel = self.rel_path_from_handle(to_parent)?;
        let from_rel = join_child(&from_parent_rel, &OsString::from(&from_name.0))?;
        let to_rel = join_child(&to_parent_rel, &OsString::from(&to_name.0))?;

        fs::rename(self.full_path(&from_rel), self.full_path(&to_rel)).await.map_err(map_io_error)?;
        self.rename_subtree(&from_rel, to_rel);

        Ok(vfs::RenameResult {
            from_directory_wcc: vfs::WccData { before: None, after: None },
            to_directory_wcc: vfs::WccData { before: None, after: None },
        })
    }

    async fn link(
        &self,
        source: &vfs::FileHandle,
        new_parent: &vfs::FileHandle,
        new_name: &vfs::FileName,
    ) -> vfs::VfsResult<vfs::LinkResult> {
        let src_rel = self.rel_path_from_handle(source)?;
        let dst_parent_rel = self.rel_path_from_handle(new_parent)?;
        let dst_rel = join_child(&dst_parent_rel, &OsString::from(&new_name.0))?;
        fs::hard_link(self.full_path(&src_rel), self.full_path(&dst_rel))
            .await
            .map_err(map_io_error)?;
        let fileid = self.ensure_id(dst_rel.clone());
        let meta = self.metadata_for_rel(&dst_rel).await?;
        Ok(vfs::LinkResult {
            new_file_attr: Some(metadata_to_attr(&meta, fileid)),
            directory_wcc: vfs::WccData { before: None, after: None },
        })
    }

    async fn read_dir(
        &self,
        handle: &vfs::FileHandle,
        cookie: vfs::DirectoryCookie,
        verifier: vfs::CookieVerifier,
        max_bytes: u32,
    ) -> vfs::VfsResult<vfs::ReadDirResult> {
        if cookie.0 != 0 {
            self.verify_cookie(verifier)?;
        }
        let rel = self.rel_path_from_handle(handle)?;
        let dir_attr = self.get_attr(handle).await.ok();

        let mut reader = fs::read_dir(self.full_path(&rel)).await.map_err(map_io_error)?;
        let mut names = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(map_io_error)? {
            names.push(entry.file_name());
        }
        names.sort_by_key(|n| n.to_string_lossy().into_owned());

        let budget =
            if max_bytes == 0 { usize::MAX } else { cmp::max(1, (max_bytes / ENTRY_ESTIMATE_BYTES) as usize) };
        let mut remaining = budget;
        let mut entries = Vec::new();
        for name in names {
            if remaining == 0 {
                break;
            }
            let child_rel = join_child(&rel, &name)?;
            let id = self.ensure_id(child_rel);
            if cookie.0 != 0 && id <= cookie.0 {
                continue;
            }
            entries.push(vfs::DirectoryEntry {
                cookie: vfs::DirectoryCookie(id),
                name: name_to_file_name(&name),
                fileid: id,
            });
            remaining -= 1;
        }

        Ok(vfs::ReadDirResult {
            directory_attr: dir_attr,
            cookie_verifier: self.cookie_verifier(),
            entries,
        })
    }

    async fn read_dir_plus(
        &self,
        handle: &vfs::FileHandle,
        cookie: vfs::DirectoryCookie,
        verifier: vfs::CookieVerifier,
        max_bytes: u32,
        max_handles: u32,
    ) -> vfs::VfsResult<vfs::ReadDirPlusResult> {
        if cookie.0 != 0 {
            self.verify_cookie(verifier)?;
        }
        let rel = self.rel_path_from_handle(handle)?;
        let dir_attr = self.get_attr(handle).await.ok();

        let mut reader = fs::read_dir(self.full_path(&rel)).await.map_err(map_io_error)?;
        let mut names = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(map_io_error)? {
            names.push(entry.file_name());
        }
        names.sort_by_key(|n| n.to_string_lossy().into_owned());

        let byte_limit =
            if max_bytes == 0 { usize::MAX } else { cmp::max(1, (max_bytes / ENTRY_ESTIMATE_BYTES) as usize) };
        let handle_limit = if max_handles == 0 { usize::MAX } else { max_handles as usize };
        let mut remaining = cmp::min(byte_limit, handle_limit);

        let mut entries = Vec::new();
        for name in names {
            if remaining == 0 {
                break;
            }
            let child_rel = join_child(&rel, &name)?;
            let id = self.ensure_id(child_rel.clone());
            if cookie.0 != 0 && id <= cookie.0 {
                continue;
            }
            let meta = self.metadata_for_rel(&child_rel).await?;
            entries.push(vfs::DirectoryPlusEntry {
                cookie: vfs::DirectoryCookie(id),
                name: name_to_file_name(&name),
                fileid: id,
                handle: Some(Self::encode_handle(id)),
                attr: Some(metadata_to_attr(&meta, id)),
            });
            remaining -= 1;
        }

        Ok(vfs::ReadDirPlusResult {
            directory_attr: dir_attr,
            cookie_verifier: self.cookie_verifier(),
            entries,
        })
    }

    async fn fs_stat(&self, handle: &vfs::FileHandle) -> vfs::VfsResult<vfs::FsStat> {
        let attr = self.get_attr(handle).await.ok();
        Ok(vfs::FsStat {
            total_bytes: 0,
            free_bytes: 0,
            available_bytes: 0,
            total_files: 0,
            free_files: 0,
            available_files: 0,
            invarsec: 0,
            file_attr: attr,
        })
    }

    async fn fs_info(&self, handle: &vfs::FileHandle) -> vfs::VfsResult<vfs::FsInfo> {
        let attr = self.get_attr(handle).await.ok();
        Ok(vfs::FsInfo {
            read_max: 1 << 20,
            read_pref: 64 << 10,
            read_multiple: 1,
            write_max: 1 << 20,
            write_pref: 64 << 10,
            write_multiple: 1,
            directory_pref: 4 << 10,
            max_file_size: u64::MAX,
            time_delta: vfs::FileTime { seconds: 1, nanos: 0 },
            properties: vfs::FsProperties::default(),
            file_attr: attr,
        })
    }

    async fn path_conf(&self, handle: &vfs::FileHandle) -> vfs::VfsResult<vfs::PathConfig> {
        let attr = self.get_attr(handle).await.ok();
        Ok(vfs::PathConfig {
            file_attr: attr,
            max_link: 1024,
            max_name: vfs::MAX_NAME_LEN as u32,
            no_trunc: true,
            chown_restricted: true,
            case_insensitive: false,
            case_preserving: true,
        })
    }

    async fn commit(
        &self,
        handle: &vfs::FileHandle,
        offset: u64,
        count: u32,
    ) -> vfs::VfsResult<vfs::CommitResult> {
        let id = Self::decode_handle(handle)?;
        let rel = self.rel_path(id)?;
        let abs = self.full_path(&rel);
        let mut meta = fs::metadata(&abs).await.map_err(map_io_error)?;

        let commit_whole_file = count == 0;
        if !commit_whole_file && offset > meta.len() {
            return Err(vfs::NfsError::Inval);
        }
        let file = File::open(&abs).await.map_err(map_io_error)?;
        file.sync_data().await.map_err(map_io_error)?;
        meta = fs::metadata(&abs).await.map_err(map_io_error)?;

        Ok(vfs::CommitResult { file_attr: Some(metadata_to_attr(&meta, id)), verifier: self.verifier })
    }
}
