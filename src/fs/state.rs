use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const ROOT_ID: u64 = 1;

/// Bidirectional map between the stable identifiers handed out in file
/// handles and the relative paths they currently name.
pub struct State {
    next_id: u64,
    paths: HashMap<u64, PathBuf>,
    ids: HashMap<PathBuf, u64>,
}

impl State {
    pub fn new() -> Self {
        let mut state = State { next_id: ROOT_ID + 1, paths: HashMap::new(), ids: HashMap::new() };
        state.paths.insert(ROOT_ID, PathBuf::new());
        state.ids.insert(PathBuf::new(), ROOT_ID);
        state
    }

    pub fn rel_path(&self, id: u64) -> Option<PathBuf> {
        self.paths.get(&id).cloned()
    }

    pub fn ensure_id(&mut self, rel: PathBuf) -> u64 {
        if let Some(&id) = self.ids.get(&rel) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(rel.clone(), id);
        self.paths.insert(id, rel);
        id
    }

    /// Drop the identifier for `rel` and every path nested under it.
    pub fn remove_subtree(&mut self, rel: &Path) {
        let doomed: Vec<PathBuf> =
            self.ids.keys().filter(|path| path.starts_with(rel)).cloned().collect();
        for path in doomed {
            if let Some(id) = self.ids.remove(&path) {
                self.paths.remove(&id);
            }
        }
    }

    /// Re-point every path at or beneath `old` onto the equivalent position
    /// beneath `new`, preserving identifiers.
    pub fn rename_subtree(&mut self, old: &Path, new: PathBuf) {
        let affected: Vec<PathBuf> =
            self.ids.keys().filter(|path| path.starts_with(old)).cloned().collect();
        for path in affected {
            let Some(id) = self.ids.remove(&path) else { continue };
            let suffix = path.strip_prefix(old).unwrap_or(Path::new(""));
            let moved = if suffix.as_os_str().is_empty() { new.clone() } else { new.join(suffix) };
            self.ids.insert(moved.clone(), id);
            self.paths.insert(id, moved);
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
