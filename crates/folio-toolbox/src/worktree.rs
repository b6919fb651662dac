// worktree.rs — Materialized-worktree mutation surface.
//
// Tool calls operate against an in-memory overlay keyed by path, layered
// over a fixed base tree. Nothing touches disk until the caller enters a
// scoped edit session: the overlay state is materialized into a temporary
// `git worktree`, the directory path is handed to the caller for arbitrary
// external tools, and on release the directory is re-scanned and its diff
// folded back into the overlay. At most one session exists per toolbox.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use folio_git::Repo;

use crate::error::ToolboxError;
use crate::operation::{Operation, OperationLog, ToolEvent, ToolObserver};
use crate::toolbox::Toolbox;

/// Overlay entry: `Some` is pending content, `None` a pending delete.
type Overlay = BTreeMap<String, Option<String>>;

/// Mutation surface over a snapshot of `repo` at a fixed base tree.
pub struct WorktreeToolbox<'r> {
    repo: &'r Repo,
    base: String,
    overlay: Overlay,
    log: OperationLog,
}

impl<'r> WorktreeToolbox<'r> {
    /// Build a surface over the tree of `base` (any commit-ish).
    pub fn new(repo: &'r Repo, base: impl Into<String>) -> Self {
        Self {
            repo,
            base: base.into(),
            overlay: Overlay::new(),
            log: OperationLog::new(),
        }
    }

    /// Build a surface over the live working tree.
    ///
    /// A dirty tree, untracked files included, is captured as a snapshot
    /// commit built through a scratch index, without touching the real
    /// index or the tree; the returned flag says whether that happened.
    /// A clean tree uses HEAD directly.
    pub fn for_working_dir(repo: &'r Repo) -> Result<(Self, bool), ToolboxError> {
        match snapshot_working_tree(repo)? {
            Some(commit) => Ok((Self::new(repo, commit), true)),
            None => Ok((Self::new(repo, "HEAD"), false)),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn ToolObserver>) {
        self.log.add_observer(observer);
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.log.into_operations()
    }

    /// Run `action` with a materialized copy of the current state.
    ///
    /// The closure receives the directory path; whatever it (or any external
    /// tool) leaves behind is diffed against the state at entry and folded
    /// back into the overlay before this method returns. The temporary
    /// worktree is removed on every exit path.
    pub fn edit_files<R>(
        &mut self,
        action: impl FnOnce(&Path) -> R,
    ) -> Result<R, ToolboxError> {
        let session = self.materialize()?;
        let entry_state = session.scan()?;
        tracing::debug!(root = %session.root().display(), "opened edit session");

        let result = action(session.root());

        let exit_state = session.scan()?;
        for (path, contents) in &exit_state {
            if entry_state.get(path) != Some(contents) {
                self.overlay.insert(path.clone(), Some(contents.clone()));
            }
        }
        for path in entry_state.keys() {
            if !exit_state.contains_key(path) {
                self.overlay.insert(path.clone(), None);
            }
        }
        tracing::debug!("closed edit session");
        Ok(result)
    }

    fn base_files(&self) -> Result<Vec<String>, ToolboxError> {
        let call = self
            .repo
            .git(&["ls-tree", "-r", "--name-only", &self.base])?;
        Ok(call
            .stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn read_base(&self, path: &str) -> Result<Option<String>, ToolboxError> {
        let spec = format!("{}:{}", self.base, path);
        let call = self.repo.git_with(&["show", &spec], None, &[])?;
        // Blob content is data; trailing newlines must survive.
        Ok(if call.code == 0 {
            Some(call.raw_stdout)
        } else {
            None
        })
    }

    fn current(&self, path: &str) -> Result<Option<String>, ToolboxError> {
        match self.overlay.get(path) {
            Some(Some(contents)) => Ok(Some(contents.clone())),
            Some(None) => Ok(None),
            None => self.read_base(path),
        }
    }

    fn materialize(&self) -> Result<EditSession<'r>, ToolboxError> {
        let session = EditSession::create(self.repo, &self.base)?;
        for (path, entry) in &self.overlay {
            let full = session.root().join(path);
            match entry {
                Some(contents) => {
                    if let Some(parent) = full.parent() {
                        fs::create_dir_all(parent).map_err(|source| ToolboxError::Io {
                            path: parent.to_path_buf(),
                            source,
                        })?;
                    }
                    fs::write(&full, contents).map_err(|source| ToolboxError::Io {
                        path: full.clone(),
                        source,
                    })?;
                }
                None => {
                    if full.exists() {
                        fs::remove_file(&full).map_err(|source| ToolboxError::Io {
                            path: full.clone(),
                            source,
                        })?;
                    }
                }
            }
        }
        Ok(session)
    }
}

/// Commit the live working tree state, tracked and untracked alike, via a
/// scratch index. Returns `None` when the tree matches HEAD. The snapshot
/// commit is unreferenced; it only needs to outlive the toolbox.
fn snapshot_working_tree(repo: &Repo) -> Result<Option<String>, ToolboxError> {
    let scratch = tempfile::tempdir().map_err(|source| ToolboxError::Io {
        path: std::env::temp_dir(),
        source,
    })?;
    let index_file = scratch.path().join("index");
    let index = index_file.to_string_lossy().to_string();
    let env: [(&str, &str); 1] = [("GIT_INDEX_FILE", &index)];

    repo.git_env(&["read-tree", "HEAD"], &env)?;
    repo.git_env(&["add", "--all"], &env)?;
    let tree = repo.git_env(&["write-tree"], &env)?.stdout;

    let head_tree = repo.git(&["rev-parse", "HEAD^{tree}"])?.stdout;
    if tree == head_tree {
        return Ok(None);
    }
    let call = repo.git(&[
        "commit-tree",
        &tree,
        "-p",
        "HEAD",
        "-m",
        "working tree snapshot",
    ])?;
    tracing::debug!(commit = %call.stdout, "snapshotted dirty working tree");
    Ok(Some(call.stdout))
}

impl Toolbox for WorktreeToolbox<'_> {
    fn list_files(&mut self, reason: Option<&str>) -> Result<Vec<String>, ToolboxError> {
        let mut paths: Vec<String> = self
            .base_files()?
            .into_iter()
            .filter(|path| !matches!(self.overlay.get(path), Some(None)))
            .collect();
        for (path, entry) in &self.overlay {
            if entry.is_some() && !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        paths.sort();
        self.log
            .record(ToolEvent::ListFiles { count: paths.len() }, reason);
        Ok(paths)
    }

    fn read_file(&mut self, path: &str, reason: Option<&str>) -> Result<String, ToolboxError> {
        let current = self.current(path)?;
        self.log.record(
            ToolEvent::ReadFile {
                path: path.to_string(),
                size: current.as_ref().map(String::len),
            },
            reason,
        );
        current.ok_or_else(|| ToolboxError::FileNotFound {
            path: path.to_string(),
        })
    }

    fn write_file(
        &mut self,
        path: &str,
        contents: &str,
        reason: Option<&str>,
    ) -> Result<(), ToolboxError> {
        self.overlay
            .insert(path.to_string(), Some(contents.to_string()));
        self.log.record(
            ToolEvent::WriteFile {
                path: path.to_string(),
                size: contents.len(),
            },
            reason,
        );
        Ok(())
    }

    fn delete_file(&mut self, path: &str, reason: Option<&str>) -> Result<(), ToolboxError> {
        if self.current(path)?.is_some() {
            self.overlay.insert(path.to_string(), None);
        }
        self.log.record(
            ToolEvent::DeleteFile {
                path: path.to_string(),
            },
            reason,
        );
        Ok(())
    }

    fn rename_file(
        &mut self,
        src: &str,
        dst: &str,
        reason: Option<&str>,
    ) -> Result<(), ToolboxError> {
        let contents = self
            .current(src)?
            .ok_or_else(|| ToolboxError::FileNotFound {
                path: src.to_string(),
            })?;
        self.overlay.insert(dst.to_string(), Some(contents));
        self.overlay.insert(src.to_string(), None);
        self.log.record(
            ToolEvent::RenameFile {
                src_path: src.to_string(),
                dst_path: dst.to_string(),
            },
            reason,
        );
        Ok(())
    }

    fn operations(&self) -> &[Operation] {
        self.log.operations()
    }
}

/// A temporary `git worktree`, removed on drop.
struct EditSession<'r> {
    repo: &'r Repo,
    root: PathBuf,
    // Held for its Drop: deletes the parent directory after worktree removal.
    _dir: tempfile::TempDir,
}

impl<'r> EditSession<'r> {
    fn create(repo: &'r Repo, base: &str) -> Result<Self, ToolboxError> {
        let dir = tempfile::tempdir().map_err(|source| ToolboxError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
        let root = dir.path().join("wt");
        let root_str = root.to_string_lossy().to_string();
        repo.git(&["worktree", "add", "--detach", &root_str, base])?;
        Ok(Self {
            repo,
            root,
            _dir: dir,
        })
    }

    fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot of the directory: relative path → content.
    fn scan(&self) -> Result<BTreeMap<String, String>, ToolboxError> {
        let mut state = BTreeMap::new();
        self.scan_dir(&self.root, &mut state)?;
        Ok(state)
    }

    fn scan_dir(
        &self,
        dir: &Path,
        state: &mut BTreeMap<String, String>,
    ) -> Result<(), ToolboxError> {
        let entries = fs::read_dir(dir).map_err(|source| ToolboxError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| ToolboxError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            // In a linked worktree `.git` is a file pointing back at the
            // repository; either way it is not session content.
            if path.file_name().is_some_and(|name| name == ".git") {
                continue;
            }
            if path.is_dir() {
                self.scan_dir(&path, state)?;
            } else {
                let bytes = fs::read(&path).map_err(|source| ToolboxError::Io {
                    path: path.clone(),
                    source,
                })?;
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    state.insert(
                        relative.to_string_lossy().replace('\\', "/"),
                        String::from_utf8_lossy(&bytes).to_string(),
                    );
                }
            }
        }
        Ok(())
    }
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        let root = self.root.to_string_lossy().to_string();
        let _ = self
            .repo
            .git_with(&["worktree", "remove", "--force", &root], None, &[]);
        let _ = self.repo.git_with(&["worktree", "prune"], None, &[]);
    }
}
