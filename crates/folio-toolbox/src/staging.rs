// staging.rs — Index-only mutation surface.
//
// All five tools operate against the repository's staging area through git
// plumbing: content goes into the object database via `hash-object -w` and
// the index entry is pointed at it with `update-index --cacheinfo`. Tracked
// working-tree files are never created or modified; changes become visible
// only when a later apply step materializes them.

use folio_git::Repo;

use crate::error::ToolboxError;
use crate::operation::{Operation, OperationLog, ToolEvent, ToolObserver};
use crate::toolbox::Toolbox;

/// Mutation surface over the staging area of `repo`.
pub struct StagingToolbox<'r> {
    repo: &'r Repo,
    log: OperationLog,
}

impl<'r> StagingToolbox<'r> {
    pub fn new(repo: &'r Repo) -> Self {
        Self {
            repo,
            log: OperationLog::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn ToolObserver>) {
        self.log.add_observer(observer);
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.log.into_operations()
    }

    /// Staged entry `<mode> <sha>` for a path, if one exists.
    fn staged_entry(&self, path: &str) -> Result<Option<(String, String)>, ToolboxError> {
        let call = self.repo.git(&["ls-files", "--stage", "--", path])?;
        if call.stdout.is_empty() {
            return Ok(None);
        }
        // Format: "<mode> <sha> <stage>\t<path>"
        let mut fields = call.stdout.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(mode), Some(sha)) => Ok(Some((mode.to_string(), sha.to_string()))),
            _ => Ok(None),
        }
    }

    fn read_staged(&self, path: &str) -> Result<String, ToolboxError> {
        let spec = format!(":{path}");
        let call = self.repo.git_with(&["show", &spec], None, &[])?;
        if call.code != 0 {
            return Err(ToolboxError::FileNotFound {
                path: path.to_string(),
            });
        }
        // Blob content is data; trailing newlines must survive.
        Ok(call.raw_stdout)
    }

    fn stage_blob(&self, path: &str, contents: &str, mode: &str) -> Result<(), ToolboxError> {
        let call = self.repo.git_with(
            &["hash-object", "-w", "--stdin", "--path", path],
            Some(contents),
            &[0],
        )?;
        let cacheinfo = format!("{mode},{sha},{path}", sha = call.stdout);
        self.repo
            .git(&["update-index", "--add", "--cacheinfo", &cacheinfo])?;
        Ok(())
    }

    fn unstage(&self, path: &str) -> Result<(), ToolboxError> {
        self.repo
            .git(&["update-index", "--force-remove", "--", path])?;
        Ok(())
    }
}

impl Toolbox for StagingToolbox<'_> {
    fn list_files(&mut self, reason: Option<&str>) -> Result<Vec<String>, ToolboxError> {
        let call = self.repo.git(&["ls-files"])?;
        let paths: Vec<String> = call
            .stdout
            .lines()
            .map(str::to_string)
            .filter(|line| !line.is_empty())
            .collect();
        self.log
            .record(ToolEvent::ListFiles { count: paths.len() }, reason);
        Ok(paths)
    }

    fn read_file(&mut self, path: &str, reason: Option<&str>) -> Result<String, ToolboxError> {
        let result = self.read_staged(path);
        self.log.record(
            ToolEvent::ReadFile {
                path: path.to_string(),
                size: result.as_ref().ok().map(String::len),
            },
            reason,
        );
        result
    }

    fn write_file(
        &mut self,
        path: &str,
        contents: &str,
        reason: Option<&str>,
    ) -> Result<(), ToolboxError> {
        // Preserve the mode of an existing staged entry (e.g. executables).
        let mode = self
            .staged_entry(path)?
            .map(|(mode, _)| mode)
            .unwrap_or_else(|| "100644".to_string());
        self.stage_blob(path, contents, &mode)?;
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
        if self.staged_entry(path)?.is_some() {
            self.unstage(path)?;
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
        // Re-point the existing blob rather than round-tripping content,
        // so the moved file is byte-identical to the source.
        let (mode, sha) =
            self.staged_entry(src)?
                .ok_or_else(|| ToolboxError::FileNotFound {
                    path: src.to_string(),
                })?;
        let cacheinfo = format!("{mode},{sha},{dst}");
        self.repo
            .git(&["update-index", "--add", "--cacheinfo", &cacheinfo])?;
        self.unstage(src)?;
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
