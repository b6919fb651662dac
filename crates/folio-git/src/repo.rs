// repo.rs — Repository handle: semantic operations over the gateway.

use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::call::GitCall;
use crate::error::GitError;

/// Git config key holding the persisted repository UUID.
const REPO_UUID_KEY: &str = "draft.repouuid";

/// Commit id newtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options for [`Repo::create_commit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
    /// Allow a commit whose tree matches its parent.
    pub allow_empty: bool,
    /// Bypass pre-commit and commit-msg hooks.
    pub skip_hooks: bool,
}

/// A git repository, identified by its working directory and a stable UUID.
///
/// The UUID lives in the repository's local config and is generated on first
/// access, so history records stay attached to the repository even if its
/// path changes.
pub struct Repo {
    working_dir: PathBuf,
    uuid: Uuid,
}

impl Repo {
    /// Resolve the repository enclosing `path`.
    pub fn enclosing(path: &Path) -> Result<Self, GitError> {
        let call = GitCall::run(Some(path), &["rev-parse", "--show-toplevel"], None, &[])
            .map_err(|_| GitError::NotARepository {
                path: path.to_path_buf(),
            })?;
        if call.code != 0 {
            return Err(GitError::NotARepository {
                path: path.to_path_buf(),
            });
        }
        let working_dir = PathBuf::from(call.stdout);
        let uuid = ensure_repo_uuid(&working_dir)?;
        Ok(Self { working_dir, uuid })
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Run a git command in this repository, expecting exit code 0.
    pub fn git(&self, args: &[&str]) -> Result<GitCall, GitError> {
        self.git_with(args, None, &[0])
    }

    /// Run a git command with explicit stdin and accepted exit codes.
    pub fn git_with(
        &self,
        args: &[&str],
        stdin: Option<&str>,
        expect_codes: &[i32],
    ) -> Result<GitCall, GitError> {
        GitCall::run(Some(&self.working_dir), args, stdin, expect_codes)
    }

    /// Run a git command with extra environment variables, expecting exit
    /// code 0. Used for scratch-index work via `GIT_INDEX_FILE`.
    pub fn git_env(&self, args: &[&str], env: &[(&str, &str)]) -> Result<GitCall, GitError> {
        GitCall::run_with_env(Some(&self.working_dir), args, None, &[0], env)
    }

    /// Current branch name, or `None` when HEAD is detached.
    pub fn active_branch(&self) -> Result<Option<String>, GitError> {
        let call = self.git(&["branch", "--show-current"])?;
        Ok(if call.stdout.is_empty() {
            None
        } else {
            Some(call.stdout)
        })
    }

    /// Whether the staging area differs from HEAD.
    pub fn has_staged_changes(&self) -> Result<bool, GitError> {
        // 0 = clean, 1 = differences; anything else is a real failure.
        let call = self.git_with(&["diff", "--quiet", "--staged"], None, &[0, 1])?;
        Ok(call.code != 0)
    }

    /// Commit id of HEAD.
    pub fn head_commit(&self) -> Result<CommitId, GitError> {
        self.resolve_commit("HEAD")
    }

    /// Resolve any revision to a commit id.
    pub fn resolve_commit(&self, rev: &str) -> Result<CommitId, GitError> {
        let call = self.git(&["rev-parse", rev])?;
        Ok(CommitId::new(call.stdout))
    }

    /// Commit currently staged content and return the new commit id.
    pub fn create_commit(
        &self,
        message: &str,
        options: CommitOptions,
    ) -> Result<CommitId, GitError> {
        let mut args = vec!["commit", "-m", message];
        if options.allow_empty {
            args.push("--allow-empty");
        }
        if options.skip_hooks {
            args.push("--no-verify");
        }
        self.git(&args)?;
        self.head_commit()
    }

    /// Detach HEAD at the current commit.
    pub fn checkout_detached(&self) -> Result<(), GitError> {
        self.git(&["checkout", "--detach"])?;
        Ok(())
    }

    pub fn checkout_branch(&self, name: &str) -> Result<(), GitError> {
        self.git(&["checkout", name])?;
        Ok(())
    }

    /// Create a branch at the current HEAD without switching to it.
    pub fn create_branch(&self, name: &str) -> Result<(), GitError> {
        self.git(&["branch", name])?;
        Ok(())
    }

    pub fn delete_branch(&self, name: &str, force: bool) -> Result<(), GitError> {
        let flag = if force { "-D" } else { "-d" };
        self.git(&["branch", flag, name])?;
        Ok(())
    }

    /// Point `reference` (e.g. `refs/drafts/1/2`) at a commit.
    pub fn update_ref(&self, reference: &str, commit: &CommitId) -> Result<(), GitError> {
        self.git(&["update-ref", reference, commit.as_str()])?;
        Ok(())
    }
}

/// Read the persisted repository UUID, generating and storing one if absent.
fn ensure_repo_uuid(working_dir: &Path) -> Result<Uuid, GitError> {
    let call = GitCall::run(Some(working_dir), &["config", REPO_UUID_KEY], None, &[])?;
    if call.code == 0 {
        return Uuid::parse_str(&call.stdout).map_err(|source| GitError::InvalidUuid {
            value: call.stdout,
            source,
        });
    }
    let uuid = Uuid::new_v4();
    let value = uuid.to_string();
    GitCall::run(
        Some(working_dir),
        &["config", REPO_UUID_KEY, &value],
        None,
        &[0],
    )?;
    tracing::debug!(%uuid, "persisted new repository uuid");
    Ok(uuid)
}
