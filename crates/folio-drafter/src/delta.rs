// delta.rs — Binary deltas between commits, and their application.
//
// A delta is the full `git diff --binary` output between two commits. It is
// applied to the working tree with `git apply --3way`, which falls back to a
// three-way merge against the recorded blobs when the target files have
// diverged, leaving standard conflict markers behind.

use folio_git::{CommitId, Repo};

use crate::error::DraftError;

/// How [`apply`] resolves diverging hunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Three-way merge, tolerant of whitespace-only drift.
    #[default]
    IgnoreAllSpace,
    /// On conflicting hunks, keep the draft's side.
    Theirs,
}

impl MergeStrategy {
    fn apply_flag(&self) -> &'static str {
        match self {
            MergeStrategy::IgnoreAllSpace => "--ignore-space-change",
            MergeStrategy::Theirs => "--theirs",
        }
    }
}

/// A non-empty patch between two commits.
#[derive(Debug, Clone)]
pub struct Delta {
    patch: String,
}

impl Delta {
    pub fn patch(&self) -> &str {
        &self.patch
    }
}

/// Paths touched between two commits, bucketed by change kind.
#[derive(Debug, Default)]
pub struct ChangedPaths {
    pub changed: Vec<String>,
    pub added: Vec<String>,
    pub deleted: Vec<String>,
}

/// Compute the delta from `from` to `to`, or `None` when the trees match.
pub fn compute(repo: &Repo, from: &CommitId, to: &CommitId) -> Result<Option<Delta>, DraftError> {
    let call = repo.git(&["diff", "--binary", from.as_str(), to.as_str()])?;
    if call.stdout.is_empty() {
        return Ok(None);
    }
    Ok(Some(Delta {
        patch: call.raw_stdout,
    }))
}

/// Apply a delta to the working tree.
///
/// Tracked modifications are staged first so that `apply` sees resolvable
/// context, then everything is unstaged again on success so the result is
/// visible as ordinary working-tree changes. On a three-way conflict the
/// marked files are left in place and the failing paths are reported.
pub fn apply(repo: &Repo, delta: &Delta, strategy: MergeStrategy) -> Result<(), DraftError> {
    repo.git(&["add", "--update"])?;
    let call = repo.git_with(
        &["apply", "--3way", strategy.apply_flag()],
        Some(delta.patch()),
        &[],
    )?;
    if call.code == 0 {
        repo.git(&["reset"])?;
        tracing::debug!("applied draft delta to working tree");
        return Ok(());
    }
    // A failed three-way merge records the conflicting stages in the
    // index; read them before the reset clears them.
    let paths = unmerged_paths(repo)?;
    repo.git(&["reset"])?;
    if paths.is_empty() {
        return Err(DraftError::ApplyFailed {
            stderr: call.stderr,
        });
    }
    tracing::warn!(?paths, "draft delta left conflicts");
    Err(DraftError::Conflict { paths })
}

/// Paths named between two commits, via `diff --name-status`.
pub fn changed_paths(
    repo: &Repo,
    from: &str,
    to: &str,
) -> Result<ChangedPaths, DraftError> {
    let call = repo.git(&["diff", "--name-status", "--no-renames", from, to])?;
    let mut paths = ChangedPaths::default();
    for line in call.stdout.lines() {
        let mut fields = line.splitn(2, '\t');
        let (Some(status), Some(path)) = (fields.next(), fields.next()) else {
            continue;
        };
        let path = path.to_string();
        match status {
            "A" => paths.added.push(path),
            "D" => paths.deleted.push(path),
            _ => paths.changed.push(path),
        }
    }
    Ok(paths)
}

/// Paths with unmerged index entries, in index order.
///
/// `ls-files --unmerged` lines are `<mode> <sha> <stage>\t<path>`; the
/// stages of one path are adjacent, so deduplication only needs to look
/// at the previous path.
fn unmerged_paths(repo: &Repo) -> Result<Vec<String>, DraftError> {
    let call = repo.git(&["ls-files", "--unmerged"])?;
    let mut paths: Vec<String> = Vec::new();
    for line in call.stdout.lines() {
        if let Some((_, path)) = line.split_once('\t') {
            if paths.last().map(String::as_str) != Some(path) {
                paths.push(path.to_string());
            }
        }
    }
    Ok(paths)
}
