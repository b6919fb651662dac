// branch.rs — Draft branch naming.

use folio_git::{GitError, Repo};

/// Prefix shared by every draft branch.
const BRANCH_PREFIX: &str = "drafts/";

/// Ref namespace holding per-prompt anchors.
const ANCHOR_PREFIX: &str = "refs/drafts";

/// The branch backing one folio: `drafts/<folio-id>`.
///
/// The branch name is the only state shared between the repository and the
/// history store; everything else about a folio is looked up through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftBranch {
    folio_id: i64,
}

impl DraftBranch {
    pub fn new(folio_id: i64) -> Self {
        Self { folio_id }
    }

    pub fn folio_id(&self) -> i64 {
        self.folio_id
    }

    /// Branch name in the repository.
    pub fn name(&self) -> String {
        format!("{BRANCH_PREFIX}{}", self.folio_id)
    }

    /// Anchor ref for one prompt of this folio: `refs/drafts/<id>/<seqno>`.
    ///
    /// Anchors keep draft commits reachable after the branch is deleted.
    pub fn anchor_ref(&self, seqno: i64) -> String {
        format!("{ANCHOR_PREFIX}/{}/{seqno}", self.folio_id)
    }

    /// Parse a branch name, returning `None` for non-draft branches.
    pub fn parse(name: &str) -> Option<Self> {
        let suffix = name.strip_prefix(BRANCH_PREFIX)?;
        let folio_id: i64 = suffix.parse().ok()?;
        Some(Self { folio_id })
    }

    /// The draft branch currently checked out, if any.
    pub fn active(repo: &Repo) -> Result<Option<Self>, GitError> {
        Ok(repo.active_branch()?.as_deref().and_then(Self::parse))
    }
}
