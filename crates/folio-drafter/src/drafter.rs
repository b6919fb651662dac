// drafter.rs — The draft lifecycle state machine.
//
// A folio is opened by detaching from the origin branch, optionally folding
// dirty state into a sync commit, and checking out a fresh `drafts/<id>`
// branch. Every prompt then becomes one draft commit on that branch, anchored
// under `refs/drafts/<id>/<seqno>` so history survives branch deletion.
// Finalize and discard both leave through the same exit: move HEAD back to
// the origin commit without touching the working tree, re-attach to the
// origin branch, and delete the draft branch.

use std::fs;
use std::time::{Duration, Instant};

use folio_git::{CommitId, CommitOptions, Repo};
use folio_store::{ActionRecord, FolioRow, HistoryStore};
use folio_toolbox::{Bot, Goal, StagingToolbox, ToolObserver};

use crate::branch::DraftBranch;
use crate::delta::{self, MergeStrategy};
use crate::error::DraftError;

/// Commit message of bookkeeping commits that capture pre-existing state.
const SYNC_MESSAGE: &str = "draft! sync";

/// Longest derived commit title, in bytes.
const TITLE_LIMIT: usize = 72;

/// How far a generated draft is carried toward the origin branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Accept {
    /// Leave the draft as a commit only; the working tree is untouched.
    #[default]
    Manual,
    /// Also apply the draft's changes to the working tree.
    Checkout,
    /// Apply the changes and close the folio, returning to the origin branch.
    Finalize,
}

/// Knobs for [`Drafter::generate_draft`].
#[derive(Default)]
pub struct GenerateOptions {
    pub accept: Accept,
    pub strategy: MergeStrategy,
    /// Unstage pending changes instead of refusing to run.
    pub reset: bool,
    /// Configured bot name recorded alongside the action.
    pub bot_name: Option<String>,
    pub timeout: Option<Duration>,
    /// Observers notified of each toolbox operation as it happens.
    pub observers: Vec<Box<dyn ToolObserver>>,
}

/// Outcome of one generation: where the draft commit landed.
#[derive(Debug)]
pub struct Draft {
    pub folio_id: i64,
    pub seqno: i64,
    pub commit: CommitId,
    pub branch: String,
}

/// Orchestrates folios over one repository, recording history as it goes.
pub struct Drafter<'a> {
    repo: &'a Repo,
    store: &'a HistoryStore,
}

impl<'a> Drafter<'a> {
    pub fn new(repo: &'a Repo, store: &'a HistoryStore) -> Self {
        Self { repo, store }
    }

    /// The draft branch currently checked out, if any.
    ///
    /// Total on any repository state: detached HEAD and non-draft branches
    /// both report `None`.
    pub fn active_folio(&self) -> Result<Option<DraftBranch>, DraftError> {
        Ok(DraftBranch::active(self.repo)?)
    }

    /// Run `bot` against the prompt and record the result as a draft commit.
    ///
    /// Opens a new folio when not already on a draft branch, otherwise
    /// extends the active one. Returns the new draft's coordinates; with
    /// [`Accept::Checkout`] or above the changes are also merged into the
    /// working tree, and with [`Accept::Finalize`] the folio is closed.
    pub fn generate_draft(
        &self,
        prompt: &str,
        bot: &mut dyn Bot,
        options: GenerateOptions,
    ) -> Result<Draft, DraftError> {
        let GenerateOptions {
            accept,
            strategy,
            reset,
            bot_name,
            timeout,
            observers,
        } = options;

        if self.repo.has_staged_changes()? {
            if !reset {
                return Err(DraftError::PendingChanges);
            }
            self.repo.git(&["reset"])?;
        }

        let branch = match DraftBranch::active(self.repo)? {
            Some(branch) => {
                // Fold anything changed since the last prompt into the
                // bot's base so the draft commit stays minimal.
                self.sync_commit()?;
                branch
            }
            None => self.create_folio()?,
        };

        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(DraftError::EmptyPrompt);
        }
        let folio = self.folio_row(&branch)?;
        let record = self.store.add_prompt(folio.id, None, prompt)?;

        let mut toolbox = StagingToolbox::new(self.repo);
        for observer in observers {
            toolbox.add_observer(observer);
        }
        let goal = Goal {
            prompt: prompt.to_string(),
            timeout,
        };
        let started = Instant::now();
        let action = bot.act(&goal, &mut toolbox).map_err(DraftError::Bot)?;
        let walltime = started.elapsed();
        let operations = toolbox.into_operations();

        let title = action.title.unwrap_or_else(|| default_title(prompt));
        let message = format!("draft! {title}\n\n{prompt}");
        let commit = self.repo.create_commit(
            &message,
            CommitOptions {
                allow_empty: true,
                skip_hooks: true,
            },
        )?;
        self.repo
            .update_ref(&branch.anchor_ref(record.seqno), &commit)?;

        self.store.add_action(&ActionRecord {
            commit_sha: commit.as_str().to_string(),
            prompt_id: record.id,
            bot_name,
            bot_class: bot.class_name().to_string(),
            walltime_seconds: walltime.as_secs_f64(),
            request_count: action.request_count,
            token_count: action.token_count,
        })?;
        self.store.add_operations(commit.as_str(), &operations)?;
        tracing::info!(
            folio_id = branch.folio_id(),
            seqno = record.seqno,
            commit = %commit,
            "generated draft"
        );

        if accept >= Accept::Checkout {
            let parent = self.repo.resolve_commit(&format!("{}^", commit.as_str()))?;
            if let Some(delta) = delta::compute(self.repo, &parent, &commit)? {
                delta::apply(self.repo, &delta, strategy)?;
            }
        }
        if accept == Accept::Finalize {
            self.finalize_folio()?;
        }

        Ok(Draft {
            folio_id: branch.folio_id(),
            seqno: record.seqno,
            commit,
            branch: branch.name(),
        })
    }

    /// Close the active folio, keeping its changes in the working tree.
    ///
    /// Pending working-tree changes are first folded into a sync commit on
    /// the draft branch, the origin is re-validated against the recorded
    /// commit, and the repository returns to the origin branch with the
    /// draft branch deleted. Returns the origin branch name.
    pub fn finalize_folio(&self) -> Result<String, DraftError> {
        let branch = DraftBranch::active(self.repo)?.ok_or(DraftError::NotOnDraftBranch)?;
        let folio = self.folio_row(&branch)?;
        self.sync_commit()?;
        self.ensure_fresh_origin(&folio)?;
        self.exit_to_origin(&folio)?;
        self.repo.delete_branch(&branch.name(), true)?;
        tracing::info!(
            folio_id = branch.folio_id(),
            origin = folio.origin_branch,
            "finalized folio"
        );
        Ok(folio.origin_branch)
    }

    /// Abandon the active folio and return to the origin branch.
    ///
    /// With `revert`, working-tree paths the drafts touched are restored to
    /// their pre-folio state; otherwise the tree is left exactly as it is.
    /// Anchored refs keep the abandoned commits reachable either way.
    pub fn discard_folio(&self, revert: bool) -> Result<String, DraftError> {
        let branch = DraftBranch::active(self.repo)?.ok_or(DraftError::NotOnDraftBranch)?;
        let folio = self.folio_row(&branch)?;
        let draft_tip = self.repo.head_commit()?;
        if revert {
            self.ensure_fresh_origin(&folio)?;
        }
        self.exit_to_origin(&folio)?;
        if revert {
            self.revert_draft_paths(&folio, &draft_tip)?;
        }
        self.repo.delete_branch(&branch.name(), true)?;
        tracing::info!(
            folio_id = branch.folio_id(),
            origin = folio.origin_branch,
            revert,
            "discarded folio"
        );
        Ok(folio.origin_branch)
    }

    /// Text of the most recent prompt in the active folio, if any.
    pub fn latest_prompt(&self) -> Result<Option<String>, DraftError> {
        let Some(branch) = DraftBranch::active(self.repo)? else {
            return Ok(None);
        };
        let folio = self.folio_row(&branch)?;
        Ok(self.store.latest_prompt(self.repo.uuid(), folio.id)?)
    }

    /// Open a new folio from the current branch.
    fn create_folio(&self) -> Result<DraftBranch, DraftError> {
        let origin_branch = self
            .repo
            .active_branch()?
            .ok_or(DraftError::NoActiveBranch)?;
        let origin_commit = self.repo.head_commit()?;
        // Detach first so the sync commit never lands on the origin branch.
        self.repo.checkout_detached()?;
        let sync = self.sync_commit()?;
        let folio_id = self.store.add_folio(
            self.repo.uuid(),
            &origin_branch,
            origin_commit.as_str(),
            sync.as_ref().map(CommitId::as_str),
        )?;
        let branch = DraftBranch::new(folio_id);
        self.repo.create_branch(&branch.name())?;
        self.repo.checkout_branch(&branch.name())?;
        tracing::info!(folio_id, origin_branch, "opened folio");
        Ok(branch)
    }

    /// Stage everything and commit it if the tree has drifted from HEAD.
    fn sync_commit(&self) -> Result<Option<CommitId>, DraftError> {
        self.repo.git(&["add", "--all"])?;
        if !self.repo.has_staged_changes()? {
            return Ok(None);
        }
        let commit = self.repo.create_commit(
            SYNC_MESSAGE,
            CommitOptions {
                allow_empty: false,
                skip_hooks: true,
            },
        )?;
        tracing::debug!(commit = %commit, "recorded sync commit");
        Ok(Some(commit))
    }

    fn folio_row(&self, branch: &DraftBranch) -> Result<FolioRow, DraftError> {
        self.store
            .folio(self.repo.uuid(), branch.folio_id())?
            .ok_or(DraftError::UnknownFolio {
                folio_id: branch.folio_id(),
            })
    }

    fn ensure_fresh_origin(&self, folio: &FolioRow) -> Result<(), DraftError> {
        let current = self.repo.resolve_commit(&folio.origin_branch)?;
        if current.as_str() != folio.origin_commit {
            return Err(DraftError::StaleOrigin {
                branch: folio.origin_branch.clone(),
                recorded: folio.origin_commit.clone(),
                current: current.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Re-attach to the origin branch without touching the working tree.
    fn exit_to_origin(&self, folio: &FolioRow) -> Result<(), DraftError> {
        self.repo.checkout_detached()?;
        self.repo.git(&["reset", "-N", &folio.origin_branch])?;
        self.repo.checkout_branch(&folio.origin_branch)?;
        Ok(())
    }

    /// Restore paths the folio's drafts touched to their pre-folio state.
    fn revert_draft_paths(
        &self,
        folio: &FolioRow,
        draft_tip: &CommitId,
    ) -> Result<(), DraftError> {
        let base = folio
            .sync_commit
            .as_deref()
            .unwrap_or(&folio.origin_commit);
        let paths = delta::changed_paths(self.repo, base, draft_tip.as_str())?;
        for path in paths.changed.iter().chain(paths.deleted.iter()) {
            self.repo.git(&["checkout", base, "--", path])?;
        }
        for path in &paths.added {
            let absolute = self.repo.working_dir().join(path);
            if absolute.exists() {
                fs::remove_file(&absolute).map_err(|source| DraftError::Io {
                    path: path.clone(),
                    source,
                })?;
            }
            self.repo.git_with(&["reset", "--quiet", "--", path], None, &[])?;
        }
        Ok(())
    }
}

/// Derive a commit title from the prompt's leading words.
fn default_title(prompt: &str) -> String {
    let collapsed = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() <= TITLE_LIMIT {
        return collapsed;
    }
    let mut cut = TITLE_LIMIT - 3;
    while !collapsed.is_char_boundary(cut) {
        cut -= 1;
    }
    let head = &collapsed[..cut];
    let head = head.rfind(' ').map_or(head, |space| &head[..space]);
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_git::GitCall;
    use folio_toolbox::{BotAction, MappingBot, Toolbox};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        _dir: TempDir,
        repo: Repo,
        store: HistoryStore,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            let path = dir.path();
            GitCall::run(Some(path), &["init", "-b", "main"], None, &[0]).unwrap();
            GitCall::run(Some(path), &["config", "user.name", "Test User"], None, &[0]).unwrap();
            GitCall::run(
                Some(path),
                &["config", "user.email", "test@example.com"],
                None,
                &[0],
            )
            .unwrap();
            fs::write(path.join("base.txt"), "base\n").unwrap();
            GitCall::run(Some(path), &["add", "."], None, &[0]).unwrap();
            GitCall::run(Some(path), &["commit", "-m", "init"], None, &[0]).unwrap();
            let repo = Repo::enclosing(path).unwrap();
            let store = HistoryStore::in_memory().unwrap();
            Self {
                _dir: dir,
                repo,
                store,
            }
        }

        fn drafter(&self) -> Drafter<'_> {
            Drafter::new(&self.repo, &self.store)
        }

        fn path(&self, name: &str) -> PathBuf {
            self.repo.working_dir().join(name)
        }

        fn branches(&self) -> Vec<String> {
            let call = self
                .repo
                .git(&["branch", "--list", "--format", "%(refname:short)"])
                .unwrap();
            call.stdout.lines().map(str::to_string).collect()
        }
    }

    fn options(accept: Accept) -> GenerateOptions {
        GenerateOptions {
            accept,
            ..GenerateOptions::default()
        }
    }

    /// Bot that edits the working tree behind the toolbox's back, standing
    /// in for a user typing while the bot runs.
    struct RacingBot {
        worktree_file: PathBuf,
    }

    impl Bot for RacingBot {
        fn act(
            &mut self,
            _goal: &Goal,
            toolbox: &mut dyn Toolbox,
        ) -> Result<BotAction, Box<dyn std::error::Error + Send + Sync>> {
            fs::write(&self.worktree_file, "user edit\n")?;
            toolbox.write_file("base.txt", "bot edit\n", None)?;
            Ok(BotAction::default())
        }

        fn class_name(&self) -> &str {
            "tests::RacingBot"
        }
    }

    #[test]
    fn manual_draft_leaves_working_tree_untouched() {
        let fixture = Fixture::new();
        let mut bot = MappingBot::writing("greeting.txt", "hi");

        let draft = fixture
            .drafter()
            .generate_draft("add a greeting", &mut bot, options(Accept::Manual))
            .unwrap();

        assert_eq!(
            fixture.repo.active_branch().unwrap().as_deref(),
            Some(draft.branch.as_str())
        );
        assert_eq!(fixture.repo.head_commit().unwrap(), draft.commit);
        // The file exists in the commit, not in the working tree.
        assert!(!fixture.path("greeting.txt").exists());
        let spec = format!("{}:greeting.txt", draft.commit);
        assert_eq!(fixture.repo.git(&["show", &spec]).unwrap().stdout, "hi");
    }

    #[test]
    fn draft_commit_subject_carries_the_prompt() {
        let fixture = Fixture::new();
        let mut bot = MappingBot::noop();

        fixture
            .drafter()
            .generate_draft("  add a greeting  ", &mut bot, options(Accept::Manual))
            .unwrap();

        let subject = fixture.repo.git(&["log", "-1", "--format=%s"]).unwrap();
        assert_eq!(subject.stdout, "draft! add a greeting");
        let body = fixture.repo.git(&["log", "-1", "--format=%b"]).unwrap();
        assert_eq!(body.stdout, "add a greeting");
    }

    #[test]
    fn pre_existing_changes_stay_out_of_the_draft_commit() {
        let fixture = Fixture::new();
        fs::write(fixture.path("notes.txt"), "wip\n").unwrap();
        let mut bot = MappingBot::writing("bot.txt", "generated\n");

        let draft = fixture
            .drafter()
            .generate_draft("write bot file", &mut bot, options(Accept::Manual))
            .unwrap();

        // The dirty file went into the folio's sync commit, so the draft
        // commit's own diff holds only what the bot wrote.
        let parent = format!("{}^", draft.commit);
        let paths =
            delta::changed_paths(&fixture.repo, &parent, draft.commit.as_str()).unwrap();
        assert_eq!(paths.added, vec!["bot.txt"]);
        assert!(paths.changed.is_empty());

        let folio = fixture
            .store
            .folio(fixture.repo.uuid(), draft.folio_id)
            .unwrap()
            .unwrap();
        assert!(folio.sync_commit.is_some());
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let fixture = Fixture::new();
        let mut bot = MappingBot::noop();

        let result =
            fixture
                .drafter()
                .generate_draft("   \n ", &mut bot, options(Accept::Manual));
        assert!(matches!(result, Err(DraftError::EmptyPrompt)));
    }

    #[test]
    fn staged_changes_block_generation_unless_reset() {
        let fixture = Fixture::new();
        fs::write(fixture.path("staged.txt"), "data\n").unwrap();
        fixture.repo.git(&["add", "staged.txt"]).unwrap();

        let mut bot = MappingBot::noop();
        let result =
            fixture
                .drafter()
                .generate_draft("do nothing", &mut bot, options(Accept::Manual));
        assert!(matches!(result, Err(DraftError::PendingChanges)));

        let mut with_reset = options(Accept::Manual);
        with_reset.reset = true;
        fixture
            .drafter()
            .generate_draft("do nothing", &mut bot, with_reset)
            .unwrap();
    }

    #[test]
    fn new_folio_requires_an_active_branch() {
        let fixture = Fixture::new();
        fixture.repo.checkout_detached().unwrap();

        let mut bot = MappingBot::noop();
        let result =
            fixture
                .drafter()
                .generate_draft("do nothing", &mut bot, options(Accept::Manual));
        assert!(matches!(result, Err(DraftError::NoActiveBranch)));
    }

    #[test]
    fn finalize_lands_changes_on_origin() {
        let fixture = Fixture::new();
        let origin_head = fixture.repo.head_commit().unwrap();
        let mut bot = MappingBot::writing("README.md", "hello");

        let draft = fixture
            .drafter()
            .generate_draft("write a readme", &mut bot, options(Accept::Finalize))
            .unwrap();

        assert_eq!(fixture.repo.active_branch().unwrap().as_deref(), Some("main"));
        // Origin history is untouched; changes arrive as working-tree edits.
        assert_eq!(fixture.repo.head_commit().unwrap(), origin_head);
        assert_eq!(
            fs::read_to_string(fixture.path("README.md")).unwrap(),
            "hello"
        );
        assert!(fixture.branches().iter().all(|b| !b.starts_with("drafts/")));

        // History: one folio with one prompt, one recorded write.
        let folios = fixture.store.list_folios(fixture.repo.uuid()).unwrap();
        assert_eq!(folios.len(), 1);
        assert_eq!(folios[0].prompt_count, 1);
        let operations = fixture.store.list_operations(draft.commit.as_str()).unwrap();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].tool, "write_file");

        // Once closed, there is nothing left to finalize.
        let result = fixture.drafter().finalize_folio();
        assert!(matches!(result, Err(DraftError::NotOnDraftBranch)));
    }

    #[test]
    fn repeated_prompts_extend_the_same_folio() {
        let fixture = Fixture::new();
        let drafter = fixture.drafter();

        let mut first_bot = MappingBot::writing("one.txt", "1\n");
        let first = drafter
            .generate_draft("write one", &mut first_bot, options(Accept::Manual))
            .unwrap();
        let mut second_bot = MappingBot::writing("two.txt", "2\n");
        let second = drafter
            .generate_draft("write two", &mut second_bot, options(Accept::Manual))
            .unwrap();

        assert_eq!(first.folio_id, second.folio_id);
        assert_eq!((first.seqno, second.seqno), (1, 2));
        assert_ne!(first.commit, second.commit);

        // Each prompt has its own anchor ref.
        let branch = DraftBranch::new(first.folio_id);
        assert_eq!(
            fixture.repo.resolve_commit(&branch.anchor_ref(1)).unwrap(),
            first.commit
        );
        assert_eq!(
            fixture.repo.resolve_commit(&branch.anchor_ref(2)).unwrap(),
            second.commit
        );

        let prompts = fixture
            .store
            .list_prompts(fixture.repo.uuid(), first.folio_id)
            .unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[1].contents, "write two");
    }

    #[test]
    fn user_edits_during_the_run_surface_as_conflicts() {
        let fixture = Fixture::new();
        let mut bot = RacingBot {
            worktree_file: fixture.path("base.txt"),
        };

        let result =
            fixture
                .drafter()
                .generate_draft("rewrite base", &mut bot, options(Accept::Checkout));
        match result {
            Err(DraftError::Conflict { paths }) => assert_eq!(paths, vec!["base.txt"]),
            other => panic!("expected conflict, got {other:?}"),
        }
        let contents = fs::read_to_string(fixture.path("base.txt")).unwrap();
        assert!(contents.contains("<<<<<<<"), "markers missing: {contents}");
        assert!(contents.contains("bot edit"));
        assert!(contents.contains("user edit"));
        // The draft branch stays active for manual resolution.
        assert!(fixture
            .drafter()
            .active_folio()
            .unwrap()
            .is_some());
    }

    #[test]
    fn discard_with_revert_restores_the_pre_folio_tree() {
        let fixture = Fixture::new();
        let mut map = BTreeMap::new();
        map.insert("base.txt".to_string(), Some("rewritten\n".to_string()));
        map.insert("gen.txt".to_string(), Some("fresh\n".to_string()));
        let mut bot = MappingBot::new(map);

        fixture
            .drafter()
            .generate_draft("rework", &mut bot, options(Accept::Checkout))
            .unwrap();
        assert_eq!(
            fs::read_to_string(fixture.path("base.txt")).unwrap(),
            "rewritten\n"
        );

        let origin = fixture.drafter().discard_folio(true).unwrap();
        assert_eq!(origin, "main");
        assert_eq!(fixture.repo.active_branch().unwrap().as_deref(), Some("main"));
        assert_eq!(
            fs::read_to_string(fixture.path("base.txt")).unwrap(),
            "base\n"
        );
        assert!(!fixture.path("gen.txt").exists());
        assert!(fixture.branches().iter().all(|b| !b.starts_with("drafts/")));
    }

    #[test]
    fn discard_without_revert_keeps_the_working_tree() {
        let fixture = Fixture::new();
        let mut bot = MappingBot::writing("kept.txt", "stays\n");

        fixture
            .drafter()
            .generate_draft("write kept", &mut bot, options(Accept::Checkout))
            .unwrap();
        fixture.drafter().discard_folio(false).unwrap();

        assert_eq!(fixture.repo.active_branch().unwrap().as_deref(), Some("main"));
        assert_eq!(
            fs::read_to_string(fixture.path("kept.txt")).unwrap(),
            "stays\n"
        );
    }

    #[test]
    fn moved_origin_blocks_finalize() {
        let fixture = Fixture::new();
        let mut bot = MappingBot::writing("late.txt", "late\n");
        let draft = fixture
            .drafter()
            .generate_draft("write late", &mut bot, options(Accept::Manual))
            .unwrap();

        // Advance main while the folio is open.
        fixture
            .repo
            .git(&["branch", "-f", "main", draft.commit.as_str()])
            .unwrap();

        let result = fixture.drafter().finalize_folio();
        assert!(matches!(result, Err(DraftError::StaleOrigin { .. })));
        // Still on the draft branch, nothing deleted.
        assert!(fixture.drafter().active_folio().unwrap().is_some());
    }

    #[test]
    fn latest_prompt_follows_the_active_folio() {
        let fixture = Fixture::new();
        let drafter = fixture.drafter();
        assert_eq!(drafter.latest_prompt().unwrap(), None);

        let mut bot = MappingBot::noop();
        drafter
            .generate_draft("first prompt", &mut bot, options(Accept::Manual))
            .unwrap();
        drafter
            .generate_draft("second prompt", &mut bot, options(Accept::Manual))
            .unwrap();
        assert_eq!(
            drafter.latest_prompt().unwrap().as_deref(),
            Some("second prompt")
        );
    }

    #[test]
    fn default_title_collapses_and_truncates() {
        assert_eq!(default_title("fix the parser"), "fix the parser");
        assert_eq!(default_title("fix\n  the\tparser"), "fix the parser");

        let long = "implement the full set of lifecycle operations for folios \
                    including generation finalization and discard";
        let title = default_title(long);
        assert!(title.len() <= TITLE_LIMIT, "too long: {title}");
        assert!(title.ends_with("..."));
        assert!(title.starts_with("implement the full set"));
    }
}
