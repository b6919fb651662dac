// history.rs — Inspect recorded folios and prompts.

use anyhow::Context;

use folio_drafter::Drafter;
use folio_git::Repo;
use folio_store::HistoryStore;

pub fn folios(repo: &Repo, store: &HistoryStore) -> anyhow::Result<()> {
    let folios = store.list_folios(repo.uuid())?;
    if folios.is_empty() {
        println!("No folios recorded for this repository.");
        return Ok(());
    }

    println!("{:<6} {:<16} {:<12} {:<8} CREATED", "ID", "ORIGIN", "COMMIT", "PROMPTS");
    for folio in folios {
        let sha = &folio.origin_commit[..folio.origin_commit.len().min(10)];
        println!(
            "{:<6} {:<16} {:<12} {:<8} {}",
            folio.id, folio.origin_branch, sha, folio.prompt_count, folio.created_at
        );
    }
    Ok(())
}

pub fn prompts(repo: &Repo, store: &HistoryStore, folio_id: Option<i64>) -> anyhow::Result<()> {
    let folio_id = match folio_id {
        Some(id) => id,
        None => Drafter::new(repo, store)
            .active_folio()?
            .context("not on a draft branch; pass --folio")?
            .folio_id(),
    };

    let prompts = store.list_prompts(repo.uuid(), folio_id)?;
    if prompts.is_empty() {
        println!("No prompts recorded for folio {folio_id}.");
        return Ok(());
    }
    for prompt in prompts {
        println!("--- prompt {} ({})", prompt.seqno, prompt.created_at);
        println!("{}", prompt.contents);
    }
    Ok(())
}

pub fn recall(repo: &Repo, store: &HistoryStore) -> anyhow::Result<()> {
    match Drafter::new(repo, store).latest_prompt()? {
        Some(prompt) => println!("{prompt}"),
        None => println!("No prompt to recall."),
    }
    Ok(())
}
