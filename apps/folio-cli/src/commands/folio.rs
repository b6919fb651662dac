// folio.rs — Close or abandon the active folio.

use folio_drafter::Drafter;
use folio_git::Repo;
use folio_store::HistoryStore;

pub fn finalize(repo: &Repo, store: &HistoryStore) -> anyhow::Result<()> {
    let origin = Drafter::new(repo, store).finalize_folio()?;
    println!("Folio closed; back on {origin} with the draft's changes in the working tree.");
    Ok(())
}

pub fn discard(repo: &Repo, store: &HistoryStore, revert: bool) -> anyhow::Result<()> {
    let origin = Drafter::new(repo, store).discard_folio(revert)?;
    if revert {
        println!("Folio discarded; {origin} restored to its pre-draft state.");
    } else {
        println!("Folio discarded; back on {origin} with the working tree left as-is.");
    }
    Ok(())
}
