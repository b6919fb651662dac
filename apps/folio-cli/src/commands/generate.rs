// generate.rs — Run a bot and record the result as a draft.

use std::io::Read as _;
use std::time::Duration;

use anyhow::Context;
use clap::Args;

use folio_drafter::{Accept, Draft, Drafter, GenerateOptions, MergeStrategy};
use folio_git::Repo;
use folio_store::HistoryStore;

use crate::config::Config;
use crate::printer::ToolPrinter;

#[derive(Args)]
pub struct GenerateArgs {
    /// Prompt text; read from stdin when omitted.
    prompt: Option<String>,

    /// Configured bot to run.
    #[arg(long, default_value = "default")]
    bot: String,

    /// Also apply the draft's changes to the working tree.
    #[arg(long)]
    checkout: bool,

    /// Apply the changes and close the folio in one step.
    #[arg(long, conflicts_with = "checkout")]
    finalize: bool,

    /// On conflicting hunks, keep the draft's side.
    #[arg(long)]
    theirs: bool,

    /// Unstage pending changes instead of refusing to run.
    #[arg(long)]
    reset: bool,

    /// Advisory bot timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Don't echo tool operations while the bot works.
    #[arg(long)]
    quiet: bool,
}

pub fn execute(
    args: &GenerateArgs,
    repo: &Repo,
    store: &HistoryStore,
    config: &Config,
) -> anyhow::Result<()> {
    let prompt = match &args.prompt {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading prompt from stdin")?;
            buffer
        }
    };

    let mut bot = config.bot(&args.bot)?;
    let accept = if args.finalize {
        Accept::Finalize
    } else if args.checkout {
        Accept::Checkout
    } else {
        Accept::Manual
    };
    let strategy = if args.theirs {
        MergeStrategy::Theirs
    } else {
        MergeStrategy::default()
    };
    let mut options = GenerateOptions {
        accept,
        strategy,
        reset: args.reset,
        bot_name: Some(args.bot.clone()),
        timeout: args.timeout.map(Duration::from_secs),
        observers: Vec::new(),
    };
    if !args.quiet {
        options.observers.push(Box::new(ToolPrinter));
    }

    let draft = Drafter::new(repo, store).generate_draft(&prompt, bot.as_mut(), options)?;
    report(&draft, accept);
    Ok(())
}

fn report(draft: &Draft, accept: Accept) {
    let sha = draft.commit.as_str();
    let short = &sha[..sha.len().min(10)];
    println!(
        "Recorded draft {}/{} as commit {short}.",
        draft.folio_id, draft.seqno
    );
    match accept {
        Accept::Manual => println!(
            "Changes are committed on {}; apply or finalize them when ready.",
            draft.branch
        ),
        Accept::Checkout => {
            println!("Changes are in the working tree; finalize or discard when done.")
        }
        Accept::Finalize => {
            println!("Folio closed; changes are in the working tree on the origin branch.")
        }
    }
}
