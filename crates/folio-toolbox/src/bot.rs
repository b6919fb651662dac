// bot.rs — The consumed bot capability.
//
// The drafter depends only on this interface; concrete bots (HTTP-backed
// LLM clients, subprocess agents) live outside this workspace. MappingBot
// is the deterministic double used in tests and for CLI smoke runs.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::toolbox::Toolbox;

/// What a bot is asked to accomplish.
#[derive(Debug, Clone)]
pub struct Goal {
    pub prompt: String,
    /// Advisory deadline; enforcement is the bot's responsibility.
    pub timeout: Option<Duration>,
}

impl Goal {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            timeout: None,
        }
    }
}

/// Summary returned by one bot invocation.
#[derive(Debug, Clone, Default)]
pub struct BotAction {
    /// Commit title; when absent the drafter derives one from the prompt.
    pub title: Option<String>,
    pub request_count: Option<u64>,
    pub token_count: Option<u64>,
}

/// A code-generation agent, awaited as a single blocking unit.
pub trait Bot {
    fn act(
        &mut self,
        goal: &Goal,
        toolbox: &mut dyn Toolbox,
    ) -> Result<BotAction, Box<dyn std::error::Error + Send + Sync>>;

    /// Identity recorded with each action, e.g. a type path or config name.
    fn class_name(&self) -> &str;
}

/// Deterministic bot that applies a path → content mapping.
///
/// `Some(content)` writes the file, `None` deletes it. Entries are applied
/// in path order.
pub struct MappingBot {
    contents: BTreeMap<String, Option<String>>,
}

impl MappingBot {
    pub fn new(contents: BTreeMap<String, Option<String>>) -> Self {
        Self { contents }
    }

    /// A bot that performs no operations at all.
    pub fn noop() -> Self {
        Self::new(BTreeMap::new())
    }

    /// A bot that writes a single file.
    pub fn writing(path: impl Into<String>, contents: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(path.into(), Some(contents.into()));
        Self::new(map)
    }

    /// A bot that deletes a single file.
    pub fn deleting(path: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(path.into(), None);
        Self::new(map)
    }
}

impl Bot for MappingBot {
    fn act(
        &mut self,
        _goal: &Goal,
        toolbox: &mut dyn Toolbox,
    ) -> Result<BotAction, Box<dyn std::error::Error + Send + Sync>> {
        for (path, value) in &self.contents {
            match value {
                Some(contents) => toolbox.write_file(path, contents, None)?,
                None => toolbox.delete_file(path, None)?,
            }
        }
        Ok(BotAction::default())
    }

    fn class_name(&self) -> &str {
        "folio_toolbox::bot::MappingBot"
    }
}
