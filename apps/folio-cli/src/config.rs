// config.rs — CLI configuration from config.toml.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use folio_toolbox::{Bot, MappingBot};

/// Contents of `<config dir>/folio/config.toml`. Everything is optional;
/// a missing file means defaults throughout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Override for the history database location.
    pub store_path: Option<PathBuf>,

    /// Named bots runnable from the command line.
    #[serde(default)]
    pub bots: BTreeMap<String, BotConfig>,
}

/// One configured bot.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BotConfig {
    /// Deterministic bot driven by a path -> contents JSON mapping file;
    /// `null` contents delete the path. Useful for scripted runs and smoke
    /// tests of the lifecycle itself.
    Mapping { path: PathBuf },
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_file() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Location of the history database, creating its directory if needed.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        let dir = dirs::data_dir()
            .context("no data directory available; set store_path in config.toml")?
            .join("folio");
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(dir.join("history.db"))
    }

    /// Instantiate a configured bot by name.
    pub fn bot(&self, name: &str) -> anyhow::Result<Box<dyn Bot>> {
        let bot = self
            .bots
            .get(name)
            .with_context(|| format!("no bot named {name} in the configuration"))?;
        match bot {
            BotConfig::Mapping { path } => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading bot mapping {}", path.display()))?;
                let contents: BTreeMap<String, Option<String>> = serde_json::from_str(&text)
                    .with_context(|| format!("parsing bot mapping {}", path.display()))?;
                Ok(Box::new(MappingBot::new(contents)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.store_path.is_none());
        assert!(config.bots.is_empty());
    }

    #[test]
    fn bots_are_parsed_by_kind() {
        let config: Config = toml::from_str(
            r#"
            store_path = "/tmp/history.db"

            [bots.scripted]
            kind = "mapping"
            path = "/tmp/mapping.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.store_path.as_deref(), Some(Path::new("/tmp/history.db")));
        assert!(matches!(
            config.bots.get("scripted"),
            Some(BotConfig::Mapping { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = toml::from_str::<Config>("store_paht = \"/tmp/x\"");
        assert!(result.is_err());
    }

    #[test]
    fn mapping_bot_loads_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"a.txt": "hi", "b.txt": null}}"#).unwrap();

        let mut config = Config::default();
        config.bots.insert(
            "scripted".to_string(),
            BotConfig::Mapping {
                path: file.path().to_path_buf(),
            },
        );

        let bot = config.bot("scripted").unwrap();
        assert_eq!(bot.class_name(), "folio_toolbox::bot::MappingBot");
        assert!(config.bot("missing").is_err());
    }
}
