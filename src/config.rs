//! Configuration loader and validator for the neighborhood stories page.
use crate::model::{Story, Venue, TEASER_MAX_CHARS, TITLE_MAX_CHARS};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub page: PageCopy,
    #[serde(default)]
    pub seed_stories: Vec<SeedStory>,
}

/// Fixed copy rendered around the story list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageCopy {
    pub title: String,
    pub tagline: String,
    pub footer: String,
}

/// A built-in sample story, shown before any visitor submissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedStory {
    pub title: String,
    pub teaser: String,
    #[serde(default)]
    pub interest_count: u32,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub open_to_sharing: bool,
}

impl Config {
    /// Materialize the seed stories in listed order, ids assigned 1..n.
    pub fn seed_stories(&self) -> Vec<Story> {
        let now = Utc::now();
        self.seed_stories
            .iter()
            .enumerate()
            .map(|(i, seed)| Story {
                id: i as i64 + 1,
                title: seed.title.clone(),
                teaser: seed.teaser.clone(),
                contact_method: None,
                name: seed.name.clone(),
                open_to_sharing: seed.open_to_sharing,
                venue: seed.venue,
                interest_count: seed.interest_count,
                created_at: now,
            })
            .collect()
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `stories.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("stories.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Load from `path` when the file exists; otherwise fall back to the
/// embedded example document.
pub fn load_or_example(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load(Some(path))
    } else {
        let cfg: Config = serde_yaml::from_str(example())?;
        validate(&cfg)?;
        Ok(cfg)
    }
}

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.page.title.trim().is_empty() {
        return Err(ConfigError::Invalid("page.title must be non-empty"));
    }

    for seed in &cfg.seed_stories {
        if seed.title.trim().is_empty() {
            return Err(ConfigError::Invalid("seed_stories[].title must be non-empty"));
        }
        if seed.title.chars().count() > TITLE_MAX_CHARS {
            return Err(ConfigError::Invalid("seed_stories[].title exceeds 100 characters"));
        }
        if seed.teaser.trim().is_empty() {
            return Err(ConfigError::Invalid("seed_stories[].teaser must be non-empty"));
        }
        if seed.teaser.chars().count() > TEASER_MAX_CHARS {
            return Err(ConfigError::Invalid("seed_stories[].teaser exceeds 200 characters"));
        }
    }

    Ok(())
}

/// The built-in sample page: the six original Outer Sunset stories.
pub fn example() -> &'static str {
    r#"page:
  title: "Little Free Neighborhood Stories"
  tagline: "Stories from the Outer Sunset community"
  footer: "Connected to Little Free Libraries in the Outer Sunset"

seed_stories:
  - title: "The Fog Cat of 48th Avenue"
    teaser: "Every morning, Mrs. Chen spots the same gray cat emerging from the mist..."
    interest_count: 7
  - title: "Sunset Surfers at Dawn"
    teaser: "Before the neighborhood wakes, three friends chase waves at Ocean Beach..."
    interest_count: 2
    venue: ocean_beach_firepit
  - title: "The Corner Store Angel"
    teaser: "When the Ahmad family opened their market, they never expected to become the neighborhood's guardian angels..."
    interest_count: 5
    venue: corner_market
  - title: "Love Letters in the Sand"
    teaser: "Someone has been writing messages in the sand at Noriega Beach for 30 years..."
    interest_count: 9
  - title: "The Mystery of the Singing Stairs"
    teaser: "Every Tuesday at 3 PM, beautiful music echoes from the Moraga Steps..."
    interest_count: 1
    venue: moraga_steps
  - title: "Garden Wisdom from Judah Street"
    teaser: "Maria's front yard garden has fed half the block for three decades..."
    interest_count: 3
    venue: judah_street_parklet
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_example_ok() {
        let cfg: Config = serde_yaml::from_str(example()).unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg.seed_stories.len(), 6);
    }

    #[test]
    fn example_seed_counts_and_ids() {
        let cfg: Config = serde_yaml::from_str(example()).unwrap();
        let stories = cfg.seed_stories();
        let counts: Vec<u32> = stories.iter().map(|s| s.interest_count).collect();
        assert_eq!(counts, vec![7, 2, 5, 9, 1, 3]);
        let ids: Vec<i64> = stories.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn invalid_page_title() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.page.title = "  ".into();
        let err = validate(&cfg).unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("page.title")),
            _ => panic!("wrong error"),
        }
    }

    #[test]
    fn invalid_seed_story_fields() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.seed_stories[0].title = "".into();
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.seed_stories[0].teaser = " ".into();
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.seed_stories[0].title = "x".repeat(101);
        let err = validate(&cfg).unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("100")),
            _ => panic!("wrong error"),
        }
    }

    #[test]
    fn load_from_file_ok() {
        let td = tempdir().unwrap();
        let p = td.path().join("stories.yaml");
        fs::write(&p, example()).unwrap();
        let cfg = load(Some(&p)).unwrap();
        assert_eq!(cfg.page.title, "Little Free Neighborhood Stories");
    }

    #[test]
    fn load_or_example_falls_back_when_missing() {
        let td = tempdir().unwrap();
        let missing = td.path().join("nope.yaml");
        let cfg = load_or_example(&missing).unwrap();
        assert_eq!(cfg.seed_stories.len(), 6);
    }
}
