//! Wiki rendering configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! [wiki]
//! page_title = "Main Page"
//! base_url = "/wiki/${title}"
//! max_depth = 40
//!
//! [links]
//! base_url = "wiki?title=${title}"
//! ```
//!
//! The `[links]` table is optional. When present, `localurl` builds URLs
//! from its pattern instead of the wiki article path.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Default article path pattern
pub const DEFAULT_WIKI_BASE_URL: &str = "/wiki/${title}";

/// Default nesting limit for directive evaluation
pub const DEFAULT_MAX_DEPTH: usize = 40;

/// Configuration for a rendering context
#[derive(Debug, Clone, PartialEq)]
pub struct WikiConfig {
    /// Title of the page being rendered
    pub page_title: String,
    /// Article path pattern used by the default `localurl`
    pub wiki_base_url: String,
    /// Link base pattern; enables the extended context when set
    pub link_base_url: Option<String>,
    /// Maximum nesting of evaluated directives
    pub max_depth: usize,
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
struct TomlConfig {
    wiki: Option<TomlWiki>,
    links: Option<TomlLinks>,
}

#[derive(Deserialize)]
struct TomlWiki {
    page_title: Option<String>,
    base_url: Option<String>,
    max_depth: Option<usize>,
}

#[derive(Deserialize)]
struct TomlLinks {
    base_url: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            page_title: "Main Page".to_string(),
            wiki_base_url: DEFAULT_WIKI_BASE_URL.to_string(),
            link_base_url: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WikiConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Missing keys keep their defaults.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(wiki) = parsed.wiki {
            if let Some(title) = wiki.page_title {
                config.page_title = title;
            }
            if let Some(url) = wiki.base_url {
                config.wiki_base_url = url;
            }
            if let Some(depth) = wiki.max_depth {
                config.max_depth = depth;
            }
        }
        config.link_base_url = parsed.links.map(|links| links.base_url);

        Ok(config)
    }

    /// Set the title of the page being rendered
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = title.into();
        self
    }

    /// Set the article path pattern
    pub fn with_wiki_base_url(mut self, pattern: impl Into<String>) -> Self {
        self.wiki_base_url = pattern.into();
        self
    }

    /// Set the link base pattern
    pub fn with_link_base_url(mut self, pattern: impl Into<String>) -> Self {
        self.link_base_url = Some(pattern.into());
        self
    }

    /// Remove the link base pattern
    pub fn without_link_base_url(mut self) -> Self {
        self.link_base_url = None;
        self
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
