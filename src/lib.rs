//! wiki-localurl - resolve `{{localurl: ...}}` directives in wiki markup
//!
//! This library provides a small markup parser, rendering contexts and the
//! `localurl` parser function, which turns a page title and optional query
//! fragments into a URL.
//!
//! # Example
//!
//! ```rust
//! use wiki_localurl::{expand_with_config, WikiConfig};
//!
//! let config = WikiConfig::new().with_link_base_url("http://example.org/wiki/${title}");
//! let url = expand_with_config("{{localurl:Main Page|action=edit}}", config).unwrap();
//! assert_eq!(url, "http://example.org/wiki/Main+Page&action=edit");
//! ```

pub mod config;
pub mod context;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod parser;
pub mod template;

pub use config::{ConfigError, WikiConfig};
pub use context::{ExtendedContext, LinkedWikiModel, RenderingContext, WikiModel};
pub use error::ParseError;
pub use parser::{parse, Document};
pub use template::{
    FunctionRegistry, LocalurlFunction, Resolution, TemplateError, TemplateFunction, LOCALURL,
};

use thiserror::Error;

/// Errors that can occur while expanding markup
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while resolving a directive
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

impl From<Vec<ParseError>> for ExpandError {
    fn from(errors: Vec<ParseError>) -> Self {
        ExpandError::Parse(errors)
    }
}

pub(crate) fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Expand wiki markup with the default configuration
///
/// Without a link base, `localurl` falls back to the plain article path.
///
/// # Example
///
/// ```rust
/// use wiki_localurl::expand;
///
/// let text = expand("See {{localurl:Main Page}}.").unwrap();
/// assert_eq!(text, "See /wiki/Main_Page.");
/// ```
pub fn expand(source: &str) -> Result<String, ExpandError> {
    expand_with_config(source, WikiConfig::default())
}

/// Expand wiki markup with a custom configuration
///
/// A configured link base URL selects the extended rendering context.
pub fn expand_with_config(source: &str, config: WikiConfig) -> Result<String, ExpandError> {
    let link_base_url = config.link_base_url.clone();
    let model = WikiModel::new(config);

    match link_base_url {
        Some(link_base_url) => {
            tracing::debug!(%link_base_url, "rendering with link base");
            LinkedWikiModel::new(model, link_base_url).render(source)
        }
        None => model.render(source),
    }
}
