//! Rendering contexts - expand wiki markup by dispatching directives
//!
//! A [`WikiModel`] is the base context: it parses markup, evaluates nested
//! directives and exposes the plain wiki article path. A [`LinkedWikiModel`]
//! wraps one and adds the [`ExtendedContext`] capability, a link base URL
//! pattern used by `localurl`.

use std::cell::Cell;
use std::sync::Arc;

use crate::config::WikiConfig;
use crate::parser::{nesting_depth, parse, Document, Node};
use crate::template::{FunctionRegistry, TemplateError};
use crate::{format_parse_errors, ExpandError};

/// Capabilities available while resolving one template directive
pub trait RenderingContext {
    /// Expand any nested directives in a raw argument
    fn evaluate(&self, raw: &str) -> Result<String, TemplateError>;

    /// Title of the page being rendered
    fn page_title(&self) -> &str;

    /// Article path pattern containing the `${title}` placeholder
    fn wiki_base_url(&self) -> &str;

    /// The extended capability, if this context has it
    fn as_extended(&self) -> Option<&dyn ExtendedContext> {
        None
    }
}

/// A context exposing a configurable link base URL
pub trait ExtendedContext: RenderingContext {
    /// URL pattern containing the `${title}` placeholder
    fn link_base_url(&self) -> &str;
}

/// Base rendering context
#[derive(Debug)]
pub struct WikiModel {
    config: WikiConfig,
    registry: Arc<FunctionRegistry>,
    depth: Cell<usize>,
}

impl WikiModel {
    /// Create a context with the builtin functions
    pub fn new(config: WikiConfig) -> Self {
        Self::with_registry(config, Arc::new(FunctionRegistry::with_builtins()))
    }

    /// Create a context sharing an existing registry
    pub fn with_registry(config: WikiConfig, registry: Arc<FunctionRegistry>) -> Self {
        Self {
            config,
            registry,
            depth: Cell::new(0),
        }
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Expand a page's markup
    pub fn render(&self, source: &str) -> Result<String, ExpandError> {
        self.expand_in(source, self)
    }

    /// Parse `source` and expand it with `ctx` as the context of every directive
    ///
    /// Each call counts as one nesting level, and `{{` nested inside
    /// `source` count against the same limit before it is parsed.
    fn expand_in(&self, source: &str, ctx: &dyn RenderingContext) -> Result<String, ExpandError> {
        let depth = self.depth.get();
        let limit = self.config.max_depth;
        if depth >= limit || depth + nesting_depth(source) > limit {
            tracing::warn!(limit, "template nesting limit reached");
            return Err(TemplateError::DepthExceeded { limit }.into());
        }

        self.depth.set(depth + 1);
        let result = parse(source)
            .map_err(ExpandError::from)
            .and_then(|doc| self.expand_document(&doc, source, ctx));
        self.depth.set(depth);
        result
    }

    fn expand_document(
        &self,
        doc: &Document,
        source: &str,
        ctx: &dyn RenderingContext,
    ) -> Result<String, ExpandError> {
        let mut out = String::with_capacity(source.len());
        for node in &doc.nodes {
            match &node.node {
                Node::Text(text) => out.push_str(text),
                Node::Directive(directive) => {
                    let name = directive.function_name();
                    let args = directive.raw_args(source);
                    match self.registry.invoke(&name, &args, ctx)? {
                        Some(text) => out.push_str(&text),
                        None => out.push_str(source.get(node.span.clone()).unwrap_or_default()),
                    }
                }
            }
        }
        Ok(out)
    }

    /// Evaluate a nested argument, reporting markup errors as template errors
    fn evaluate_in(&self, raw: &str, ctx: &dyn RenderingContext) -> Result<String, TemplateError> {
        self.expand_in(raw, ctx).map_err(|err| match err {
            ExpandError::Template(err) => err,
            ExpandError::Parse(errors) => TemplateError::Markup {
                message: format_parse_errors(&errors),
            },
        })
    }
}

impl RenderingContext for WikiModel {
    fn evaluate(&self, raw: &str) -> Result<String, TemplateError> {
        self.evaluate_in(raw, self)
    }

    fn page_title(&self) -> &str {
        &self.config.page_title
    }

    fn wiki_base_url(&self) -> &str {
        &self.config.wiki_base_url
    }
}

/// Rendering context with a link base URL
#[derive(Debug)]
pub struct LinkedWikiModel {
    base: WikiModel,
    link_base_url: String,
}

impl LinkedWikiModel {
    pub fn new(base: WikiModel, link_base_url: impl Into<String>) -> Self {
        Self {
            base,
            link_base_url: link_base_url.into(),
        }
    }

    pub fn base(&self) -> &WikiModel {
        &self.base
    }

    /// Expand a page's markup
    pub fn render(&self, source: &str) -> Result<String, ExpandError> {
        self.base.expand_in(source, self)
    }
}

impl RenderingContext for LinkedWikiModel {
    fn evaluate(&self, raw: &str) -> Result<String, TemplateError> {
        // Nested directives keep seeing the link base
        self.base.evaluate_in(raw, self)
    }

    fn page_title(&self) -> &str {
        self.base.page_title()
    }

    fn wiki_base_url(&self) -> &str {
        self.base.wiki_base_url()
    }

    fn as_extended(&self) -> Option<&dyn ExtendedContext> {
        Some(self as &dyn ExtendedContext)
    }
}

impl ExtendedContext for LinkedWikiModel {
    fn link_base_url(&self) -> &str {
        &self.link_base_url
    }
}
