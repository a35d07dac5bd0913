//! The `{{localurl: title | query | ...}}` parser function
//!
//! [`LocalurlFunction`] builds URLs from the configurable link base of an
//! [`ExtendedContext`]. Any other context makes it defer to its fallback,
//! [`DefaultLocalurl`], which uses the plain wiki article path instead.
//!
//! Only the title is percent-encoded. Query arguments are appended after a
//! `&` exactly as they evaluate, so callers must pass ready-made `key=value`
//! fragments.

use crate::context::{ExtendedContext, RenderingContext};
use crate::encoding::{encode_query, encode_title};

use super::function::{Resolution, TemplateFunction};
use super::registry::TemplateError;

/// Placeholder replaced by the encoded title in URL base patterns
pub const TITLE_PLACEHOLDER: &str = "${title}";

/// Shared `localurl` instance, falling back to [`DEFAULT_LOCALURL`]
pub static LOCALURL: LocalurlFunction = LocalurlFunction::new(&DEFAULT_LOCALURL);

/// Shared default `localurl` resolver
pub static DEFAULT_LOCALURL: DefaultLocalurl = DefaultLocalurl;

/// `localurl` backed by the context's link base URL
#[derive(Debug, Clone, Copy)]
pub struct LocalurlFunction {
    fallback: &'static dyn TemplateFunction,
}

impl LocalurlFunction {
    /// Create a resolver delegating to `fallback` when it defers
    pub const fn new(fallback: &'static dyn TemplateFunction) -> Self {
        Self { fallback }
    }

    /// Resolve against an extended context
    fn resolve_extended(
        &self,
        args: &[String],
        ctx: &dyn ExtendedContext,
    ) -> Result<Resolution, TemplateError> {
        let Some((title, query)) = args.split_first() else {
            return Ok(Resolution::Deferred);
        };

        let title = ctx.evaluate(title)?;
        let base = ctx
            .link_base_url()
            .replace(TITLE_PLACEHOLDER, &encode_query(&title));

        if query.is_empty() {
            return Ok(Resolution::Resolved(base));
        }
        append_query(base, query, ctx).map(Resolution::Resolved)
    }
}

impl TemplateFunction for LocalurlFunction {
    fn resolve(
        &self,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError> {
        match ctx.as_extended() {
            Some(extended) => self.resolve_extended(args, extended),
            None => Ok(Resolution::Deferred),
        }
    }

    fn fallback(&self) -> Option<&dyn TemplateFunction> {
        Some(self.fallback)
    }
}

/// `localurl` against the plain wiki article path
///
/// Works with any context. The title is encoded as a page path (spaces
/// become underscores).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocalurl;

impl TemplateFunction for DefaultLocalurl {
    fn resolve(
        &self,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError> {
        let Some((title, query)) = args.split_first() else {
            return Ok(Resolution::Deferred);
        };

        let title = ctx.evaluate(title)?;
        let base = ctx
            .wiki_base_url()
            .replace(TITLE_PLACEHOLDER, &encode_title(&title));

        if query.is_empty() {
            return Ok(Resolution::Resolved(base));
        }
        append_query(base, query, ctx).map(Resolution::Resolved)
    }
}

/// Append each evaluated query argument after a `&`, unencoded
fn append_query<C>(base: String, query: &[String], ctx: &C) -> Result<String, TemplateError>
where
    C: RenderingContext + ?Sized,
{
    let mut url = String::with_capacity(base.len() + 32);
    url.push_str(&base);
    for arg in query {
        url.push('&');
        url.push_str(&ctx.evaluate(arg)?);
    }
    Ok(url)
}
