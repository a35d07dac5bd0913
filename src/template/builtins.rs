//! Small companion parser functions: `urlencode`, `lc`, `uc`, `pagename`

use crate::context::RenderingContext;
use crate::encoding::encode_query;

use super::function::{Resolution, TemplateFunction};
use super::registry::TemplateError;

/// `{{urlencode:text}}` - query-encode the evaluated text
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEncode;

impl TemplateFunction for UrlEncode {
    fn resolve(
        &self,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError> {
        match args.first() {
            Some(text) => Ok(Resolution::Resolved(encode_query(&ctx.evaluate(text)?))),
            None => Ok(Resolution::Deferred),
        }
    }
}

/// `{{lc:text}}` - lower-case the evaluated text
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCase;

impl TemplateFunction for LowerCase {
    fn resolve(
        &self,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError> {
        match args.first() {
            Some(text) => Ok(Resolution::Resolved(ctx.evaluate(text)?.to_lowercase())),
            None => Ok(Resolution::Deferred),
        }
    }
}

/// `{{uc:text}}` - upper-case the evaluated text
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl TemplateFunction for UpperCase {
    fn resolve(
        &self,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError> {
        match args.first() {
            Some(text) => Ok(Resolution::Resolved(ctx.evaluate(text)?.to_uppercase())),
            None => Ok(Resolution::Deferred),
        }
    }
}

/// `{{PAGENAME}}` - title of the page being rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct PageName;

impl TemplateFunction for PageName {
    fn resolve(
        &self,
        _args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError> {
        Ok(Resolution::Resolved(ctx.page_title().to_string()))
    }
}
