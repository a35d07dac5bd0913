//! The template function contract and fallback delegation

use std::fmt::Debug;

use crate::context::RenderingContext;

use super::registry::TemplateError;

/// Outcome of resolving a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The function produced text
    Resolved(String),
    /// No result; the caller should try its fallback
    Deferred,
}

impl Resolution {
    /// True when the caller should try its fallback
    pub fn is_deferred(&self) -> bool {
        matches!(self, Resolution::Deferred)
    }
}

/// A parser function invoked for `{{name: ...}}` directives
///
/// Implementations are stateless and shared across threads.
pub trait TemplateFunction: Send + Sync + Debug {
    /// Resolve the directive's raw arguments against a rendering context
    fn resolve(
        &self,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError>;

    /// Function to delegate to when this one defers
    fn fallback(&self) -> Option<&dyn TemplateFunction> {
        None
    }
}

/// Resolve with `function`, walking its fallback chain on deferral
///
/// Returns `None` when every function in the chain defers.
pub fn resolve_or_fallback(
    function: &dyn TemplateFunction,
    args: &[String],
    ctx: &dyn RenderingContext,
) -> Result<Option<String>, TemplateError> {
    let mut current = Some(function);
    while let Some(f) = current {
        match f.resolve(args, ctx)? {
            Resolution::Resolved(text) => {
                tracing::trace!(function = ?f, %text, "resolved");
                return Ok(Some(text));
            }
            Resolution::Deferred => {
                tracing::debug!(function = ?f, "deferred to fallback");
                current = f.fallback();
            }
        }
    }
    Ok(None)
}
