//! Function registry for looking up parser functions by directive name

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::context::RenderingContext;

use super::builtins::{LowerCase, PageName, UpperCase, UrlEncode};
use super::function::{resolve_or_fallback, TemplateFunction};
use super::localurl::LOCALURL;

/// Errors that can occur while resolving template directives
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Duplicate function registration
    #[error("duplicate template function: {name}")]
    Duplicate { name: String },

    /// Nested evaluation went deeper than the configured limit
    #[error("template nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    /// An argument could not be parsed as markup
    #[error("invalid markup in template argument: {message}")]
    Markup { message: String },
}

/// Registry mapping directive names to parser functions
///
/// Names are case-insensitive.
#[derive(Debug, Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn TemplateFunction>>,
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with `localurl`, `urlencode`, `lc`, `uc` and `pagename`
    pub fn with_builtins() -> Self {
        let mut functions: HashMap<String, Arc<dyn TemplateFunction>> = HashMap::new();
        functions.insert("localurl".to_string(), Arc::new(LOCALURL));
        functions.insert("urlencode".to_string(), Arc::new(UrlEncode));
        functions.insert("lc".to_string(), Arc::new(LowerCase));
        functions.insert("uc".to_string(), Arc::new(UpperCase));
        functions.insert("pagename".to_string(), Arc::new(PageName));
        Self { functions }
    }

    /// Register a function under `name`
    pub fn register(
        &mut self,
        name: &str,
        function: Arc<dyn TemplateFunction>,
    ) -> Result<(), TemplateError> {
        let name = name.trim().to_lowercase();
        if self.functions.contains_key(&name) {
            return Err(TemplateError::Duplicate { name });
        }
        self.functions.insert(name, function);
        Ok(())
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn TemplateFunction>> {
        self.functions.get(&name.trim().to_lowercase())
    }

    /// Check if a function exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all registered names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|s| s.as_str())
    }

    /// Invoke the named function, following its fallback chain
    ///
    /// Returns `None` for unknown names and when every function in the chain
    /// defers; the caller then keeps the directive text as written.
    pub fn invoke(
        &self,
        name: &str,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Option<String>, TemplateError> {
        match self.get(name) {
            Some(function) => resolve_or_fallback(function.as_ref(), args, ctx),
            None => {
                tracing::debug!(name, "no template function registered");
                Ok(None)
            }
        }
    }
}
