//! Template functions for `{{name: ...}}` directives
//!
//! This module holds the parser functions a rendering context dispatches to,
//! the registry that maps directive names to them, and the `localurl`
//! function that turns a page title into a URL.
//!
//! # Example
//!
//! ```text
//! {{localurl:Main Page}}               -> wiki?title=Main+Page
//! {{localurl:Main Page|action=edit}}   -> wiki?title=Main+Page&action=edit
//! ```

mod builtins;
mod function;
mod localurl;
mod registry;

pub use builtins::{LowerCase, PageName, UpperCase, UrlEncode};
pub use function::{resolve_or_fallback, Resolution, TemplateFunction};
pub use localurl::{DefaultLocalurl, LocalurlFunction, DEFAULT_LOCALURL, LOCALURL, TITLE_PLACEHOLDER};
pub use registry::{FunctionRegistry, TemplateError};
