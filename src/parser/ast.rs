//! Abstract Syntax Tree types for wiki markup

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Root AST node - a parsed page or argument
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub nodes: Vec<Spanned<Node>>,
}

/// A piece of markup
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, copied to the output unchanged
    Text(String),
    /// Template directive: `{{name: arg | arg}}`
    Directive(Directive),
}

/// A `{{name: ...}}` directive
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Function name as written (untrimmed)
    pub name: Spanned<String>,
    /// Arguments in source order
    pub args: Vec<Argument>,
}

impl Directive {
    /// Name used for function lookup: trimmed and lower-cased
    pub fn function_name(&self) -> String {
        self.name.node.trim().to_lowercase()
    }

    /// Raw argument strings, trimmed, with nested directives left unevaluated
    pub fn raw_args(&self, source: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.raw(source).trim().to_string())
            .collect()
    }
}

/// One `|`-separated argument of a directive
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Argument {
    pub pieces: Vec<Spanned<Node>>,
}

impl Argument {
    /// Reconstruct the argument's source text
    ///
    /// `source` must be the text this argument was parsed from.
    pub fn raw(&self, source: &str) -> String {
        let mut raw = String::new();
        for piece in &self.pieces {
            match &piece.node {
                Node::Text(text) => raw.push_str(text),
                Node::Directive(_) => {
                    raw.push_str(source.get(piece.span.clone()).unwrap_or_default())
                }
            }
        }
        raw
    }
}
