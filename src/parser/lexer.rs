//! Lexer for wiki markup directives using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    // Directive delimiters (longer patterns win over the lone braces below)
    #[token("{{")]
    Open,
    #[token("}}")]
    Close,

    // Argument separators
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,

    // Everything else is text, including a lone brace
    #[regex(r"[^{}|:]+", |lex| lex.slice().to_string())]
    #[token("{", |lex| lex.slice().to_string())]
    #[token("}", |lex| lex.slice().to_string())]
    Text(String),
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Deepest `{{` nesting in the input
///
/// Stray `}}` at the top level do not go below zero.
pub fn nesting_depth(input: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for (token, _) in lex(input) {
        match token {
            Token::Open => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            Token::Close => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
