//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse wiki markup into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let directive = recursive(|directive| {
        // Inside an argument a colon is plain text; pipes and `}}` end it
        let text = select! {
            Token::Text(s) => Node::Text(s),
            Token::Colon => Node::Text(":".to_string()),
        };

        let piece = choice((directive.map(Node::Directive), text))
            .map_with(|node, e| Spanned::new(node, span_range(&e.span())));

        let argument = piece
            .repeated()
            .collect::<Vec<_>>()
            .map(|pieces| Argument { pieces });

        let name = select! { Token::Text(s) => s }
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .map_with(|parts, e| Spanned::new(parts.concat(), span_range(&e.span())));

        // `{{name:first|second|...}}` - the first argument follows the colon
        let first = just(Token::Colon).ignore_then(argument.clone());
        let rest = just(Token::Pipe).ignore_then(argument);

        name.then(first.or_not())
            .then(rest.repeated().collect::<Vec<_>>())
            .delimited_by(just(Token::Open), just(Token::Close))
            .map(|((name, first), rest)| {
                let mut args: Vec<Argument> = first.into_iter().collect();
                args.extend(rest);
                Directive { name, args }
            })
    });

    // Outside a directive every separator is ordinary text
    let text = select! {
        Token::Text(s) => Node::Text(s),
        Token::Colon => Node::Text(":".to_string()),
        Token::Pipe => Node::Text("|".to_string()),
        Token::Close => Node::Text("}}".to_string()),
    };

    choice((directive.map(Node::Directive), text))
        .map_with(|node, e| Spanned::new(node, span_range(&e.span())))
        .repeated()
        .collect::<Vec<_>>()
        .map(|nodes| Document { nodes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(doc: &Document, index: usize) -> &Directive {
        match &doc.nodes[index].node {
            Node::Directive(d) => d,
            other => panic!("Expected Directive, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_plain_text() {
        let doc = parse("just text").expect("Should parse");
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].node, Node::Text("just text".to_string()));
    }

    #[test]
    fn test_parse_empty() {
        let doc = parse("").expect("Should parse");
        assert!(doc.nodes.is_empty());
    }

    #[test]
    fn test_parse_directive_with_arguments() {
        let source = "{{localurl:Main Page|action=edit}}";
        let doc = parse(source).expect("Should parse");
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].span, 0..source.len());

        let d = directive(&doc, 0);
        assert_eq!(d.function_name(), "localurl");
        assert_eq!(d.raw_args(source), vec!["Main Page", "action=edit"]);
    }

    #[test]
    fn test_parse_directive_without_arguments() {
        let source = "{{PAGENAME}}";
        let doc = parse(source).expect("Should parse");
        let d = directive(&doc, 0);
        assert_eq!(d.function_name(), "pagename");
        assert!(d.args.is_empty());
    }

    #[test]
    fn test_parse_empty_first_argument() {
        let source = "{{localurl:}}";
        let doc = parse(source).expect("Should parse");
        let d = directive(&doc, 0);
        assert_eq!(d.raw_args(source), vec![""]);
    }

    #[test]
    fn test_parse_arguments_are_trimmed() {
        let source = "{{ localurl : Main Page | action=edit }}";
        let doc = parse(source).expect("Should parse");
        let d = directive(&doc, 0);
        assert_eq!(d.function_name(), "localurl");
        assert_eq!(d.raw_args(source), vec!["Main Page", "action=edit"]);
    }

    #[test]
    fn test_parse_colon_inside_argument() {
        let source = "{{localurl:Help:Contents}}";
        let doc = parse(source).expect("Should parse");
        let d = directive(&doc, 0);
        assert_eq!(d.raw_args(source), vec!["Help:Contents"]);
    }

    #[test]
    fn test_parse_nested_directive_kept_raw() {
        let source = "{{localurl:{{PAGENAME}}|oldid={{lc:X}}}}";
        let doc = parse(source).expect("Should parse");
        assert_eq!(doc.nodes.len(), 1);
        let d = directive(&doc, 0);
        assert_eq!(d.raw_args(source), vec!["{{PAGENAME}}", "oldid={{lc:X}}"]);
    }

    #[test]
    fn test_parse_text_around_directives() {
        let source = "See {{localurl:A}} and {{localurl:B}}.";
        let doc = parse(source).expect("Should parse");
        assert_eq!(doc.nodes.len(), 5);
        assert_eq!(doc.nodes[0].node, Node::Text("See ".to_string()));
        assert_eq!(&source[doc.nodes[1].span.clone()], "{{localurl:A}}");
        assert_eq!(&source[doc.nodes[3].span.clone()], "{{localurl:B}}");
        assert_eq!(doc.nodes[4].node, Node::Text(".".to_string()));
    }

    #[test]
    fn test_parse_stray_separators_are_text() {
        let doc = parse("a | b: c }}").expect("Should parse");
        assert!(doc
            .nodes
            .iter()
            .all(|n| matches!(n.node, Node::Text(_))));
    }

    #[test]
    fn test_parse_unclosed_directive_error() {
        let result = parse("{{localurl:Main Page");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_name_error() {
        let result = parse("{{}}");
        assert!(result.is_err());
    }
}
