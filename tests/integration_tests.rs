//! Integration tests for directive expansion

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wiki_localurl::{
    expand, expand_with_config, ExpandError, FunctionRegistry, LinkedWikiModel, RenderingContext,
    Resolution, TemplateError, TemplateFunction, WikiConfig, WikiModel, LOCALURL,
};

const LINK_BASE: &str = "http://example.org/wiki/${title}";

fn linked_config() -> WikiConfig {
    WikiConfig::new().with_link_base_url(LINK_BASE)
}

#[test]
fn test_title_only() {
    let url = expand_with_config("{{localurl:Main Page}}", linked_config()).expect("Should expand");
    assert_eq!(url, "http://example.org/wiki/Main+Page");
    assert!(!url.contains('&'));
}

#[test]
fn test_title_with_query() {
    let url = expand_with_config("{{localurl:Main Page|action=edit}}", linked_config())
        .expect("Should expand");
    assert_eq!(url, "http://example.org/wiki/Main+Page&action=edit");
}

#[test]
fn test_multi_argument_extends_single_argument() {
    let single = expand_with_config("{{localurl:Talk:Zürich}}", linked_config()).unwrap();
    let multi = expand_with_config(
        "{{localurl:Talk:Zürich|action=history|limit=50}}",
        linked_config(),
    )
    .unwrap();
    assert_eq!(multi, format!("{}&action=history&limit=50", single));
}

#[test]
fn test_base_context_falls_back() {
    assert_eq!(
        expand("{{localurl:Main Page}}").expect("Should expand"),
        "/wiki/Main_Page"
    );
}

#[test]
fn test_base_context_resolver_defers() {
    let model = WikiModel::new(WikiConfig::default());
    let args = vec!["Main Page".to_string()];
    let result = LOCALURL.resolve(&args, &model).unwrap();
    assert_eq!(result, Resolution::Deferred);
}

#[test]
fn test_empty_directive_kept() {
    let text = expand_with_config("before {{localurl}} after", linked_config()).unwrap();
    assert_eq!(text, "before {{localurl}} after");
}

#[test]
fn test_nested_title() {
    let config = linked_config().with_page_title("Rust (programming language)");
    let text = expand_with_config("{{localurl:{{PAGENAME}}|action=raw}}", config).unwrap();
    assert_eq!(
        text,
        "http://example.org/wiki/Rust+%28programming+language%29&action=raw"
    );
}

#[test]
fn test_query_fragment_not_encoded() {
    let text = expand_with_config(
        "{{localurl:Search|search={{urlencode:a b&c}}|go=Go}}",
        linked_config(),
    )
    .unwrap();
    assert_eq!(
        text,
        "http://example.org/wiki/Search&search=a+b%26c&go=Go"
    );
}

#[test]
fn test_page_snapshot() {
    let source = "\
== Links ==
* [{{localurl:Main Page}} Home]
* [{{localurl:Main Page|action=edit}} Edit]
* [{{localurl:{{PAGENAME}}|action=history}} History]
* {{unknown|x}} stays
";
    let config = WikiConfig::new()
        .with_page_title("Sandbox")
        .with_link_base_url("wiki?title=${title}");
    let text = expand_with_config(source, config).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r###"
    == Links ==
    * [wiki?title=Main+Page Home]
    * [wiki?title=Main+Page&action=edit Edit]
    * [wiki?title=Sandbox&action=history History]
    * {{unknown|x}} stays
    "###);
}

#[test]
fn test_parse_error_reported() {
    let result = expand("text {{localurl:Main Page");
    match result {
        Err(ExpandError::Parse(errors)) => {
            assert!(!errors.is_empty());
            let report = errors[0].format("text {{localurl:Main Page", "page.wiki");
            assert!(report.contains("page.wiki"));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_depth_limit_error() {
    let config = linked_config().with_max_depth(2);
    let result = expand_with_config("{{localurl:{{lc:{{uc:x}}}}}}", config);
    assert!(matches!(
        result,
        Err(ExpandError::Template(TemplateError::DepthExceeded { limit: 2 }))
    ));
}

#[test]
fn test_deeply_nested_markup_returns_error() {
    let n = 20_000;
    let source = format!("{}x{}", "{{lc:".repeat(n), "}}".repeat(n));
    let result = expand_with_config(&source, linked_config());
    assert!(matches!(
        result,
        Err(ExpandError::Template(TemplateError::DepthExceeded { limit: 40 }))
    ));
}

#[derive(Debug)]
struct Shout;

impl TemplateFunction for Shout {
    fn resolve(
        &self,
        args: &[String],
        ctx: &dyn RenderingContext,
    ) -> Result<Resolution, TemplateError> {
        let mut text = String::new();
        for arg in args {
            text.push_str(&ctx.evaluate(arg)?.to_uppercase());
        }
        text.push('!');
        Ok(Resolution::Resolved(text))
    }
}

#[test]
fn test_custom_function_registry() {
    let mut registry = FunctionRegistry::with_builtins();
    registry
        .register("shout", Arc::new(Shout))
        .expect("Should register");

    let model = LinkedWikiModel::new(
        WikiModel::with_registry(WikiConfig::default(), Arc::new(registry)),
        LINK_BASE,
    );
    let text = model
        .render("{{localurl:{{shout:hi}}|q={{shout:a|b}}}}")
        .unwrap();
    assert_eq!(text, "http://example.org/wiki/HI%21&q=AB!");
}

#[test]
fn test_concurrent_contexts_share_registry() {
    let registry = Arc::new(FunctionRegistry::with_builtins());
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    let model = LinkedWikiModel::new(
                        WikiModel::with_registry(WikiConfig::default(), registry),
                        LINK_BASE,
                    );
                    model.render(&format!("{{{{localurl:Page {}}}}}", i)).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                format!("http://example.org/wiki/Page+{}", i)
            );
        }
    });
}
