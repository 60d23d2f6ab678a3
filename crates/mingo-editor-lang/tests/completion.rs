use mingo_editor_lang::{CompletionKind, KEYWORDS, LanguageConfig, completions};

#[test]
fn test_completion_list_layout() {
    let items = completions("let counter = 1;\nprint(counter);");

    let keywords = items
        .iter()
        .take_while(|item| item.kind == CompletionKind::Keyword)
        .map(|item| item.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keywords, KEYWORDS.to_vec());

    let snippets = items
        .iter()
        .filter(|item| item.is_snippet)
        .map(|item| item.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        snippets,
        vec!["fn snippet", "if snippet", "while snippet", "print"]
    );

    let variables = items
        .iter()
        .filter(|item| item.kind == CompletionKind::Variable)
        .map(|item| item.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(variables, vec!["counter"]);
}

#[test]
fn test_snippet_templates() {
    let items = completions("");
    let fn_snippet = items
        .iter()
        .find(|item| item.label == "fn snippet")
        .expect("fn snippet");
    assert_eq!(fn_snippet.insert_text, "fn ${1:name}(${2:args}) {\n\t$0\n}");
    assert_eq!(fn_snippet.detail.as_deref(), Some("function"));

    let print = items
        .iter()
        .find(|item| item.kind == CompletionKind::Function)
        .expect("print");
    assert_eq!(print.insert_text, "print(${1:expr});");
}

#[test]
fn test_prefix_matching() {
    let items = completions("let whale = 1;");
    let labels = items
        .iter()
        .filter(|item| item.matches("wh"))
        .map(|item| item.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["while", "while snippet", "whale"]);
}

#[test]
fn test_language_config_defaults() {
    let lang = LanguageConfig::default();
    assert!(lang.is_keyword("fn"));
    assert!(lang.matches_path("main.mg"));
}
