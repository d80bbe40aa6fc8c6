use std::collections::HashMap;

use composition::{ContentParser, Fragment, filter_head_fragment, head_properties};
use composition_test_support::fixtures::{NAVIGATION_HEAD, PRODUCT_UI_HTML};
use composition_test_support::strip_whitespace;

fn filter(head: &str, properties: &[(&str, &str)]) -> String {
    let properties: HashMap<String, String> = properties
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut fragment = Fragment::text(head);
    filter_head_fragment(&mut fragment, &properties).unwrap();
    fragment.content().to_string()
}

#[test]
fn title_filter_keeps_surrounding_whitespace() {
    let filtered = filter(NAVIGATION_HEAD, &[("title", "title")]);
    assert_eq!(
        filtered,
        NAVIGATION_HEAD.replace("<title>navigationservice</title>", "")
    );
}

#[test]
fn meta_filter_removes_charset_and_named_meta() {
    let filtered = filter(
        NAVIGATION_HEAD,
        &[
            ("meta_charset", "whatever"),
            ("meta_name_viewport", "already_exists"),
        ],
    );
    let expected = NAVIGATION_HEAD
        .replace(r#"<meta charset="utf-8">"#, "")
        .replace(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#,
            "",
        );
    assert_eq!(strip_whitespace(&filtered), strip_whitespace(&expected));
    assert!(filtered.contains(r#"<meta name="blub""#));
    assert!(filtered.contains("<title>navigationservice</title>"));
}

#[test]
fn stacking_a_second_head_drops_duplicates() {
    let first = Fragment::text(NAVIGATION_HEAD);
    let known = head_properties(&first).unwrap();
    assert!(known.contains_key("title"));
    assert!(known.contains_key("meta_name_blub"));

    let content = ContentParser::default().parse_str(PRODUCT_UI_HTML).unwrap();
    let mut second = content.head().cloned().unwrap();
    filter_head_fragment(&mut second, &known).unwrap();

    let text = second.content();
    assert!(!text.contains("<title>"), "{text}");
    assert!(!text.contains("charset"), "{text}");
    assert!(!text.contains(r#"name="viewport""#), "{text}");
    assert!(text.contains(r#"<meta name="generator" content="TYPO3 CMS">"#));
    assert!(text.contains(r#"<meta name="robots" content="noindex">"#));
    assert!(text.contains(r#"<base href="/">"#));
}
