//! Integration tests for response normalization.

use answerkit::normalize::{normalize, NormalizeOptions, RawResponse, ResponseKind};
use answerkit::render::collect;
use answerkit::Error;

const WOLFRAM_RESPONSE: &str = r#"{
    "queryresult": {
        "success": true,
        "error": false,
        "numpods": 3,
        "pods": [
            {
                "title": "Input",
                "id": "Input",
                "subpods": [
                    {"title": "", "plaintext": "2 + 2", "img": {"src": "https://img/in.gif", "alt": "2 + 2"}}
                ]
            },
            {
                "title": "Result",
                "id": "Result",
                "subpods": [
                    {"title": "", "plaintext": "4", "img": {"src": "https://img/res.gif", "alt": "4"}}
                ]
            },
            {
                "title": "Number line",
                "id": "NumberLine",
                "subpods": [
                    {"title": "", "plaintext": "", "img": {"src": "https://img/line.gif", "alt": ""}}
                ]
            }
        ]
    }
}"#;

const DDG_RESPONSE: &str = r#"{
    "Abstract": "",
    "AbstractSource": "Wikipedia",
    "AbstractText": "Rust is a general-purpose programming language.",
    "AbstractURL": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
    "Answer": "",
    "Definition": "",
    "DefinitionSource": "",
    "DefinitionURL": "",
    "Heading": "Rust (programming language)",
    "Image": "/i/rust.png",
    "RelatedTopics": [
        {
            "FirstURL": "https://duckduckgo.com/Cargo",
            "Icon": {"Height": "", "URL": "/i/cargo.png", "Width": ""},
            "Result": "<a href=\"https://duckduckgo.com/Cargo\">Cargo</a>",
            "Text": "Cargo - the Rust package manager"
        },
        {
            "Name": "See also",
            "Topics": [
                {"FirstURL": "https://duckduckgo.com/C", "Icon": {"URL": ""}, "Text": "C"}
            ]
        }
    ],
    "Results": [],
    "Type": "A"
}"#;

#[test]
fn test_wolfram_envelope() {
    let raw = RawResponse::from_json_str(WOLFRAM_RESPONSE).unwrap();
    assert_eq!(raw.kind(), ResponseKind::PodTree);

    let result = normalize(&raw, &NormalizeOptions::default()).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result.sections()[1].lines, vec!["4"]);
    assert!(result.sections()[2].lines.is_empty());

    let images = collect(&result);
    assert_eq!(
        images.urls(),
        &["https://img/in.gif", "https://img/res.gif", "https://img/line.gif"]
    );
}

#[test]
fn test_ddg_response() {
    let raw = RawResponse::from_json_str(DDG_RESPONSE).unwrap();
    assert_eq!(raw.kind(), ResponseKind::Search);

    let result = normalize(&raw, &NormalizeOptions::default()).unwrap();
    let titles: Vec<_> = result
        .sections()
        .iter()
        .map(|s| s.title.as_deref().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Abstract: Rust (programming language) (Wikipedia)", "Related"]
    );

    let related = &result.sections()[1];
    assert_eq!(
        related.lines,
        vec!["[**Cargo - the Rust package manager**](https://duckduckgo.com/Cargo)"]
    );
    assert_eq!(related.images, vec!["/i/cargo.png"]);
}

#[test]
fn test_definition_scenario() {
    let raw = RawResponse::from_json_str(
        r#"{"Definition": "A number", "DefinitionSource": "Wiki", "DefinitionURL": "http://x",
            "AbstractURL": "", "Results": []}"#,
    )
    .unwrap();

    let result = normalize(&raw, &NormalizeOptions::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.sections()[0].title.as_deref(), Some("Definition"));
    assert_eq!(result.sections()[0].lines, vec!["A number\n([Wiki](http://x))"]);
}

#[test]
fn test_normalization_is_idempotent() {
    for json in [WOLFRAM_RESPONSE, DDG_RESPONSE] {
        let raw = RawResponse::from_json_str(json).unwrap();
        let first = normalize(&raw, &NormalizeOptions::default()).unwrap();
        let second = normalize(&raw, &NormalizeOptions::default()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_failed_query_is_no_results() {
    let raw = RawResponse::from_json_str(
        r#"{"queryresult": {"success": false, "error": false, "numpods": 0}}"#,
    )
    .unwrap();
    assert!(matches!(
        normalize(&raw, &NormalizeOptions::default()),
        Err(Error::NoResultsFound)
    ));
}

#[test]
fn test_empty_search_is_no_results() {
    let raw = RawResponse::from_json_str(
        r#"{"AbstractURL": "", "Definition": "", "RelatedTopics": [], "Results": []}"#,
    )
    .unwrap();
    assert!(matches!(
        normalize(&raw, &NormalizeOptions::default()),
        Err(Error::NoResultsFound)
    ));
}
