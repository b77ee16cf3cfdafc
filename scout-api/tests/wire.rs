use scout_api::limits::{enforce_max_response_size, LimitError, MAX_RESPONSE_BYTES};
use scout_api::request::SearchRequest;
use scout_api::response::SearchResponse;
use scout_api::result::SearchResult;
use scout_api::status;

#[test]
fn result_fields_default_to_empty() {
    let result = SearchResult::default();
    assert!(result.location.is_empty());
    assert_eq!(result.content_type, "");
    assert_eq!(result.excerpt, "");
    assert_eq!(result.url, "");
}

#[test]
fn parses_documented_response_shape() {
    let body = br#"{
        "total": 1,
        "results": [{
            "data": {
                "location": ["section", "subsection", "unit"],
                "url": "/some/url/to/content",
                "content_type": "text",
                "excerpt": "this is a short excerpt"
            }
        }]
    }"#;
    let resp = SearchResponse::from_slice(body).expect("valid body");
    assert_eq!(resp.total, 1);
    assert_eq!(resp.results.len(), 1);
    let first = &resp.results[0].data;
    assert_eq!(first.location, vec!["section", "subsection", "unit"]);
    assert_eq!(first.url, "/some/url/to/content");
    assert_eq!(first.content_type, "text");
    assert_eq!(first.excerpt, "this is a short excerpt");
}

#[test]
fn tolerates_unknown_and_missing_fields() {
    let body = br#"{"total": 2, "results": [{"data": {"url": "/a", "score": 0.3}}], "took_ms": 4}"#;
    let resp = SearchResponse::from_slice(body).expect("valid body");
    assert_eq!(resp.total, 2);
    let first = &resp.results[0].data;
    assert_eq!(first.url, "/a");
    assert!(first.location.is_empty());
    assert_eq!(first.excerpt, "");
}

#[test]
fn rejects_malformed_json() {
    assert!(SearchResponse::from_slice(b"not json").is_err());
}

#[test]
fn into_results_unwraps_data_envelopes() {
    let body = br#"{"total": 2, "results": [{"data": {"url": "/a"}}, {"data": {"url": "/b"}}]}"#;
    let results = SearchResponse::from_slice(body).expect("valid body").into_results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "/a");
    assert_eq!(results[1].url, "/b");
}

#[test]
fn request_serializes_term_and_page() {
    let req = SearchRequest::new("search string", 3);
    let body = req.to_json().expect("serializable");
    let v: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(v["search_term"], "search string");
    assert_eq!(v["page_index"], 3);
}

#[test]
fn enforces_response_size_cap() {
    assert!(enforce_max_response_size(MAX_RESPONSE_BYTES).is_ok());
    match enforce_max_response_size(MAX_RESPONSE_BYTES + 1) {
        Err(LimitError::TooLarge { actual, .. }) => assert_eq!(actual, MAX_RESPONSE_BYTES + 1),
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn only_2xx_counts_as_success() {
    assert!(status::is_success(200));
    assert!(status::is_success(204));
    assert!(!status::is_success(199));
    assert!(!status::is_success(301));
    assert!(!status::is_success(404));
    assert!(!status::is_success(500));
}
