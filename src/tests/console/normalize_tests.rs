use serde_json::json;

use super::*;

fn response(content_type: &str, body: &[u8]) -> ProxyResponse {
    ProxyResponse::new(
        200,
        "OK",
        vec![("Content-Type".to_string(), content_type.to_string())],
        body.to_vec(),
    )
}

#[test]
fn surfacing_is_decided_by_expression_text() {
    assert!(should_surface("host.getLocale()"));
    assert!(should_surface("host.getTeamInfo()"));
    assert!(should_surface(r#"  host.fetch("/v2/account/teams")"#));

    assert!(!should_surface(r#"host.ui.toast({ title: "hi" })"#));
    assert!(!should_surface(r#"host.ui.modal({ title: "hi" })"#));
    assert!(!should_surface(""));
    // The classification is purely textual; it does not parse.
    assert!(!should_surface(r#"toast host.getLocale()"#));
}

#[test]
fn scalar_values_render_as_text() {
    match normalize(EvalValue::Undefined) {
        NormalizedDisplay::Text(s) => assert_eq!(s, "undefined"),
        other => panic!("unexpected {other:?}"),
    }
    match normalize(EvalValue::Json(Value::Null)) {
        NormalizedDisplay::Text(s) => assert_eq!(s, "null"),
        other => panic!("unexpected {other:?}"),
    }
    // Strings pass through without quoting.
    match normalize(EvalValue::Json(json!("en-US"))) {
        NormalizedDisplay::Text(s) => assert_eq!(s, "en-US"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn structured_json_renders_compact() {
    match normalize(EvalValue::Json(json!({ "teamUUID": "t-1" }))) {
        NormalizedDisplay::Text(s) => assert_eq!(s, r#"{"teamUUID":"t-1"}"#),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn json_response_keeps_the_full_body() {
    let resp = response("application/json", br#"{"data":{"teams":[]}}"#);
    match normalize(EvalValue::Response(resp)) {
        NormalizedDisplay::Summary(summary) => {
            assert_eq!(summary.status, 200);
            assert_eq!(summary.status_text, "OK");
            assert_eq!(summary.body, json!({ "data": { "teams": [] } }));
            assert!(!summary.truncated);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn long_text_body_is_truncated_with_marker() {
    let long = "x".repeat(TEXT_BODY_LIMIT + 100);
    let resp = response("text/plain", long.as_bytes());
    match normalize(EvalValue::Response(resp)) {
        NormalizedDisplay::Summary(summary) => {
            assert!(summary.truncated);
            let body = summary.body.as_str().expect("string body");
            assert_eq!(
                body.chars().count(),
                TEXT_BODY_LIMIT + TRUNCATION_MARKER.len()
            );
            assert!(body.ends_with(TRUNCATION_MARKER));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn body_at_exactly_the_limit_is_not_truncated() {
    let exact = "y".repeat(TEXT_BODY_LIMIT);
    let resp = response("text/plain", exact.as_bytes());
    match normalize(EvalValue::Response(resp)) {
        NormalizedDisplay::Summary(summary) => {
            assert!(!summary.truncated);
            assert_eq!(summary.body, Value::String(exact));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let wide = "宽".repeat(TEXT_BODY_LIMIT + 1);
    let resp = response("text/plain", wide.as_bytes());
    match normalize(EvalValue::Response(resp)) {
        NormalizedDisplay::Summary(summary) => {
            assert!(summary.truncated);
            let body = summary.body.as_str().expect("string body");
            assert_eq!(
                body.chars().count(),
                TEXT_BODY_LIMIT + TRUNCATION_MARKER.len()
            );
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unreadable_body_degrades_to_the_original_value() {
    // Invalid UTF-8 defeats text(); the original response comes back
    // unchanged instead of an error.
    let resp = response("text/plain", &[0xff, 0xfe, 0xfd]);
    match normalize(EvalValue::Response(resp)) {
        NormalizedDisplay::Raw(EvalValue::Response(r)) => {
            assert_eq!(r.status(), 200);
        }
        other => panic!("unexpected {other:?}"),
    }

    // Same for a JSON content type with a body that is not JSON.
    let resp = response("application/json", b"not json");
    match normalize(EvalValue::Response(resp)) {
        NormalizedDisplay::Raw(EvalValue::Response(_)) => {}
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn summary_text_rendering_is_json() {
    let resp = response("application/json", br#"{"ok":true}"#);
    let display = normalize(EvalValue::Response(resp));
    let text = display.to_text();
    let parsed: Value = serde_json::from_str(&text).expect("summary is json");
    assert_eq!(parsed["status"], json!(200));
    assert_eq!(parsed["body"], json!({ "ok": true }));
}
