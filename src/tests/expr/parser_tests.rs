use serde_json::json;

use super::*;

fn parse_call(src: &str) -> (Vec<String>, Vec<Value>) {
    match parse(src).expect("parse") {
        Expr::Call { path, args } => (path, args),
        other => panic!("expected a call, got {other:?}"),
    }
}

#[test]
fn zero_arg_accessor() {
    let (path, args) = parse_call("host.getLocale()");
    assert_eq!(path, vec!["host", "getLocale"]);
    assert!(args.is_empty());
}

#[test]
fn fetch_with_path_and_options() {
    let (path, args) =
        parse_call(r#"host.fetch("/v2/project/projects?teamID=", { method: "GET" })"#);
    assert_eq!(path, vec!["host", "fetch"]);
    assert_eq!(args.len(), 2);
    assert_eq!(args[0], json!("/v2/project/projects?teamID="));
    assert_eq!(args[1], json!({ "method": "GET" }));
}

#[test]
fn single_quoted_strings_are_accepted() {
    let (path, args) = parse_call("host.ui.toast({ type: 'info', title: 'hello' })");
    assert_eq!(path, vec!["host", "ui", "toast"]);
    assert_eq!(args[0], json!({ "type": "info", "title": "hello" }));
}

#[test]
fn nested_object_values() {
    let (_, args) = parse_call(
        r#"host.fetch("/v2/x", { method: "POST", body: { name: "n", count: 3 } })"#,
    );
    assert_eq!(
        args[1],
        json!({ "method": "POST", "body": { "name": "n", "count": 3 } })
    );
}

#[test]
fn trailing_commas_are_tolerated() {
    let (_, args) = parse_call(r#"host.ui.toast({ title: "hi", },)"#);
    assert_eq!(args, vec![json!({ "title": "hi" })]);
}

#[test]
fn bare_literals_evaluate_to_themselves() {
    assert_eq!(parse(r#""hello""#).expect("parse"), Expr::Literal(json!("hello")));
    assert_eq!(parse("true").expect("parse"), Expr::Literal(json!(true)));
    assert_eq!(parse("null").expect("parse"), Expr::Literal(Value::Null));
}

#[test]
fn integral_numbers_come_out_as_integers() {
    let Expr::Literal(v) = parse("1700000000000000").expect("parse") else {
        panic!("expected literal");
    };
    assert_eq!(v.as_i64(), Some(1_700_000_000_000_000));

    let Expr::Literal(v) = parse("-2.5").expect("parse") else {
        panic!("expected literal");
    };
    assert_eq!(v.as_f64(), Some(-2.5));
}

#[test]
fn path_without_invocation_is_rejected() {
    assert!(parse("host.getLocale").is_err());
}

#[test]
fn trailing_input_is_rejected() {
    assert!(parse("host.getLocale() host").is_err());
}

#[test]
fn arbitrary_code_is_outside_the_grammar() {
    assert!(parse("host.getLocale() + 1").is_err());
    assert!(parse("while(true){}").is_err());
    assert!(parse("").is_err());
}

#[test]
fn unterminated_string_is_rejected() {
    assert!(parse(r#"host.fetch("/v2)"#).is_err());
}
