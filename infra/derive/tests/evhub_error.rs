use evhub_derive::evhub_error;
use std::borrow::Cow;

#[evhub_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, DemoError> {
    Ok(raw.parse::<i64>()?)
}

#[test]
fn source_errors_convert_with_question_mark() {
    let err = parse("fifty").unwrap_err();
    assert!(matches!(err, DemoError::Parse { context: None, .. }));
    assert!(err.to_string().starts_with("Parse error: "));
}

#[test]
fn context_is_rendered_in_display() {
    let err = "x".parse::<i64>().context("reading guest limit").unwrap_err();
    assert!(matches!(err, DemoError::Parse { .. }));
    assert!(err.to_string().starts_with("Parse error (reading guest limit): "));
}

#[test]
fn context_can_be_attached_to_own_results() {
    let res: Result<(), DemoError> =
        Err(DemoError::NotFound { message: "package".into(), context: None });
    let err = res.context("resolving plan").unwrap_err();
    assert_eq!(err.to_string(), "Not found (resolving plan): package");
}

#[test]
fn strings_become_internal_errors() {
    let borrowed: DemoError = "boom".into();
    let owned: DemoError = String::from("bang").into();
    assert_eq!(borrowed.to_string(), "Internal error: boom");
    assert_eq!(owned.to_string(), "Internal error: bang");
}
