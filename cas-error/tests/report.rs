use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::{Error, EXPR};

/// An error used to exercise the derived report.
#[derive(Debug, ErrorKind)]
#[error(
    message = "unknown function",
    labels = [format!("`{}` is not a {}", name, "function".fg(EXPR))],
    help = "only `abs` and `nthRoot` are supported",
)]
struct UnknownFunction {
    name: String,
}

/// An error with no fields and two labels.
#[derive(Debug, ErrorKind)]
#[error(message = "mismatched parentheses", labels = ["opened here", "but never closed"])]
struct Mismatched;

fn render(err: &Error, input: &str) -> String {
    let rendered = err.render("input", input);
    String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
}

#[test]
fn report_contains_message_and_help() {
    let input = "sin(x) + 1";
    let err = Error::new(vec![0..3], UnknownFunction { name: "sin".to_string() });
    let text = render(&err, input);

    assert!(text.contains("unknown function"));
    assert!(text.contains("`sin` is not a function"));
    assert!(text.contains("only `abs` and `nthRoot` are supported"));
}

#[test]
fn report_labels_every_span() {
    let input = "(x + 1";
    let err = Error::new(vec![0..1, 5..6], Mismatched);
    let text = render(&err, input);

    assert!(text.contains("mismatched parentheses"));
    assert!(text.contains("opened here"));
    assert!(text.contains("but never closed"));
}
