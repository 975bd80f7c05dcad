use ariadne::{Report, ReportKind, Source};
use cas_steps::Error;

/// Report the error to stderr, against the line of input it came from.
///
/// Parse errors point at the offending span of the part of the input that was parsed. Every other
/// error is reported as a plain message about the whole line.
pub fn report_to_stderr(err: &Error, input: &str) {
    match err {
        Error::Parse { input: parsed, error } => error.report_to_stderr("input", parsed),
        _ => {
            // a failure to write to stderr leaves nowhere else to report to
            let _ = Report::<(&str, std::ops::Range<usize>)>::build(ReportKind::Error, "input", 0)
                .with_message(err)
                .finish()
                .eprint(("input", Source::from(input)));
        },
    }
}
