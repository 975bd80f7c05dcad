use crate::simplify::Termination;
use thiserror::Error;

/// The reasons an expression or equation could not be stepped through.
///
/// The infallible entry points, such as [`crate::simplify_expression`], log these and return an
/// empty list of steps instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be parsed. The error can be rendered against `input` with
    /// [`cas_error::Error::report_to_stderr`].
    #[error("could not parse `{input}`")]
    Parse {
        /// The text that was parsed. For equations, this is only the side that failed.
        input: String,

        /// The parser's diagnostic.
        error: cas_error::Error,
    },

    /// The input contains an operation the rewrite rules do not handle, such as `sin(x)`.
    #[error("the input contains an unsupported operation")]
    Unsupported,

    /// Stepping was abandoned because it did not settle.
    #[error("stepping was abandoned: {reason}")]
    Diverged {
        /// The cap that was exceeded.
        reason: Termination,
    },

    /// An equation was expected, but no comparator was found.
    #[error("expected an equation with one of `=`, `<`, `>`, `<=`, `>=`")]
    MissingComparator,

    /// One side of the equation is empty.
    #[error("one side of the equation is empty")]
    EmptySide,

    /// Substituting the scope into the equation did not settle.
    #[error("the scope could not be substituted into the equation")]
    UnresolvedScope,
}

impl Error {
    /// Creates an [`Error::Parse`] for the given input.
    pub fn parse(input: &str, error: cas_error::Error) -> Self {
        Error::Parse { input: input.to_string(), error }
    }
}
