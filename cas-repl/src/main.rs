mod error;

use cas_steps::{
    equation,
    ChangeType,
    EquationStep,
    Error,
    Limits,
    Step,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{env, fs::File, io::{self, BufReader, IsTerminal, Read}};
use tracing_subscriber::EnvFilter;

/// Options that apply to every line of input.
#[derive(Debug, Clone, Default)]
struct Options {
    /// Print the substeps of each step, indented below it.
    substeps: bool,

    /// Caps on the work done for each line.
    limits: Limits,
}

impl Options {
    /// Reads the options from the command-line flags and the environment, returning the remaining
    /// arguments.
    fn from_env() -> (Self, Vec<String>) {
        let mut options = Options::default();
        let mut rest = Vec::new();
        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--substeps" => options.substeps = true,
                _ => rest.push(arg),
            }
        }

        if let Some(max) = env::var("CAS_STEPS_MAX_ITERATIONS").ok().and_then(|v| v.parse().ok()) {
            options.limits.max_iterations = max;
        }
        (options, rest)
    }
}

/// What to do with a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    Simplify(&'a str),
    Solve(&'a str),
    Factor(&'a str),
}

impl<'a> Command<'a> {
    /// Reads the command from the line. A line without a command is solved if it contains a
    /// comparator, and simplified otherwise.
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("simplify ") {
            Command::Simplify(rest)
        } else if let Some(rest) = line.strip_prefix("solve ") {
            Command::Solve(rest)
        } else if let Some(rest) = line.strip_prefix("factor ") {
            Command::Factor(rest)
        } else if matches!(equation::split(line), Err(Error::MissingComparator)) {
            Command::Simplify(line)
        } else {
            Command::Solve(line)
        }
    }
}

/// Common view of expression and equation steps, for printing.
trait StepView: Sized {
    fn change_type(&self) -> ChangeType;
    fn result(&self) -> &str;
    fn substeps(&self) -> &[Self];
}

impl StepView for Step {
    fn change_type(&self) -> ChangeType {
        self.change_type
    }

    fn result(&self) -> &str {
        &self.result
    }

    fn substeps(&self) -> &[Self] {
        &self.substeps
    }
}

impl StepView for EquationStep {
    fn change_type(&self) -> ChangeType {
        self.change_type
    }

    fn result(&self) -> &str {
        &self.result
    }

    fn substeps(&self) -> &[Self] {
        &self.substeps
    }
}

/// Prints each step as `RULE: result`, with substeps indented below their step.
fn print_steps<S: StepView>(steps: &[S], depth: usize, options: &Options) {
    for step in steps {
        println!("{:indent$}{}: {}", "", step.change_type(), step.result(), indent = depth * 2);
        if options.substeps {
            print_steps(step.substeps(), depth + 1, options);
        }
    }
}

/// Runs the command on the line and prints the steps. Nothing is printed if the input is already
/// as simple as it gets.
fn run(line: &str, options: &Options) -> Result<(), Error> {
    match Command::parse(line) {
        Command::Simplify(expr) => {
            print_steps(&cas_steps::try_simplify_expression(expr, &options.limits)?, 0, options)
        },
        Command::Solve(eq) => {
            print_steps(&cas_steps::try_solve_equation(eq, None, &options.limits)?, 0, options)
        },
        Command::Factor(expr) => print_steps(&cas_steps::try_factor_expression(expr)?, 0, options),
    }
    Ok(())
}

/// Runs every non-empty line of the input, reporting failures to stderr.
fn run_all(input: &str, options: &Options) {
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        if let Err(err) = run(line, options) {
            error::report_to_stderr(&err, line);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let (options, args) = Options::from_env();

    if let Some(filename) = args.first() {
        // run commands from a file
        let mut input = String::new();
        let read = File::open(filename)
            .map(BufReader::new)
            .and_then(|mut file| file.read_to_string(&mut input));
        if let Err(err) = read {
            eprintln!("cannot read {}: {}", filename, err);
            std::process::exit(1);
        }

        run_all(&input, &options);
    } else if !io::stdin().is_terminal() {
        // read commands from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("cannot read stdin: {}", err);
            std::process::exit(1);
        }

        run_all(&input, &options);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            },
        };

        fn process_line(rl: &mut DefaultEditor, options: &Options) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            if let Err(err) = run(&input, options) {
                error::report_to_stderr(&err, &input);
            }
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &options) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(Command::parse("simplify 2 + 3"), Command::Simplify("2 + 3"));
        assert_eq!(Command::parse("factor x^2 - 1"), Command::Factor("x^2 - 1"));
        assert_eq!(Command::parse("solve x = 1"), Command::Solve("x = 1"));
        assert_eq!(Command::parse("x + 3 <= 4"), Command::Solve("x + 3 <= 4"));
        assert_eq!(Command::parse("  x + 3 "), Command::Simplify("x + 3"));
    }
}
