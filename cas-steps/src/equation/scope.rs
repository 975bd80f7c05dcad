//! Substitution of known symbol values into the text of an equation before it is parsed.

use std::collections::HashMap;
use tracing::warn;
use crate::error::Error;

/// Known values of symbols, as source text. A value may itself mention other symbols in the
/// scope.
pub type Scope = HashMap<String, String>;

/// Replaces every whole-word occurrence of a symbol in the scope with its value, wrapped in
/// parentheses. Replacement repeats until no symbol of the scope is left.
///
/// Returns [`Error::UnresolvedScope`] if the text still mentions a symbol of the scope after
/// `max_passes` passes, which happens when a value refers back to itself.
pub fn substitute(text: &str, scope: &Scope, max_passes: usize) -> Result<String, Error> {
    let mut current = text.to_string();
    for _ in 0..=max_passes {
        let (next, replaced) = substitute_once(&current, scope);
        if !replaced {
            return Ok(next);
        }
        current = next;
    }

    warn!(target: "cas_steps::equation", text, passes = max_passes, "scope substitution did not settle");
    Err(Error::UnresolvedScope)
}

/// Performs one pass of substitution, returning the new text and whether anything was replaced.
fn substitute_once(text: &str, scope: &Scope) -> (String, bool) {
    let mut out = String::with_capacity(text.len());
    let mut replaced = false;
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if !(c.is_ascii_alphabetic() || c == '_') {
            out.push(c);
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(index, next)) = chars.peek() {
            if !(next.is_ascii_alphanumeric() || next == '_') {
                break;
            }
            end = index + next.len_utf8();
            chars.next();
        }

        let word = &text[start..end];
        match scope.get(word) {
            Some(value) => {
                out.push('(');
                out.push_str(value);
                out.push(')');
                replaced = true;
            },
            None => out.push_str(word),
        }
    }

    (out, replaced)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn scope(pairs: &[(&str, &str)]) -> Scope {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn whole_words_only() {
        let scope = scope(&[("y", "2")]);
        assert_eq!(substitute("x + y = yy", &scope, 20).unwrap(), "x + (2) = yy");
    }

    #[test]
    fn chained_values() {
        let scope = scope(&[("a", "b + 1"), ("b", "3")]);
        assert_eq!(substitute("x = a", &scope, 20).unwrap(), "x = ((3) + 1)");
    }

    #[test]
    fn self_reference() {
        let scope = scope(&[("a", "a + 1")]);
        assert!(matches!(substitute("x = a", &scope, 5), Err(Error::UnresolvedScope)));
    }
}
