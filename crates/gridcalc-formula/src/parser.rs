//! Formula parser
//!
//! Recognizes `=NAME(ARGS)` and `=TERM`. Argument lists are split by a small
//! scanner that tracks parenthesis depth, range state and quoted strings, so
//! commas inside nested calls or string literals do not split.

use crate::ast::ParsedFormula;
use crate::error::{FormulaError, FormulaResult};

/// Parse formula text (including its leading `=`)
///
/// # Example
/// ```rust
/// use gridcalc_formula::{parse_formula, ParsedFormula};
///
/// let parsed = parse_formula("=SUM(A1:A3, 4)").unwrap();
/// assert_eq!(
///     parsed,
///     ParsedFormula::Call {
///         name: "SUM".into(),
///         args: vec!["A1:A3".into(), "4".into()],
///     }
/// );
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<ParsedFormula> {
    let body = formula
        .trim()
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::malformed("formula must start with '='"))?
        .trim();

    if body.is_empty() {
        return Err(FormulaError::malformed("empty formula"));
    }

    if let Some((name, args)) = parse_call(body)? {
        return Ok(ParsedFormula::Call { name, args });
    }

    check_term(body)?;
    Ok(ParsedFormula::Term(body.to_string()))
}

/// Try to read `text` as `NAME(ARGS)`
///
/// Returns `Ok(None)` when the text does not start with a name followed by
/// `(`. Once it does, the matching `)` has to be the last character.
pub(crate) fn parse_call(text: &str) -> FormulaResult<Option<(String, Vec<String>)>> {
    let bytes = text.as_bytes();
    let name_len = bytes
        .iter()
        .take_while(|b| b.is_ascii_alphabetic() || **b == b'_')
        .count();

    if name_len == 0 || bytes.get(name_len) != Some(&b'(') {
        return Ok(None);
    }

    let close = find_closing_paren(text, name_len)?;
    if close != text.len() - 1 {
        return Err(FormulaError::malformed(format!(
            "unexpected text after ')': '{}'",
            &text[close + 1..]
        )));
    }

    let args = split_arguments(&text[name_len + 1..close])?;
    Ok(Some((text[..name_len].to_string(), args)))
}

/// Index of the `)` matching the `(` at `open`
fn find_closing_paren(text: &str, open: usize) -> FormulaResult<usize> {
    let mut depth = 0usize;
    let mut in_quotes = false;

    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }

    if in_quotes {
        Err(FormulaError::malformed("unterminated string"))
    } else {
        Err(FormulaError::malformed("unbalanced parentheses"))
    }
}

/// A bare term may not contain parentheses or (outside quotes) a colon
fn check_term(term: &str) -> FormulaResult<()> {
    let mut in_quotes = false;
    let mut has_colon = false;

    for b in term.bytes() {
        match b {
            b'"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            b'(' | b')' => {
                return Err(FormulaError::malformed(format!(
                    "unexpected parenthesis in '{}'",
                    term
                )))
            }
            b':' => has_colon = true,
            _ => {}
        }
    }

    if in_quotes {
        return Err(FormulaError::malformed("unterminated string"));
    }
    if has_colon {
        return Err(FormulaError::RangeNotAllowedHere);
    }
    Ok(())
}

/// Split an argument list on top-level commas
///
/// Each argument is trimmed. An all-blank list yields no arguments; a blank
/// argument anywhere else is an error.
pub fn split_arguments(list: &str) -> FormulaResult<Vec<String>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut scanner = ArgumentScanner::new(list);
    scanner.run()?;

    if scanner.args.iter().any(|a| a.is_empty()) {
        return Err(FormulaError::malformed(format!(
            "empty argument in '{}'",
            list
        )));
    }
    Ok(scanner.args)
}

struct ArgumentScanner<'a> {
    input: &'a str,
    /// Start of the argument being read
    start: usize,
    depth: usize,
    in_quotes: bool,
    /// Set after a top-level `:` until a character that cannot be part of a
    /// reference
    in_range: bool,
    args: Vec<String>,
}

impl<'a> ArgumentScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            depth: 0,
            in_quotes: false,
            in_range: false,
            args: Vec::new(),
        }
    }

    fn run(&mut self) -> FormulaResult<()> {
        for (i, b) in self.input.bytes().enumerate() {
            if self.in_quotes {
                if b == b'"' {
                    self.in_quotes = false;
                }
                continue;
            }

            if self.in_range && !(b.is_ascii_alphanumeric() || b.is_ascii_whitespace()) {
                self.in_range = false;
                if b == b':' {
                    return Err(FormulaError::malformed(format!(
                        "unexpected ':' in '{}'",
                        self.input
                    )));
                }
            }

            match b {
                b'"' => self.in_quotes = true,
                b'(' => self.depth += 1,
                b')' => {
                    if self.depth == 0 {
                        return Err(FormulaError::malformed("unbalanced parentheses"));
                    }
                    self.depth -= 1;
                }
                b',' if self.depth == 0 => self.push_arg(i),
                b':' if self.depth == 0 => self.in_range = true,
                _ => {}
            }
        }

        if self.in_quotes {
            return Err(FormulaError::malformed("unterminated string"));
        }
        if self.depth != 0 {
            return Err(FormulaError::malformed("unbalanced parentheses"));
        }
        self.push_arg(self.input.len());
        Ok(())
    }

    fn push_arg(&mut self, end: usize) {
        self.args
            .push(self.input[self.start..end].trim().to_string());
        self.start = end + 1;
    }
}
