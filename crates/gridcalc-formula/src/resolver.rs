//! Reference resolution
//!
//! Turns argument text into values: classifies it, reads referenced cells,
//! expands ranges, and follows formula cells through the evaluator while
//! guarding against cycles.

use std::collections::HashSet;

use gridcalc_core::{CellAddress, CellId, CellRange, CellValue};
use lazy_regex::regex_is_match;

use crate::ast::Argument;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::EvaluationContext;
use crate::parser::parse_call;

/// Longest chain of formula cells one evaluation may follow
///
/// Each followed cell costs a few stack frames, so chains past this length
/// fail with [`FormulaError::ReferenceDepthExceeded`] instead.
pub const MAX_REFERENCE_DEPTH: usize = 256;

/// Check if text has the shape of a single A1-style reference
///
/// Only the shape is checked; `A0` matches but fails to resolve.
pub fn is_reference(text: &str) -> bool {
    regex_is_match!(r"^[A-Z]+[0-9]+$", text)
}

/// Classify one argument string
///
/// Checked in order: nested call, quoted literal, range, reference, literal.
pub fn classify_argument(raw: &str) -> FormulaResult<Argument> {
    let raw = raw.trim();

    if let Some((name, args)) = parse_call(raw)? {
        return Ok(Argument::Call { name, args });
    }
    if let Some(text) = unquote(raw) {
        return Ok(Argument::Literal(text));
    }
    if let Some((start, end)) = raw.split_once(':') {
        return Ok(Argument::Range {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        });
    }
    if is_reference(raw) {
        return Ok(Argument::Reference(raw.to_string()));
    }
    Ok(Argument::Literal(raw.to_string()))
}

/// Strip surrounding double quotes, turning `""` into `"`
pub(crate) fn unquote(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\"\"", "\""))
}

fn parse_reference(text: &str) -> FormulaResult<CellAddress> {
    CellAddress::parse(text).map_err(|_| FormulaError::InvalidAddress(text.to_string()))
}

fn formula_body(formula: &str) -> &str {
    formula.strip_prefix('=').unwrap_or(formula).trim()
}

impl EvaluationContext<'_> {
    /// Value of the cell named by `text`
    ///
    /// Formula cells are re-evaluated with their id added to `visiting`; the
    /// id is removed again before returning, so a cell reached along two
    /// separate paths is not mistaken for a cycle. The size of `visiting` is
    /// the current chain length and is capped at [`MAX_REFERENCE_DEPTH`].
    pub fn resolve_reference(
        &self,
        text: &str,
        visiting: &mut HashSet<CellId>,
    ) -> FormulaResult<CellValue> {
        let addr = parse_reference(text)?;
        self.resolve_address(addr, text, visiting)
    }

    fn resolve_address(
        &self,
        addr: CellAddress,
        text: &str,
        visiting: &mut HashSet<CellId>,
    ) -> FormulaResult<CellValue> {
        let id = addr.id();
        if visiting.contains(&id) {
            return Err(FormulaError::CircularReference);
        }

        let cell = match self.grid().get(&id) {
            Some(cell) => cell,
            None => return Ok(CellValue::Empty),
        };

        match &cell.formula {
            Some(formula) if formula_body(formula) != text => {
                if visiting.len() > MAX_REFERENCE_DEPTH {
                    return Err(FormulaError::ReferenceDepthExceeded(MAX_REFERENCE_DEPTH));
                }
                tracing::trace!(cell = %addr, formula = %formula, "following reference");
                visiting.insert(id);
                let result = self.evaluate(formula, visiting);
                visiting.remove(&id);
                result
            }
            _ => Ok(cell.value().clone()),
        }
    }

    /// Values of the non-empty cells in `start:end`, row-major
    pub fn expand_range(
        &self,
        start: &str,
        end: &str,
        visiting: &mut HashSet<CellId>,
    ) -> FormulaResult<Vec<CellValue>> {
        let range = CellRange::new(parse_reference(start)?, parse_reference(end)?);
        let mut values = Vec::new();

        for addr in self.range_candidates(&range, visiting) {
            let value = self.resolve_address(addr, &addr.to_a1_string(), visiting)?;
            if !value.is_empty() {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Addresses in `range` that can contribute a value or a cycle
    ///
    /// Small ranges are walked cell by cell. For ranges larger than the
    /// number of stored cells only stored and in-progress cells are visited;
    /// every other address would resolve to `Empty`.
    fn range_candidates(&self, range: &CellRange, visiting: &HashSet<CellId>) -> Vec<CellAddress> {
        let stored = self.grid().cell_count() + visiting.len();
        if range.cell_count() <= stored as u64 {
            return range.cells().collect();
        }

        let mut ids: Vec<CellId> = self
            .grid()
            .iter()
            .map(|cell| cell.id)
            .chain(visiting.iter().copied())
            .filter(|id| range.contains(&id.address()))
            .collect();
        ids.sort();
        ids.dedup();
        ids.into_iter().map(|id| id.address()).collect()
    }
}
