//! Formula evaluator
//!
//! Evaluates formula text against a [`Grid`]. Evaluation is pull-based: a
//! reference to a formula cell re-evaluates that cell's formula on the spot.

use std::collections::HashSet;
use std::sync::OnceLock;

use gridcalc_core::{parse_decimal, CellAddress, CellId, CellValue, Grid};

use crate::ast::{Argument, ParsedFormula};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use crate::parser::parse_formula;
use crate::resolver::{classify_argument, unquote};

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// The shared registry of built-in functions
pub fn function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    grid: &'a Grid,
    registry: &'a FunctionRegistry,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context over `grid` using the built-in functions
    pub fn new(grid: &'a Grid) -> Self {
        Self::with_registry(grid, function_registry())
    }

    /// Create a context with a custom function registry
    pub fn with_registry(grid: &'a Grid, registry: &'a FunctionRegistry) -> Self {
        Self { grid, registry }
    }

    /// The grid references are read from
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Evaluate `formula` as the content of `target`
    ///
    /// Failures become an error value carrying the message.
    pub fn evaluate_cell(&self, target: CellAddress, formula: &str) -> CellValue {
        match self.try_evaluate_cell(target, formula) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(cell = %target, error = %err, "formula failed");
                CellValue::Error(err.to_string())
            }
        }
    }

    /// Evaluate `formula` as the content of `target`, keeping the error
    pub fn try_evaluate_cell(&self, target: CellAddress, formula: &str) -> FormulaResult<CellValue> {
        let mut visiting = HashSet::from([target.id()]);
        self.evaluate(formula, &mut visiting)
    }

    /// Evaluate text with an explicit set of in-progress cells
    ///
    /// Text that does not start with `=` is returned as a text value.
    pub fn evaluate(&self, text: &str, visiting: &mut HashSet<CellId>) -> FormulaResult<CellValue> {
        if !text.starts_with('=') {
            return Ok(CellValue::Text(text.to_string()));
        }

        match parse_formula(text)? {
            ParsedFormula::Call { name, args } => self.evaluate_call(&name, &args, visiting),
            ParsedFormula::Term(term) => self.evaluate_term(&term, visiting),
        }
    }

    fn evaluate_call(
        &self,
        name: &str,
        args: &[String],
        visiting: &mut HashSet<CellId>,
    ) -> FormulaResult<CellValue> {
        let func = self
            .registry
            .get(name)
            .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

        // Arity is checked before anything is resolved
        func.check_arity(args.len())?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            self.resolve_argument(arg, visiting, &mut values)?;
        }

        match (func.implementation)(&values, self)? {
            CellValue::Number(n) if !n.is_finite() => {
                Err(FormulaError::NumericOverflow(func.name.to_string()))
            }
            value => Ok(value),
        }
    }

    fn resolve_argument(
        &self,
        arg: &str,
        visiting: &mut HashSet<CellId>,
        out: &mut Vec<CellValue>,
    ) -> FormulaResult<()> {
        match classify_argument(arg)? {
            Argument::Call { name, args } => out.push(self.evaluate_call(&name, &args, visiting)?),
            Argument::Range { start, end } => out.extend(self.expand_range(&start, &end, visiting)?),
            Argument::Reference(text) => out.push(self.resolve_reference(&text, visiting)?),
            Argument::Literal(text) => out.push(CellValue::Text(text)),
        }
        Ok(())
    }

    fn evaluate_term(&self, term: &str, visiting: &mut HashSet<CellId>) -> FormulaResult<CellValue> {
        if let Some(text) = unquote(term) {
            return Ok(CellValue::Text(text));
        }

        match classify_argument(term)? {
            Argument::Reference(text) => self.resolve_reference(&text, visiting),
            Argument::Literal(text) => Ok(match parse_decimal(&text) {
                Some(n) => CellValue::Number(n),
                None => CellValue::Text(text),
            }),
            Argument::Range { .. } => Err(FormulaError::RangeNotAllowedHere),
            Argument::Call { name, args } => self.evaluate_call(&name, &args, visiting),
        }
    }
}

/// Evaluate `formula` as the content of `target` with the built-in functions
///
/// # Example
/// ```rust
/// use gridcalc_core::{CellAddress, CellValue, Grid};
/// use gridcalc_formula::evaluate_cell;
///
/// let mut grid = Grid::new();
/// grid.set_value("A1", 2.0).unwrap();
/// grid.set_value("A2", "x").unwrap();
/// grid.set_value("A3", 5.0).unwrap();
///
/// let target = CellAddress::parse("B1").unwrap();
/// assert_eq!(evaluate_cell(&grid, target, "=SUM(A1:A3)"), CellValue::Number(7.0));
/// ```
pub fn evaluate_cell(grid: &Grid, target: CellAddress, formula: &str) -> CellValue {
    EvaluationContext::new(grid).evaluate_cell(target, formula)
}
