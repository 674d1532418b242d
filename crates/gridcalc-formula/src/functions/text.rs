//! Text functions
//!
//! Each takes exactly one argument and works on the textual form of the first
//! resolved value. A range argument that resolves to several values only uses
//! the first; one that resolves to nothing behaves like an empty cell.

use crate::error::FormulaResult;
use crate::evaluator::EvaluationContext;
use gridcalc_core::CellValue;

fn first_text(args: &[CellValue]) -> String {
    args.first().map(CellValue::as_text).unwrap_or_default()
}

/// TRIM(text)
pub fn fn_trim(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    Ok(CellValue::text(first_text(args).trim()))
}

/// UPPER(text)
pub fn fn_upper(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    Ok(CellValue::Text(first_text(args).to_uppercase()))
}

/// LOWER(text)
pub fn fn_lower(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    Ok(CellValue::Text(first_text(args).to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::Grid;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_functions() {
        let grid = Grid::new();
        let ctx = EvaluationContext::new(&grid);

        let padded = [CellValue::text("  Hello World \t")];
        assert_eq!(fn_trim(&padded, &ctx).unwrap(), CellValue::text("Hello World"));
        assert_eq!(
            fn_upper(&padded, &ctx).unwrap(),
            CellValue::text("  HELLO WORLD \t")
        );
        assert_eq!(
            fn_lower(&[CellValue::text("MiXeD")], &ctx).unwrap(),
            CellValue::text("mixed")
        );
    }

    #[test]
    fn test_uses_textual_form_of_first_value() {
        let grid = Grid::new();
        let ctx = EvaluationContext::new(&grid);

        assert_eq!(
            fn_trim(&[CellValue::Number(42.0)], &ctx).unwrap(),
            CellValue::text("42")
        );
        assert_eq!(
            fn_upper(&[CellValue::text("a"), CellValue::text("b")], &ctx).unwrap(),
            CellValue::text("A")
        );
        assert_eq!(fn_lower(&[], &ctx).unwrap(), CellValue::text(""));
    }
}
