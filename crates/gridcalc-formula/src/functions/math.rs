//! Math functions
//!
//! Aggregates only look at values that coerce to a number. Text that is not
//! numeric, empty cells and errors are skipped, never counted as zero. With no
//! numeric values at all every aggregate returns 0.

use crate::error::FormulaResult;
use crate::evaluator::EvaluationContext;
use gridcalc_core::CellValue;

fn numbers(args: &[CellValue]) -> impl Iterator<Item = f64> + '_ {
    args.iter().filter_map(CellValue::as_number)
}

/// SUM function
pub fn fn_sum(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    Ok(CellValue::Number(numbers(args).sum()))
}

/// AVERAGE function
pub fn fn_average(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    let (sum, count) = numbers(args).fold((0.0, 0usize), |(s, c), n| (s + n, c + 1));

    if count == 0 {
        Ok(CellValue::Number(0.0))
    } else {
        Ok(CellValue::Number(sum / count as f64))
    }
}

/// MIN function
pub fn fn_min(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    let min = numbers(args).reduce(f64::min);
    Ok(CellValue::Number(min.unwrap_or(0.0)))
}

/// MAX function
pub fn fn_max(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    let max = numbers(args).reduce(f64::max);
    Ok(CellValue::Number(max.unwrap_or(0.0)))
}

/// COUNT function
pub fn fn_count(args: &[CellValue], _ctx: &EvaluationContext) -> FormulaResult<CellValue> {
    Ok(CellValue::Number(numbers(args).count() as f64))
}
