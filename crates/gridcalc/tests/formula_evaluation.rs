//! Tests for formula evaluation through the spreadsheet API

use gridcalc::prelude::*;
use gridcalc::{evaluate_cell, CellRange, EvaluationContext};
use pretty_assertions::assert_eq;

fn sheet_with(values: &[(&str, &str)]) -> Spreadsheet {
    let mut sheet = Spreadsheet::new();
    for (addr, input) in values {
        sheet.set_input(addr, input).unwrap();
    }
    sheet
}

/// Test the address codec across the first thousand rows and 701 columns
#[test]
fn test_address_round_trip() {
    for row in 0..1000 {
        for col in 0..=700 {
            let text = CellAddress::new(row, col).to_string();
            let back = CellAddress::parse(&text).unwrap();
            assert_eq!((back.row, back.col), (row, col), "{}", text);
        }
    }
}

/// Test SUM over a mixed range
#[test]
fn test_sum_skips_text() {
    let mut sheet = sheet_with(&[("A1", "2"), ("A2", "x"), ("A3", "5")]);
    let result = sheet.apply_formula("B1", "=SUM(A1:A3)").unwrap();
    assert_eq!(result, CellValue::Number(7.0));
}

/// Test AVERAGE over text only
#[test]
fn test_average_all_text_is_zero() {
    let mut sheet = sheet_with(&[("A1", "a"), ("A2", "b"), ("A3", "c")]);
    let result = sheet.apply_formula("B1", "=AVERAGE(A1:A3)").unwrap();
    assert_eq!(result, CellValue::Number(0.0));
}

/// Test COUNT only counts numbers
#[test]
fn test_count_numeric() {
    let mut sheet = sheet_with(&[("A1", "1"), ("A2", "x"), ("A3", "3")]);
    let result = sheet.apply_formula("B1", "=COUNT(A1:A3)").unwrap();
    assert_eq!(result, CellValue::Number(2.0));
}

/// Test single-argument functions reject extra arguments
#[test]
fn test_trim_with_two_arguments() {
    let mut sheet = Spreadsheet::new();
    let result = sheet
        .apply_formula("A1", "=TRIM(\"  hi \", \"there\")")
        .unwrap();
    assert_eq!(
        result,
        CellValue::error("TRIM function requires exactly 1 argument(s), got 2")
    );

    let grid = Grid::new();
    let err = EvaluationContext::new(&grid)
        .try_evaluate_cell(CellAddress::new(0, 0), "=TRIM(\"  hi \", \"there\")")
        .unwrap_err();
    assert!(matches!(err, FormulaError::ArgumentCountMismatch { .. }));
}

/// Test A1 -> B1 -> A1 is detected instead of recursing forever
#[test]
fn test_circular_reference() {
    let mut sheet = Spreadsheet::new();
    // B1 is stored first, while A1 is still empty
    assert_eq!(
        sheet.apply_formula("B1", "=A1").unwrap(),
        CellValue::Empty
    );

    let result = sheet.apply_formula("A1", "=B1").unwrap();
    assert_eq!(result, CellValue::error("Circular reference detected"));
    assert_eq!(result.to_string(), "#ERROR: Circular reference detected");

    // B1 now closes the loop as well
    let stats = sheet.recalculate();
    assert_eq!(stats.errors, 2);
}

/// Test range expansion order
#[test]
fn test_range_order_is_row_major() {
    let range = CellRange::parse("A1:B2").unwrap();
    let order: Vec<String> = range.cells().map(|a| a.to_string()).collect();
    assert_eq!(order, vec!["A1", "B1", "A2", "B2"]);

    let sheet = sheet_with(&[("A1", "a"), ("B1", "b"), ("A2", "c"), ("B2", "d")]);
    let upper = evaluate_cell(sheet.grid(), CellAddress::new(9, 9), "=UPPER(A1:B2)");
    assert_eq!(upper, CellValue::text("A"));
}

/// Test unknown functions become an error value
#[test]
fn test_unknown_function() {
    let mut sheet = Spreadsheet::new();
    let result = sheet.apply_formula("C1", "=FOO(A1)").unwrap();
    assert_eq!(result.to_string(), "#ERROR: Unknown function: FOO");
    assert_eq!(
        sheet.cell("C1").unwrap().unwrap().computed,
        CellValue::error("Unknown function: FOO")
    );
}

/// Test a range used as a whole formula
#[test]
fn test_range_outside_function() {
    let mut sheet = Spreadsheet::new();
    let result = sheet.apply_formula("C1", "=A1:A3").unwrap();
    assert_eq!(
        result.to_string(),
        "#ERROR: Cell ranges can only be used within functions"
    );
}

/// Test references to invalid addresses
#[test]
fn test_invalid_reference() {
    let mut sheet = Spreadsheet::new();
    let result = sheet.apply_formula("C1", "=SUM(A0)").unwrap();
    assert_eq!(result.to_string(), "#ERROR: Invalid cell address: A0");
}

/// Test nested calls and formula chains
#[test]
fn test_nested_and_chained_formulas() {
    let mut sheet = sheet_with(&[("A1", "4"), ("A2", "-2"), ("A3", "  Mixed Case ")]);

    assert_eq!(
        sheet.apply_formula("B1", "=SUM(MAX(A1:A2), MIN(A1:A2), 10)").unwrap(),
        CellValue::Number(12.0)
    );
    assert_eq!(
        sheet.apply_formula("B2", "=AVERAGE(B1, A1)").unwrap(),
        CellValue::Number(8.0)
    );
    assert_eq!(
        sheet.apply_formula("B3", "=UPPER(TRIM(A3))").unwrap(),
        CellValue::text("MIXED CASE")
    );

    // Editing A1 and recalculating flows through B1 into B2
    sheet.set_input("A1", "6").unwrap();
    sheet.recalculate();
    assert_eq!(sheet.value("B1").unwrap(), CellValue::Number(14.0));
    assert_eq!(sheet.value("B2").unwrap(), CellValue::Number(10.0));
}

/// Test malformed formulas
#[test]
fn test_malformed_formula() {
    let mut sheet = Spreadsheet::new();
    for formula in ["=SUM(A1", "=SUM(A1,,A2)", "=", "=SUM(A1) extra"] {
        let result = sheet.apply_formula("A1", formula).unwrap();
        assert!(
            result.to_string().starts_with("#ERROR: Malformed formula: "),
            "{} -> {}",
            formula,
            result
        );
    }
}
