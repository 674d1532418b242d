//! Built-in functions

pub mod math;
pub mod text;

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::EvaluationContext;
use gridcalc_core::CellValue;
use std::collections::HashMap;
use std::fmt;

/// Function implementation signature
///
/// Arguments arrive resolved and flattened: a range contributes one value per
/// non-empty cell, a literal arrives as `Text`.
pub type FunctionImpl = fn(&[CellValue], &EvaluationContext) -> FormulaResult<CellValue>;

/// Grouping used when listing functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FunctionCategory {
    /// Numeric aggregates
    Math,
    /// Text clean-up
    Text,
}

impl FunctionCategory {
    /// Heading shown in function listings
    pub fn label(&self) -> &'static str {
        match self {
            FunctionCategory::Math => "Mathematical Functions",
            FunctionCategory::Text => "Data Quality Functions",
        }
    }
}

impl fmt::Display for FunctionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
    /// Listing category
    pub category: FunctionCategory,
    /// One-line description
    pub description: &'static str,
}

impl FunctionDef {
    /// Check a raw argument count against this function's arity
    pub fn check_arity(&self, actual: usize) -> FormulaResult<()> {
        let expected = match self.max_args {
            Some(max) if max == self.min_args && actual != max => format!("exactly {}", max),
            _ if actual < self.min_args => format!("at least {}", self.min_args),
            Some(max) if actual > max => format!("at most {}", max),
            _ => return Ok(()),
        };
        Err(FormulaError::ArgumentCountMismatch {
            function: self.name.to_string(),
            expected,
            actual,
        })
    }

    /// Human-readable arity, e.g. `1` or `0+`
    pub fn arity(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}-{}", self.min_args, max),
            None => format!("{}+", self.min_args),
        }
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .field("category", &self.category)
            .finish()
    }
}

/// Function registry
///
/// Lookups are case-insensitive.
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_math_functions();
        registry.register_text_functions();
        registry
    }

    /// Create a registry with no functions
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function, replacing any existing one with the same name
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    /// All definitions ordered by category, then name
    pub fn iter(&self) -> impl Iterator<Item = &FunctionDef> {
        let mut defs: Vec<&FunctionDef> = self.functions.values().collect();
        defs.sort_by(|a, b| (a.category, a.name).cmp(&(b.category, b.name)));
        defs.into_iter()
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry has no functions
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn register_math_functions(&mut self) {
        self.register(FunctionDef {
            name: "SUM",
            min_args: 0,
            max_args: None,
            implementation: math::fn_sum,
            category: FunctionCategory::Math,
            description: "Adds all numeric values",
        });

        self.register(FunctionDef {
            name: "AVERAGE",
            min_args: 0,
            max_args: None,
            implementation: math::fn_average,
            category: FunctionCategory::Math,
            description: "Mean of all numeric values",
        });

        self.register(FunctionDef {
            name: "MAX",
            min_args: 0,
            max_args: None,
            implementation: math::fn_max,
            category: FunctionCategory::Math,
            description: "Largest numeric value",
        });

        self.register(FunctionDef {
            name: "MIN",
            min_args: 0,
            max_args: None,
            implementation: math::fn_min,
            category: FunctionCategory::Math,
            description: "Smallest numeric value",
        });

        self.register(FunctionDef {
            name: "COUNT",
            min_args: 0,
            max_args: None,
            implementation: math::fn_count,
            category: FunctionCategory::Math,
            description: "Counts the values that are numbers",
        });
    }

    fn register_text_functions(&mut self) {
        self.register(FunctionDef {
            name: "TRIM",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_trim,
            category: FunctionCategory::Text,
            description: "Removes leading and trailing whitespace",
        });

        self.register(FunctionDef {
            name: "UPPER",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_upper,
            category: FunctionCategory::Text,
            description: "Converts text to uppercase",
        });

        self.register(FunctionDef {
            name: "LOWER",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_lower,
            category: FunctionCategory::Text,
            description: "Converts text to lowercase",
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
