//! rename: batch rename files through a sed-replace expression
//!
//! The library holds the expression engine (parse, compile, apply, highlight)
//! and the batch orchestration used by the binary at src/main.rs.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod error_helpers;
pub mod expression;
pub mod highlight;
pub mod logger;
pub mod regex_error;
pub mod renamer;
pub mod replacement;

// Re-export commonly used types for convenience
pub use engine::{Edit, Engine};
pub use error::{ExpressionError, ExpressionResult, FormatError, PatternError};
pub use expression::{ParsedExpression, parse_expression};
pub use highlight::{HighlightFormatter, HighlightStyle};
pub use renamer::{ApplyOptions, ApplyReport, FromTo};
