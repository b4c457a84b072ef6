//! Validation for block trees.
//!
//! Everything here returns diagnostics as data — human-readable strings the
//! editor shell prints verbatim. Validation never errors and never panics;
//! an invalid tree is a tree with diagnostics, not a failure.

pub mod diagnostic;
pub mod linter;
pub mod rules;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use linter::{lint_blocks, LintOptions};
pub use rules::{is_valid_link_target, Rule, RuleRegistry};
