//! Defensive checks of a page against the type registry.
//!
//! The editor never deep-validates imported pages; callers that render or
//! publish a page run the linter first.

mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{has_errors, Diagnostic, DiagnosticLevel};
pub use linter::{lint_document, LintOptions};
pub use rules::{
    ChildrenNotAcceptedRule, DuplicateIdRule, EmptyIdRule, InvalidOptionRule, LintRule,
    RootNotAllowedRule, RuleRegistry, UnknownPropRule, UnknownTypeRule,
};
