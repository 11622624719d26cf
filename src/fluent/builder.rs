//! Fluent assertion builder for predicate queries.
//!
//! This module provides the core builder types for making assertions:
//! - `expect()` - Entry point for creating assertions on a subject
//! - `Expectation` - Holds the subject and creates specific assertions
//! - `PredicateAssertion` - Builder for a single predicate query

use serde::Serialize;
use serde_json::Value;

use super::size::SizeAssertion;
use crate::dispatch::{dispatch, DispatchError, QUERY_MARKER};
use crate::output::FailureFormatter;
use crate::subject::Subject;

/// Result of evaluating an assertion.
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Whether the assertion passed.
    pub passed: bool,
    /// Description of what was asserted.
    pub description: String,
    /// Failure reason if the assertion failed.
    pub reason: Option<String>,
}

impl AssertionResult {
    /// Create a passing assertion result.
    pub(crate) fn pass(description: impl Into<String>) -> Self {
        Self {
            passed: true,
            description: description.into(),
            reason: None,
        }
    }

    /// Create a failing assertion result.
    pub(crate) fn fail(description: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            description: description.into(),
            reason: Some(reason.into()),
        }
    }
}

/// Create an expectation on a subject.
///
/// This is the entry point for the fluent assertion API.
///
/// # Example
///
/// ```rust
/// use attest::{double, expect};
///
/// let proud_man = double!("proud man", "humbled" => true);
/// expect(&proud_man).be("humbled").to_hold();
/// expect(&"OOPs").have(4).of("characters").to_hold();
/// ```
pub fn expect(subject: &dyn Subject) -> Expectation<'_> {
    Expectation { subject }
}

/// Holds a subject and creates specific assertions.
///
/// Call `.be()` to assert on a predicate query, or `.have()` to assert on
/// the subject's natural element count.
#[derive(Clone, Copy)]
pub struct Expectation<'a> {
    subject: &'a dyn Subject,
}

impl<'a> Expectation<'a> {
    /// Create a predicate assertion.
    ///
    /// Accepts either the bare predicate name (`"humbled"`) or the
    /// `be_`-prefixed assertion spelling (`"be_humbled"`); both resolve to
    /// the same query.
    pub fn be(&self, predicate: &str) -> PredicateAssertion<'a> {
        PredicateAssertion {
            subject: self.subject,
            predicate: predicate.to_string(),
            args: Vec::new(),
        }
    }

    /// Create a size assertion against the subject's natural element count.
    pub fn have(&self, expected: usize) -> SizeAssertion<'a> {
        SizeAssertion::new(self.subject, expected)
    }
}

/// Builder for an assertion on a single predicate query.
///
/// Methods like `to_hold()` evaluate immediately and panic on failure.
/// Use `evaluate()` for non-panicking evaluation.
pub struct PredicateAssertion<'a> {
    subject: &'a dyn Subject,
    predicate: String,
    args: Vec<Value>,
}

impl PredicateAssertion<'_> {
    // =========================================================================
    // Builder methods (chainable)
    // =========================================================================

    /// Append one query argument.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect(&vegeta)
    ///     .be("surpassed_by")
    ///     .with_arg(1000000000u64)
    ///     .to_hold();
    /// ```
    pub fn with_arg(mut self, arg: impl Serialize) -> Self {
        let value = serde_json::to_value(arg).expect("query argument should serialize to JSON");
        self.args.push(value);
        self
    }

    // =========================================================================
    // Assertion methods (panic on failure)
    // =========================================================================

    /// Assert the predicate holds on the subject.
    ///
    /// # Panics
    ///
    /// Panics with a mismatch diagnostic if the query returned false, with a
    /// dispatch diagnostic if the query does not exist, and with the raised
    /// message if the query raised.
    pub fn to_hold(&self) {
        finish(self.evaluate());
    }

    /// Assert the predicate does NOT hold on the subject.
    ///
    /// # Panics
    ///
    /// Panics if the query returned true. A missing query or a raised error
    /// is still fatal; negative polarity never absorbs either.
    pub fn to_not_hold(&self) {
        finish(self.evaluate_not());
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    /// Evaluate the assertion without panicking (expects the predicate to
    /// hold).
    ///
    /// A false-returning query is a mismatch (`AssertionResult` with
    /// `passed: false`); a missing query or a raised error is `Err`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attest::{double, expect};
    ///
    /// let proud_man = double!("proud man", "humbled" => false);
    /// let result = expect(&proud_man).be("humbled").evaluate().unwrap();
    /// assert!(!result.passed);
    /// assert_eq!(result.reason.unwrap(), "expected true, got false");
    /// ```
    pub fn evaluate(&self) -> Result<AssertionResult, DispatchError> {
        self.evaluate_polarity(true)
    }

    /// Evaluate that the predicate does NOT hold, without panicking.
    pub fn evaluate_not(&self) -> Result<AssertionResult, DispatchError> {
        self.evaluate_polarity(false)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn evaluate_polarity(&self, expected: bool) -> Result<AssertionResult, DispatchError> {
        let actual = dispatch(self.subject, &self.predicate, &self.args)?;
        let description = self.build_description(expected);

        if actual == expected {
            Ok(AssertionResult::pass(description))
        } else {
            Ok(AssertionResult::fail(
                description,
                format!("expected {expected}, got {actual}"),
            ))
        }
    }

    /// Build a human-readable description of what this assertion checks.
    fn build_description(&self, expected: bool) -> String {
        let bare = self
            .predicate
            .strip_prefix("be_")
            .unwrap_or(self.predicate.as_str())
            .trim_end_matches(QUERY_MARKER);
        let polarity = if expected { "" } else { "not " };
        let args = FailureFormatter::plain().format_args(&self.args);

        format!(
            "{} to {}be {}{}",
            self.subject.describe(),
            polarity,
            bare,
            args
        )
    }
}

/// Panic with the standard diagnostics unless the evaluation passed.
pub(crate) fn finish(evaluation: Result<AssertionResult, DispatchError>) {
    match evaluation {
        Ok(result) if result.passed => {}
        Ok(result) => panic_mismatch(&result),
        Err(err) => panic_dispatch(err),
    }
}

pub(crate) fn panic_mismatch(result: &AssertionResult) -> ! {
    let reason = result.reason.as_deref().unwrap_or("unknown reason");
    panic!(
        "{}",
        FailureFormatter::with_defaults().render_failure(&result.description, reason)
    );
}

pub(crate) fn panic_dispatch(err: DispatchError) -> ! {
    match err {
        DispatchError::NoSuchPredicate { .. } => panic!("dispatch failed: {err}"),
        DispatchError::Raised(raised) => panic!("predicate raised: {raised}"),
    }
}
