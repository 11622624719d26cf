//! Fluent assertion builder for a subject's natural element count.

use super::builder::{finish, AssertionResult};
use crate::dispatch::DispatchError;
use crate::subject::Subject;

/// Builder for a size assertion.
///
/// The unit label attached with [`SizeAssertion::of`] is purely descriptive:
/// it appears in diagnostics but has no effect on the comparison.
///
/// # Example
///
/// ```rust
/// use attest::expect;
///
/// expect(&"OOPs").have(4).of("characters").to_hold();
/// expect(&vec![1, 2, 3]).have(3).of("things").to_hold();
/// ```
pub struct SizeAssertion<'a> {
    subject: &'a dyn Subject,
    expected: usize,
    unit: Option<String>,
}

impl<'a> SizeAssertion<'a> {
    /// Create a new size assertion.
    pub fn new(subject: &'a dyn Subject, expected: usize) -> Self {
        Self {
            subject,
            expected,
            unit: None,
        }
    }

    // =========================================================================
    // Builder methods (chainable)
    // =========================================================================

    /// Attach a descriptive unit label (`"characters"`, `"players"`).
    ///
    /// The label is echoed in diagnostics and carries no semantic effect.
    pub fn of(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    // =========================================================================
    // Assertion methods (panic on failure)
    // =========================================================================

    /// Assert the subject's element count equals the expected count.
    ///
    /// # Panics
    ///
    /// Panics with a mismatch diagnostic on a wrong count, and with a
    /// dispatch diagnostic if the subject has no derivable count.
    pub fn to_hold(&self) {
        finish(self.evaluate());
    }

    /// Assert the subject's element count differs from the expected count.
    ///
    /// # Panics
    ///
    /// Panics if the counts are equal, or if no count can be derived.
    pub fn to_not_hold(&self) {
        finish(self.evaluate_not());
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    /// Evaluate the assertion without panicking (expects counts to match).
    ///
    /// A subject with no derivable count is `Err`, never a silent mismatch.
    pub fn evaluate(&self) -> Result<AssertionResult, DispatchError> {
        self.evaluate_polarity(true)
    }

    /// Evaluate that the counts differ, without panicking.
    pub fn evaluate_not(&self) -> Result<AssertionResult, DispatchError> {
        self.evaluate_polarity(false)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn evaluate_polarity(&self, want_match: bool) -> Result<AssertionResult, DispatchError> {
        let Some(actual) = self.subject.count() else {
            return Err(DispatchError::NoSuchPredicate {
                query: "length".to_string(),
                subject: self.subject.describe(),
            });
        };

        let unit = self.unit.as_deref().unwrap_or("elements");
        let polarity = if want_match { "" } else { "not " };
        let description = format!(
            "{} to {}have {} {}",
            self.subject.describe(),
            polarity,
            self.expected,
            unit
        );

        if (actual == self.expected) == want_match {
            Ok(AssertionResult::pass(description))
        } else if want_match {
            Ok(AssertionResult::fail(
                description,
                format!("expected {} {unit}, got {actual}", self.expected),
            ))
        } else {
            Ok(AssertionResult::fail(
                description,
                format!("count was exactly {actual}"),
            ))
        }
    }
}
