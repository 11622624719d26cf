//! Fluent assertions on a block that may raise.
//!
//! `expect_block` captures the outcome of one query invocation so the test
//! can assert on the raised message instead of the boolean result.

#[cfg(feature = "pattern")]
use regex::Regex;

use super::builder::{finish, panic_mismatch, AssertionResult};
use crate::dispatch::QueryOutcome;

/// Create an expectation on a block's outcome.
///
/// # Example
///
/// ```rust
/// use attest::{expect_block, RaisedError};
///
/// expect_block(|| Err(RaisedError::new("killer's name is unknown")))
///     .to_raise("killer's name is unknown");
/// ```
pub fn expect_block<F>(block: F) -> BlockExpectation
where
    F: FnOnce() -> QueryOutcome,
{
    BlockExpectation { outcome: block() }
}

/// Holds a captured query outcome and asserts on raised errors.
pub struct BlockExpectation {
    outcome: QueryOutcome,
}

impl BlockExpectation {
    // =========================================================================
    // Assertion methods (panic on failure)
    // =========================================================================

    /// Assert the block raised an error whose message matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if nothing was raised, or if the raised message differs.
    pub fn to_raise(&self, message: &str) {
        let result = self.evaluate_raise(message);
        if !result.passed {
            panic_mismatch(&result);
        }
    }

    /// Assert the block raised an error whose message matches the regex
    /// pattern.
    ///
    /// # Panics
    ///
    /// Panics if nothing was raised, if the message does not match, or if
    /// the pattern is not a valid regex.
    #[cfg(feature = "pattern")]
    pub fn to_raise_matching(&self, pattern: &str) {
        let result = self.evaluate_raise_matching(pattern);
        if !result.passed {
            panic_mismatch(&result);
        }
    }

    /// Assert the block completed without raising.
    ///
    /// # Panics
    ///
    /// Panics if the block raised.
    pub fn to_not_raise(&self) {
        finish(Ok(self.evaluate_no_raise()));
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    /// Evaluate the exact-message raise assertion without panicking.
    pub fn evaluate_raise(&self, message: &str) -> AssertionResult {
        let description = format!("block to raise {message:?}");

        match &self.outcome {
            Err(raised) if raised.message() == message => AssertionResult::pass(description),
            Err(raised) => AssertionResult::fail(
                description,
                format!("raised {:?} instead", raised.message()),
            ),
            Ok(value) => AssertionResult::fail(
                description,
                format!("no error was raised, the query returned {value}"),
            ),
        }
    }

    /// Evaluate the pattern-matching raise assertion without panicking.
    #[cfg(feature = "pattern")]
    pub fn evaluate_raise_matching(&self, pattern: &str) -> AssertionResult {
        let description = format!("block to raise a message matching '{pattern}'");

        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                return AssertionResult::fail(description, format!("invalid regex '{pattern}': {e}"))
            }
        };

        match &self.outcome {
            Err(raised) if re.is_match(raised.message()) => AssertionResult::pass(description),
            Err(raised) => AssertionResult::fail(
                description,
                format!("raised {:?} instead", raised.message()),
            ),
            Ok(value) => AssertionResult::fail(
                description,
                format!("no error was raised, the query returned {value}"),
            ),
        }
    }

    /// Evaluate that nothing was raised, without panicking.
    pub fn evaluate_no_raise(&self) -> AssertionResult {
        let description = "block to not raise".to_string();

        match &self.outcome {
            Ok(_) => AssertionResult::pass(description),
            Err(raised) => {
                AssertionResult::fail(description, format!("raised {:?}", raised.message()))
            }
        }
    }

    /// The captured outcome, for custom assertions.
    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }
}
