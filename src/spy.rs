//! Recording wrapper for method-call expectations.
//!
//! A [`Spy`] wraps a subject, counts every query that resolves through it,
//! and checks declared expectations at teardown. Declaring an expectation
//! with a canned return value overrides the wrapped subject's own query for
//! the duration of the test.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::{derive_query_name, truthy, QueryOutcome};
use crate::subject::Subject;

/// A declared method-call expectation was not satisfied by teardown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {subject} to have received `{query}` {expected}, got {actual} calls")]
pub struct UnmetExpectation {
    pub subject: String,
    pub query: String,
    pub expected: String,
    pub actual: usize,
}

/// One declared expectation on a query.
#[derive(Debug, Clone)]
struct Declaration {
    query: String,
    min: usize,
    exact: Option<usize>,
    response: Option<Value>,
}

impl Declaration {
    fn satisfied_by(&self, actual: usize) -> bool {
        match self.exact {
            Some(n) => actual == n,
            None => actual >= self.min,
        }
    }

    fn expected_calls(&self) -> String {
        match (self.exact, self.min) {
            (Some(n), _) => format!("exactly {n} times"),
            (None, 1) => "at least once".to_string(),
            (None, n) => format!("at least {n} times"),
        }
    }
}

/// Recording wrapper around a subject.
///
/// The spy delegates queries to the wrapped subject and counts invocations
/// per derived query name. Expectations are verified with [`Spy::verify`];
/// dropping a spy that was never verified runs the check then, and panics on
/// unmet expectations.
///
/// # Example
///
/// ```rust
/// use attest::{double, expect, Spy};
///
/// let man = double!("man", "more_enlightened_than" => false);
/// let spy = Spy::on(&man)
///     .expect_received("more_enlightened_than")
///     .and_return(true);
///
/// expect(&spy).be("more_enlightened_than").with_arg("god").to_hold();
/// spy.verify().unwrap();
/// ```
pub struct Spy<'a> {
    target: &'a dyn Subject,
    declarations: Vec<Declaration>,
    received: RefCell<HashMap<String, usize>>,
    verified: Cell<bool>,
}

impl<'a> Spy<'a> {
    /// Wrap `target` in a recording spy.
    pub fn on(target: &'a dyn Subject) -> Self {
        Self {
            target,
            declarations: Vec::new(),
            received: RefCell::new(HashMap::new()),
            verified: Cell::new(false),
        }
    }

    // =========================================================================
    // Builder methods (chainable)
    // =========================================================================

    /// Declare that the named query must be received at least once before
    /// teardown. The name is accepted in any assertion spelling
    /// (`"more_enlightened_than"`, `"be_more_enlightened_than"`, `"x?"`).
    pub fn expect_received(mut self, query: &str) -> Self {
        self.declarations.push(Declaration {
            query: derive_query_name(query),
            min: 1,
            exact: None,
            response: None,
        });
        self
    }

    /// Override the most recently declared query's outcome with a canned
    /// value for the duration of the test. The wrapped subject's own query
    /// is not consulted.
    pub fn and_return(mut self, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).expect("canned value should serialize to JSON");
        self.last_declaration("and_return").response = Some(value);
        self
    }

    /// Require the most recently declared query to be received exactly `n`
    /// times.
    pub fn times(mut self, n: usize) -> Self {
        self.last_declaration("times").exact = Some(n);
        self
    }

    /// Require the most recently declared query to be received at least `n`
    /// times.
    pub fn at_least(mut self, n: usize) -> Self {
        self.last_declaration("at_least").min = n;
        self
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Run the teardown-time check over every declared expectation.
    ///
    /// Marks the spy verified either way, so dropping it afterwards is
    /// silent.
    pub fn verify(&self) -> Result<(), UnmetExpectation> {
        self.verified.set(true);

        for declaration in &self.declarations {
            let actual = self.count_for(&declaration.query);
            if !declaration.satisfied_by(actual) {
                return Err(UnmetExpectation {
                    subject: self.target.describe(),
                    query: declaration.query.clone(),
                    expected: declaration.expected_calls(),
                    actual,
                });
            }
        }

        Ok(())
    }

    /// Number of times the named query was received, in any assertion
    /// spelling.
    pub fn received_count(&self, query: &str) -> usize {
        self.count_for(&derive_query_name(query))
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn last_declaration(&mut self, method: &str) -> &mut Declaration {
        self.declarations
            .last_mut()
            .unwrap_or_else(|| panic!("{method}() requires a preceding expect_received()"))
    }

    fn response_for(&self, query: &str) -> Option<&Value> {
        self.declarations
            .iter()
            .find(|declaration| declaration.query == query)
            .and_then(|declaration| declaration.response.as_ref())
    }

    fn count_for(&self, query: &str) -> usize {
        self.received.borrow().get(query).copied().unwrap_or(0)
    }

    fn record(&self, query: &str) {
        *self
            .received
            .borrow_mut()
            .entry(query.to_string())
            .or_insert(0) += 1;
    }
}

impl Subject for Spy<'_> {
    fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome> {
        let outcome = match self.response_for(query) {
            Some(value) => Some(Ok(truthy(value))),
            None => self.target.query(query, args),
        };

        if outcome.is_some() {
            self.record(query);
        }

        outcome
    }

    fn count(&self) -> Option<usize> {
        self.target.count()
    }

    fn describe(&self) -> String {
        self.target.describe()
    }
}

impl Drop for Spy<'_> {
    fn drop(&mut self) {
        if self.verified.get() || std::thread::panicking() {
            return;
        }
        if let Err(unmet) = self.verify() {
            panic!("assertion failed: {unmet}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use crate::double::Double;
    use serde_json::json;

    fn man() -> Double {
        Double::new("man").returning("more_enlightened_than", false)
    }

    #[test]
    fn test_spy_delegates_and_counts() {
        let target = man();
        let spy = Spy::on(&target);

        assert_eq!(dispatch(&spy, "more_enlightened_than", &[json!(1)]), Ok(false));
        assert_eq!(spy.received_count("more_enlightened_than"), 1);
        assert_eq!(spy.received_count("be_more_enlightened_than"), 1);
        assert_eq!(spy.received_count("humbled"), 0);
    }

    #[test]
    fn test_and_return_overrides_target() {
        let target = man();
        let spy = Spy::on(&target)
            .expect_received("more_enlightened_than")
            .and_return(true);

        // the target would answer false; the override wins
        assert_eq!(dispatch(&spy, "more_enlightened_than", &[json!(1)]), Ok(true));
        assert!(spy.verify().is_ok());
    }

    #[test]
    fn test_override_resolves_queries_the_target_lacks() {
        let target = Double::new("bare");
        let spy = Spy::on(&target).expect_received("humbled").and_return(true);

        assert_eq!(dispatch(&spy, "humbled", &[]), Ok(true));
        assert!(spy.verify().is_ok());
    }

    #[test]
    fn test_unresolved_queries_are_not_recorded() {
        let target = Double::new("bare");
        let spy = Spy::on(&target);

        assert!(dispatch(&spy, "humbled", &[]).is_err());
        assert_eq!(spy.received_count("humbled"), 0);
        spy.verify().unwrap();
    }

    #[test]
    fn test_verify_reports_unmet_expectation() {
        let target = man();
        let spy = Spy::on(&target).expect_received("more_enlightened_than");

        let unmet = spy.verify().unwrap_err();
        assert_eq!(unmet.query, "more_enlightened_than?");
        assert_eq!(unmet.actual, 0);
        assert_eq!(
            unmet.to_string(),
            "expected #<Double \"man\"> to have received `more_enlightened_than?` at least once, got 0 calls"
        );
    }

    #[test]
    fn test_exact_count_constraint() {
        let target = man();
        let spy = Spy::on(&target)
            .expect_received("more_enlightened_than")
            .times(2);

        let _ = dispatch(&spy, "more_enlightened_than", &[json!(1)]);
        assert!(spy.verify().is_err());

        let _ = dispatch(&spy, "more_enlightened_than", &[json!(1)]);
        assert!(spy.verify().is_ok());
    }

    #[test]
    fn test_at_least_constraint() {
        let target = man();
        let spy = Spy::on(&target)
            .expect_received("more_enlightened_than")
            .at_least(2);

        let _ = dispatch(&spy, "more_enlightened_than", &[json!(1)]);
        let _ = dispatch(&spy, "more_enlightened_than", &[json!(1)]);
        let _ = dispatch(&spy, "more_enlightened_than", &[json!(1)]);
        assert!(spy.verify().is_ok());
    }

    #[test]
    #[should_panic(expected = "assertion failed: expected #<Double \"man\"> to have received")]
    fn test_dropping_unverified_spy_panics_on_unmet() {
        let target = man();
        let spy = Spy::on(&target).expect_received("more_enlightened_than");
        drop(spy);
    }

    #[test]
    fn test_dropping_satisfied_spy_is_silent() {
        let target = man();
        let spy = Spy::on(&target).expect_received("more_enlightened_than");
        let _ = dispatch(&spy, "more_enlightened_than", &[json!(1)]);
        drop(spy);
    }

    #[test]
    #[should_panic(expected = "and_return() requires a preceding expect_received()")]
    fn test_and_return_without_declaration() {
        let target = man();
        let _ = Spy::on(&target).and_return(true);
    }
}
