//! Canned stand-in subjects.
//!
//! A double is a minimal object built for a single test: it answers only the
//! queries it was given, each with a fixed canned value, and the dispatcher
//! treats it exactly like a real subject.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::{truthy, QueryOutcome, QUERY_MARKER};
use crate::subject::Subject;

/// Attribute names that double as a stand-in's natural cardinality.
const COUNT_KEYS: [&str; 3] = ["length", "size", "count"];

/// A stand-in subject with fixed canned responses.
///
/// # Example
///
/// ```rust
/// use attest::{expect, Double};
///
/// let proud_man = Double::new("proud man").returning("humbled", true);
/// expect(&proud_man).be("humbled").to_hold();
/// ```
#[derive(Debug, Clone)]
pub struct Double {
    label: String,
    responses: HashMap<String, Value>,
}

impl Double {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            responses: HashMap::new(),
        }
    }

    /// Add a canned response for the named query.
    ///
    /// The name is accepted with or without the trailing `?` marker; the
    /// value is coerced by truthiness when the query is dispatched.
    pub fn returning(mut self, query: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).expect("canned value should serialize to JSON");
        self.responses.insert(query.to_string(), value);
        self
    }

    /// The label this double was built with.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn response(&self, query: &str) -> Option<&Value> {
        self.responses
            .get(query)
            .or_else(|| self.responses.get(query.trim_end_matches(QUERY_MARKER)))
    }
}

impl Subject for Double {
    fn query(&self, query: &str, _args: &[Value]) -> Option<QueryOutcome> {
        self.response(query).map(|value| Ok(truthy(value)))
    }

    fn count(&self) -> Option<usize> {
        COUNT_KEYS
            .iter()
            .find_map(|key| self.responses.get(*key))
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }

    fn describe(&self) -> String {
        format!("#<Double {:?}>", self.label)
    }
}

/// Build a [`Double`] from a label and canned responses.
///
/// # Example
///
/// ```rust
/// use attest::{double, expect};
///
/// let proud_man = double!("proud man", "humbled" => true);
/// expect(&proud_man).be("humbled").to_hold();
/// ```
#[macro_export]
macro_rules! double {
    ($label:expr $(, $query:expr => $value:expr)* $(,)?) => {{
        let stand_in = $crate::Double::new($label);
        $(
            let stand_in = stand_in.returning($query, $value);
        )*
        stand_in
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use serde_json::json;

    #[test]
    fn test_canned_true() {
        let stand_in = Double::new("proud man").returning("humbled", true);
        assert_eq!(dispatch(&stand_in, "humbled", &[]), Ok(true));
    }

    #[test]
    fn test_canned_falsy_values() {
        let stand_in = Double::new("x")
            .returning("humbled", false)
            .returning("present", json!(null));
        assert_eq!(dispatch(&stand_in, "humbled", &[]), Ok(false));
        assert_eq!(dispatch(&stand_in, "present", &[]), Ok(false));
    }

    #[test]
    fn test_non_boolean_values_coerce_truthy() {
        // zero and the empty string are truthy; only null and false are not
        let stand_in = Double::new("x")
            .returning("scored", 0)
            .returning("named", "");
        assert_eq!(dispatch(&stand_in, "scored", &[]), Ok(true));
        assert_eq!(dispatch(&stand_in, "named", &[]), Ok(true));
    }

    #[test]
    fn test_marker_insensitive_keys() {
        let stand_in = Double::new("x").returning("humbled?", true);
        assert_eq!(dispatch(&stand_in, "be_humbled", &[]), Ok(true));
    }

    #[test]
    fn test_unknown_query_is_unresolvable() {
        let stand_in = Double::new("proud man").returning("humbled", true);
        let err = dispatch(&stand_in, "defeated", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "undefined predicate `defeated?` for #<Double \"proud man\">"
        );
    }

    #[test]
    fn test_count_from_canned_attribute() {
        let team = Double::new("soccer team").returning("size", 11);
        assert_eq!(team.count(), Some(11));

        let plain = Double::new("no attributes");
        assert_eq!(plain.count(), None);
    }

    #[test]
    fn test_double_macro() {
        let stand_in = double!("proud man", "humbled" => true, "defeated" => false);
        assert_eq!(dispatch(&stand_in, "humbled", &[]), Ok(true));
        assert_eq!(dispatch(&stand_in, "defeated", &[]), Ok(false));
        assert_eq!(stand_in.label(), "proud man");
    }

    #[test]
    fn test_describe() {
        let stand_in = Double::new("proud man");
        assert_eq!(stand_in.describe(), "#<Double \"proud man\">");
    }
}
