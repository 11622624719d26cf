//! Predicate name derivation and dispatch.
//!
//! This module turns a symbolic assertion name into a query on a subject.
//! All name transformation logic (the `be_` prefix, the trailing `?` marker,
//! the `is_` alternative) lives here.

use serde_json::Value;

use crate::subject::Subject;

/// The trailing marker that distinguishes a query name from a predicate name.
pub const QUERY_MARKER: char = '?';

/// An error raised from inside a predicate body.
///
/// The message is carried verbatim so raised-error assertions can compare it
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RaisedError {
    message: String,
}

impl RaisedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The raised message, verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of invoking a single query on a subject.
pub type QueryOutcome = Result<bool, RaisedError>;

/// Error type for dispatch failures.
///
/// Both variants are fatal to the assertion that triggered the dispatch;
/// neither is ever reported as a false outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The derived query name does not exist on the subject.
    #[error("undefined predicate `{query}` for {subject}")]
    NoSuchPredicate { query: String, subject: String },

    /// The subject's query raised while being invoked.
    #[error("{0}")]
    Raised(#[from] RaisedError),
}

/// Derive the query name for a predicate.
///
/// Strips a leading `be_` prefix (if present) and appends the trailing `?`
/// marker. A name already carrying the marker is left as is.
///
/// # Example
///
/// ```rust
/// use attest::derive_query_name;
///
/// assert_eq!(derive_query_name("surpassed_by"), "surpassed_by?");
/// assert_eq!(derive_query_name("be_humbled"), "humbled?");
/// assert_eq!(derive_query_name("confusing?"), "confusing?");
/// ```
pub fn derive_query_name(predicate: &str) -> String {
    let bare = predicate.strip_prefix("be_").unwrap_or(predicate);
    if bare.ends_with(QUERY_MARKER) {
        bare.to_string()
    } else {
        format!("{bare}{QUERY_MARKER}")
    }
}

/// Candidate query names, in resolution order: `x?` then `is_x?`.
fn candidates(predicate: &str) -> [String; 2] {
    let primary = derive_query_name(predicate);
    let alternative = format!("is_{primary}");
    [primary, alternative]
}

/// Resolve `predicate` on `subject` and invoke it with `args`.
///
/// The boolean outcome is the assertion outcome. A name that resolves to
/// nothing is a [`DispatchError::NoSuchPredicate`]; a query that raises
/// propagates as [`DispatchError::Raised`] with its message intact.
pub fn dispatch(
    subject: &dyn Subject,
    predicate: &str,
    args: &[Value],
) -> Result<bool, DispatchError> {
    let [primary, alternative] = candidates(predicate);

    for query in [&primary, &alternative] {
        if let Some(outcome) = subject.query(query, args) {
            return outcome.map_err(DispatchError::from);
        }
    }

    Err(DispatchError::NoSuchPredicate {
        query: primary,
        subject: subject.describe(),
    })
}

/// Truthiness coercion for canned values: only `null` and `false` are falsy.
pub fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    /// Fixture with one plain query, one `is_`-style query, and one that
    /// always raises.
    struct Rig {
        armed: bool,
    }

    impl Subject for Rig {
        fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome> {
            match query {
                "armed?" => Some(Ok(self.armed)),
                "is_stable?" => Some(Ok(true)),
                "bigger_than?" => {
                    let rival = args.first()?.as_u64()?;
                    Some(Ok(10 < rival))
                }
                "exploding?" => Some(Err(RaisedError::new("the rig exploded"))),
                _ => None,
            }
        }

        fn describe(&self) -> String {
            "the rig".to_string()
        }
    }

    #[test]
    fn test_derive_strips_prefix() {
        assert_eq!(derive_query_name("be_surpassed_by"), "surpassed_by?");
    }

    #[test]
    fn test_derive_appends_marker() {
        assert_eq!(derive_query_name("humbled"), "humbled?");
    }

    #[test]
    fn test_derive_keeps_existing_marker() {
        assert_eq!(derive_query_name("humbled?"), "humbled?");
        assert_eq!(derive_query_name("be_humbled?"), "humbled?");
    }

    #[test]
    fn test_dispatch_true_and_false() {
        assert_eq!(dispatch(&Rig { armed: true }, "armed", &[]), Ok(true));
        assert_eq!(dispatch(&Rig { armed: false }, "armed", &[]), Ok(false));
    }

    #[test]
    fn test_dispatch_resolves_is_alternative() {
        assert_eq!(dispatch(&Rig { armed: false }, "stable", &[]), Ok(true));
    }

    #[test]
    fn test_dispatch_with_argument() {
        let rig = Rig { armed: false };
        assert_eq!(dispatch(&rig, "bigger_than", &[json!(11)]), Ok(true));
        assert_eq!(dispatch(&rig, "bigger_than", &[json!(3)]), Ok(false));
    }

    #[test]
    fn test_dispatch_unresolvable() {
        let err = dispatch(&Rig { armed: true }, "be_humbled", &[]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::NoSuchPredicate {
                query: "humbled?".to_string(),
                subject: "the rig".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "undefined predicate `humbled?` for the rig"
        );
    }

    #[test]
    fn test_wrong_arity_is_unresolvable() {
        // bigger_than? exists but is not callable without its argument
        let err = dispatch(&Rig { armed: true }, "bigger_than", &[]).unwrap_err();
        assert!(matches!(err, DispatchError::NoSuchPredicate { .. }));
    }

    #[test]
    fn test_dispatch_propagates_raised_verbatim() {
        let err = dispatch(&Rig { armed: true }, "exploding", &[]).unwrap_err();
        match err {
            DispatchError::Raised(raised) => {
                assert_eq!(raised.message(), "the rig exploded");
            }
            other => panic!("expected a raised error, got {other:?}"),
        }
    }

    #[test]
    fn test_truthiness() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(0)));
        assert!(truthy(&json!("")));
        assert!(truthy(&json!([])));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(null)));
    }

    /// Arbitrary generator for predicate names without the `be_` prefix.
    fn arb_predicate() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,24}".prop_filter("name must not carry the be_ prefix", |s| {
            !s.starts_with("be_")
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Derivation always ends in the marker, ignores the `be_` prefix,
        /// and is idempotent.
        #[test]
        fn derivation_is_prefix_insensitive_and_idempotent(name in arb_predicate()) {
            let derived = derive_query_name(&name);
            prop_assert!(derived.ends_with(QUERY_MARKER));

            let prefixed = derive_query_name(&format!("be_{name}"));
            prop_assert_eq!(&prefixed, &derived);

            prop_assert_eq!(derive_query_name(&derived), derived);
        }
    }
}
