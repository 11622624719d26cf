//! The subject capability contract and built-in container subjects.
//!
//! Dynamic predicate dispatch needs an explicit contract in Rust: a subject
//! exposes its queries by name through [`Subject::query`], and the dispatcher
//! resolves a derived name against that table. Container-like values carry a
//! natural element count instead of (or in addition to) queries.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::dispatch::QueryOutcome;

/// A value that assertions can be made against.
///
/// Implementors expose zero/one-argument boolean queries by name and, for
/// container-like values, a natural element count. Resolution happens by name
/// against the subject's own table; there is no central registry of
/// predicates.
///
/// # Example
///
/// ```rust
/// use attest::{QueryOutcome, Subject};
/// use serde_json::Value;
///
/// struct Fighter {
///     power: u64,
/// }
///
/// impl Subject for Fighter {
///     fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome> {
///         match query {
///             "surpassed_by?" => {
///                 let rival = args.first()?.as_u64()?;
///                 Some(Ok(self.power < rival))
///             }
///             _ => None,
///         }
///     }
///
///     fn describe(&self) -> String {
///         format!("a fighter at power {}", self.power)
///     }
/// }
/// ```
pub trait Subject {
    /// Resolve and invoke the query named `query` with `args`.
    ///
    /// Returns `None` when the subject has no such query, or when the query
    /// exists but cannot be invoked with `args`. The dispatcher turns `None`
    /// into a fatal diagnostic, never into a false outcome.
    fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome>;

    /// The subject's natural element count, if it has one.
    fn count(&self) -> Option<usize> {
        None
    }

    /// Display name used in diagnostics.
    fn describe(&self) -> String;
}

impl<S: Subject + ?Sized> Subject for &S {
    fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome> {
        (**self).query(query, args)
    }

    fn count(&self) -> Option<usize> {
        (**self).count()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// Strings count characters, not bytes.
impl Subject for str {
    fn query(&self, _query: &str, _args: &[Value]) -> Option<QueryOutcome> {
        None
    }

    fn count(&self) -> Option<usize> {
        Some(self.chars().count())
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl Subject for String {
    fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome> {
        self.as_str().query(query, args)
    }

    fn count(&self) -> Option<usize> {
        self.as_str().count()
    }

    fn describe(&self) -> String {
        self.as_str().describe()
    }
}

impl<T> Subject for [T] {
    fn query(&self, _query: &str, _args: &[Value]) -> Option<QueryOutcome> {
        None
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn describe(&self) -> String {
        format!("a sequence of {} elements", self.len())
    }
}

impl<T> Subject for Vec<T> {
    fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome> {
        self.as_slice().query(query, args)
    }

    fn count(&self) -> Option<usize> {
        self.as_slice().count()
    }

    fn describe(&self) -> String {
        self.as_slice().describe()
    }
}

impl<K, V> Subject for HashMap<K, V> {
    fn query(&self, _query: &str, _args: &[Value]) -> Option<QueryOutcome> {
        None
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn describe(&self) -> String {
        format!("a mapping of {} entries", self.len())
    }
}

impl<K, V> Subject for BTreeMap<K, V> {
    fn query(&self, _query: &str, _args: &[Value]) -> Option<QueryOutcome> {
        None
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn describe(&self) -> String {
        format!("a mapping of {} entries", self.len())
    }
}

/// JSON values carry the cardinality of their shape: array length, object
/// entry count, string character count.
impl Subject for Value {
    fn query(&self, _query: &str, _args: &[Value]) -> Option<QueryOutcome> {
        None
    }

    fn count(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Object(entries) => Some(entries.len()),
            Value::String(s) => Some(s.chars().count()),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}
