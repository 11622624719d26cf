//! # attest
//!
//! A fluent assertion library for predicate-style queries.
//!
//! Natural-language assertion names resolve mechanically to boolean queries
//! on a subject: asserting `be("humbled")` looks up and invokes the
//! subject's `humbled?` query. Size assertions compare a subject's natural
//! element count against an expected integer, doubles stand in for real
//! subjects with canned answers, and a recording spy verifies at teardown
//! that declared queries were received.
//!
//! ## Quick Start
//!
//! ```rust
//! use attest::{double, expect};
//!
//! let proud_man = double!("proud man", "humbled" => true);
//! expect(&proud_man).be("humbled").to_hold();
//!
//! expect(&"OOPs").have(4).of("characters").to_hold();
//! ```
//!
//! ## Real Subjects
//!
//! A type opts in by implementing [`Subject`], exposing its queries by
//! derived name:
//!
//! ```rust
//! use attest::{expect, QueryOutcome, Subject};
//! use serde_json::Value;
//!
//! struct Fighter {
//!     power: u64,
//! }
//!
//! impl Subject for Fighter {
//!     fn query(&self, query: &str, args: &[Value]) -> Option<QueryOutcome> {
//!         match query {
//!             "surpassed_by?" => {
//!                 let rival = args.first()?.as_u64()?;
//!                 Some(Ok(self.power < rival))
//!             }
//!             _ => None,
//!         }
//!     }
//!
//!     fn describe(&self) -> String {
//!         format!("a fighter at power {}", self.power)
//!     }
//! }
//!
//! let vegeta = Fighter { power: 999_999_999 };
//! expect(&vegeta)
//!     .be("surpassed_by")
//!     .with_arg(1_000_000_000u64)
//!     .to_hold();
//! ```
//!
//! ## Method-Call Expectations
//!
//! ```rust
//! use attest::{double, expect, Spy};
//!
//! let man = double!("man", "more_enlightened_than" => false);
//! let spy = Spy::on(&man)
//!     .expect_received("more_enlightened_than")
//!     .and_return(true);
//!
//! expect(&spy).be("more_enlightened_than").with_arg("god").to_hold();
//! spy.verify().unwrap();
//! ```

pub mod dispatch;
pub mod double;
pub mod fluent;
pub mod output;
pub mod registry;
pub mod spy;
pub mod subject;

// Core types
pub use dispatch::{
    derive_query_name, dispatch, truthy, DispatchError, QueryOutcome, RaisedError,
};
pub use fluent::{
    expect, expect_block, AssertionResult, BlockExpectation, Expectation, PredicateAssertion,
    SizeAssertion,
};
pub use subject::Subject;

// Stand-ins and recording
pub use double::Double;
pub use spy::{Spy, UnmetExpectation};

// Test-scoped state
pub use registry::Registry;

// Failure formatting
pub use output::{FailureFormatter, FormatConfig};
