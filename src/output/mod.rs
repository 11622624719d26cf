//! Failure formatting for assertion diagnostics.
//!
//! This module renders the values that appear in failure output: query
//! arguments and canned responses are truncated to a configurable width, and
//! the failed description is colored when writing to a terminal.
//!
//! # Example
//!
//! ```rust
//! use attest::{FailureFormatter, FormatConfig};
//!
//! let formatter = FailureFormatter::new(FormatConfig::new().truncate_at(80).colors(false));
//! let message = formatter.render_failure("\"OOPs\" to have 3 characters", "expected 3, got 4");
//! assert!(message.starts_with("assertion failed"));
//! ```

mod config;
mod formatter;

pub use config::FormatConfig;
pub use formatter::FailureFormatter;
