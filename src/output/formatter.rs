//! Rendering of values and failure messages.

use serde_json::Value;

use crate::output::config::FormatConfig;

// ANSI color codes
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Renders query arguments and failure messages for assertion diagnostics.
pub struct FailureFormatter {
    config: FormatConfig,
}

impl FailureFormatter {
    /// Create a new formatter with the given configuration.
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Create a formatter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FormatConfig::new())
    }

    /// Create a formatter that never colors, for text embedded in results.
    pub fn plain() -> Self {
        Self::new(FormatConfig::new().colors(false))
    }

    /// Format a single value, truncating if necessary.
    pub fn format_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => format!("\"{}\"", self.truncate(s)),
            other => self.truncate(&other.to_string()),
        }
    }

    /// Format a query argument list, e.g. `(1000000000, "god")`. Empty for
    /// zero-argument queries.
    pub fn format_args(&self, args: &[Value]) -> String {
        if args.is_empty() {
            return String::new();
        }

        let parts: Vec<String> = args.iter().map(|arg| self.format_value(arg)).collect();
        format!("({})", parts.join(", "))
    }

    /// Render a full failure message in the standard layout.
    pub fn render_failure(&self, description: &str, reason: &str) -> String {
        if self.config.colors_enabled {
            format!("assertion failed: expected {CYAN}{description}{RESET}\n\n  reason: {reason}\n")
        } else {
            format!("assertion failed: expected {description}\n\n  reason: {reason}\n")
        }
    }

    /// Truncate a string to the configured maximum length.
    /// Handles multi-byte UTF-8 characters safely.
    fn truncate(&self, s: &str) -> String {
        let max = self.config.truncate_at;
        let char_count = s.chars().count();

        if char_count <= max {
            s.to_string()
        } else {
            // Reserve 3 chars for "..."
            let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
            format!("{truncated}...")
        }
    }
}
