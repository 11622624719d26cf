//! Configuration for failure output.

use std::io::IsTerminal;

/// Configuration for failure message rendering.
///
/// Use the builder pattern to configure the output:
///
/// ```rust
/// use attest::FormatConfig;
///
/// let config = FormatConfig::new().truncate_at(80).colors(false);
/// ```
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Maximum characters before truncating a rendered value.
    pub truncate_at: usize,
    /// Whether to use ANSI colors in output.
    pub colors_enabled: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            truncate_at: 60,
            colors_enabled: std::io::stdout().is_terminal(),
        }
    }
}

impl FormatConfig {
    /// Create a new configuration with defaults: 60 character truncation,
    /// colors auto-detected from TTY.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum characters before truncating rendered values.
    pub fn truncate_at(mut self, chars: usize) -> Self {
        self.truncate_at = chars;
        self
    }

    /// Enable or disable ANSI colors.
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }
}
