//! Classification verdict for a URL.

use serde::Serialize;

/// Result of running a URL through the pattern classifier. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Safe,
    Suspicious,
}

impl Verdict {
    pub fn is_suspicious(self) -> bool {
        matches!(self, Verdict::Suspicious)
    }

    /// Human-readable message shown to end users.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Safe => "The URL appears to be safe.",
            Verdict::Suspicious => "The URL is potentially malicious.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Safe => "SAFE",
            Verdict::Suspicious => "SUSPICIOUS",
        }
    }
}
