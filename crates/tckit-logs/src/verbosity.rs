//! Verbosity levels and the routing decision

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ParseVerbosityError;

/// Substrings that mark a line as the contained application's own log
/// output (PostgreSQL-style `: LEVEL:  ` prefixes and generic ` LOG: `).
///
/// This is a plain substring check; lines that happen to contain one of
/// these markers in their message text are demoted as well.
const EMBEDDED_LOG_MARKERS: [&str; 4] = [": DEBUG:  ", ": NOTICE:  ", ": INFO:  ", " LOG: "];

/// Which container stream a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    StdOut,
    StdErr,
}

/// Severity a routed line is emitted at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
}

/// How much container output to forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Verbosity {
    /// Forward everything: stdout at info, stderr at warn
    All,
    /// Forward stdout; demote stderr lines that look like embedded
    /// application logging to debug
    #[default]
    Partial,
    /// Forward nothing
    None,
}

impl Verbosity {
    /// Decide the severity for a line, or `None` if it is not forwarded.
    pub fn classify(self, stream: OutputStream, line: &str) -> Option<Severity> {
        match (self, stream) {
            (Verbosity::None, _) => None,
            (Verbosity::All, OutputStream::StdOut) => Some(Severity::Info),
            (Verbosity::All, OutputStream::StdErr) => Some(Severity::Warn),
            (Verbosity::Partial, OutputStream::StdOut) => Some(Severity::Info),
            (Verbosity::Partial, OutputStream::StdErr) => {
                if is_embedded_log_line(line) {
                    Some(Severity::Debug)
                } else {
                    Some(Severity::Warn)
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verbosity::All => "all",
            Verbosity::Partial => "partial",
            Verbosity::None => "none",
        }
    }
}

/// Does the line look like the contained application's own log output?
pub fn is_embedded_log_line(line: &str) -> bool {
    EMBEDDED_LOG_MARKERS.iter().any(|marker| line.contains(marker))
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verbosity {
    type Err = ParseVerbosityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Verbosity::All),
            "partial" | "some" => Ok(Verbosity::Partial),
            "none" => Ok(Verbosity::None),
            _ => Err(ParseVerbosityError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Verbosity {
    type Error = ParseVerbosityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Verbosity> for String {
    fn from(value: Verbosity) -> Self {
        value.as_str().to_string()
    }
}
