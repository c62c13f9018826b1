//! Human-readable descriptions of preconditions and their mismatches

use std::fmt;

/// Text builder used by preconditions to describe themselves.
///
/// Values are written in Rust string-literal syntax (`"users"`) so that
/// blank or oddly spaced table names stay visible in failure messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    text: String,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Append a value in quoted form
    pub fn append_value(&mut self, value: &str) -> &mut Self {
        self.text.push_str(&format!("{:?}", value));
        self
    }

    /// Append quoted values framed by `start` and `end` and joined by
    /// `separator`. Nothing is written for an empty list.
    pub fn append_value_list<I, S>(&mut self, start: &str, separator: &str, end: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return self;
        }

        self.text.push_str(start);
        let mut first = true;
        for value in values {
            if !first {
                self.text.push_str(separator);
            }
            first = false;
            self.append_value(value.as_ref());
        }
        self.text.push_str(end);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
