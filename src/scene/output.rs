//! Entity output connections.
//!
//! A connection is one `"output" "target<SEP>input<SEP>param<SEP>delay<SEP>times"`
//! pair. The wire separator is the escape byte; the legacy comma form is
//! accepted on parse only when no escape byte is present, and export always
//! uses the escape byte.

use serde::{Deserialize, Serialize};

use crate::conv::{conv_float, conv_int};

/// The canonical field separator in connection values.
pub const OUTPUT_SEP: char = '\x1b';

/// A single output connection from one entity to another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// The firing output, e.g. `OnTrigger`.
    pub output: String,
    /// Name of the entity receiving the connection.
    pub target: String,
    /// The input fired on the target.
    pub input: String,
    /// Parameter passed with the input.
    pub param: String,
    /// Delay in seconds before the input fires.
    pub delay: f64,
    /// Number of times the connection may fire; -1 is unlimited.
    pub times: i64,
}

impl Output {
    /// A simple connection with no parameter, delay, or fire limit.
    pub fn new(
        output: impl Into<String>,
        target: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            output: output.into(),
            target: target.into(),
            input: input.into(),
            param: String::new(),
            delay: 0.0,
            times: -1,
        }
    }

    /// Parse a connection from its key/value pair.
    ///
    /// Returns `None` when the value does not hold the five wire fields.
    #[must_use]
    pub fn parse(name: &str, value: &str) -> Option<Self> {
        let fields: Vec<&str> = if value.contains(OUTPUT_SEP) {
            value.split(OUTPUT_SEP).collect()
        } else {
            value.split(',').collect()
        };
        let [target, input, param, delay, times] = fields.as_slice() else {
            return None;
        };
        Some(Self {
            output: name.to_string(),
            target: (*target).to_string(),
            input: (*input).to_string(),
            param: (*param).to_string(),
            delay: conv_float(delay, 0.0),
            times: conv_int(times, -1),
        })
    }

    /// Render back to the key/value wire pair.
    #[must_use]
    pub fn export(&self) -> (String, String) {
        let value = [
            self.target.as_str(),
            self.input.as_str(),
            self.param.as_str(),
            &self.delay.to_string(),
            &self.times.to_string(),
        ]
        .join(&OUTPUT_SEP.to_string());
        (self.output.clone(), value)
    }
}
