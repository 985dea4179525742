//! Regular-expression patterns over text subjects.

use regex::Regex;

use crate::bindings::{Bindings, MATCH_DATA};
use crate::value::Value;

/// Compiled regex used as a pattern element.
#[derive(Clone, Debug)]
pub struct RegexPattern(Regex);

impl RegexPattern {
    pub fn new(re: Regex) -> Self {
        RegexPattern(re)
    }

    /// Compile `source` into a pattern.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(RegexPattern)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Match a string subject; anything else is a non-match.
    ///
    /// On success the captures are published under [`MATCH_DATA`].
    pub(crate) fn matches(&self, subject: &Value, env: &mut Bindings) -> bool {
        let Some(text) = subject.as_str() else {
            return false;
        };
        let Some(captures) = self.0.captures(text) else {
            return false;
        };
        let groups = captures
            .iter()
            .map(|group| group.map_or(Value::Nil, |m| Value::string(m.as_str())))
            .collect();
        env.bind(MATCH_DATA, Value::list(groups));
        true
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
