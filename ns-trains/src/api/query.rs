//! Query string construction.
//!
//! Parameters with an empty or absent value are dropped rather than sent
//! as `key=`.

use chrono::{DateTime, FixedOffset};

use crate::domain::format_date_time;

/// Ordered query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter unless `value` is empty.
    pub fn param(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        if !value.is_empty() {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Add a parameter if present and non-empty.
    pub fn opt_param<V: AsRef<str>>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Add a boolean rendered as `true`/`false`, if present.
    pub fn flag(self, key: &'static str, value: Option<bool>) -> Self {
        self.opt_param(key, value.map(|b| if b { "true" } else { "false" }))
    }

    /// Add a number, if present.
    pub fn number(self, key: &'static str, value: Option<u32>) -> Self {
        self.opt_param(key, value.map(|n| n.to_string()))
    }

    /// Add a timestamp in canonical form, if present.
    pub fn date_time(self, key: &'static str, value: Option<&DateTime<FixedOffset>>) -> Self {
        self.opt_param(key, value.map(format_date_time))
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the value sent for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}
