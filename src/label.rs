//! Label value tuples and the metric/label name grammars.
//!
//! # References
//!
//! - [Data model](https://prometheus.io/docs/concepts/data_model/)
//! - [Metric and label naming](https://prometheus.io/docs/practices/naming/)
use crate::{ErrorKind, Result};

/// An ordered tuple of label values.
///
/// A family pairs these positionally with its declared label names, and uses
/// the tuple as the lookup key for the primitive it addresses. Equality and
/// hashing are positional: `["a", "b"]` and `["b", "a"]` are different keys.
///
/// Label values may contain any UTF-8 characters.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelValues(Vec<String>);
impl LabelValues {
    /// Makes a new `LabelValues` instance.
    pub fn new(values: Vec<String>) -> Self {
        LabelValues(values)
    }

    /// Returns the number of values in this tuple.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if this tuple has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|v| v.as_str())
    }

    pub(crate) fn push(&mut self, value: String) {
        self.0.push(value);
    }
}
impl From<Vec<String>> for LabelValues {
    fn from(values: Vec<String>) -> Self {
        LabelValues(values)
    }
}
impl<'a> From<&'a [&'a str]> for LabelValues {
    fn from(values: &'a [&'a str]) -> Self {
        LabelValues(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Returns `true` if `name` matches the metric name regex `[a-zA-Z_:][a-zA-Z0-9_:]*`.
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some('a'..='z') | Some('A'..='Z') | Some('_') | Some(':') => {}
        _ => return false,
    }
    chars.all(|c| match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | ':' => true,
        _ => false,
    })
}

/// Returns `true` if `name` matches the label name regex `[a-zA-Z_][a-zA-Z0-9_]*`
/// and does not start with `__` (reserved for internal use).
///
/// The empty string is accepted: families without labels are permitted.
pub fn is_valid_label_name(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    if name.starts_with("__") {
        // reserved for internal use
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some('a'..='z') | Some('A'..='Z') | Some('_') => {}
        _ => return false,
    }
    chars.all(|c| match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => true,
        _ => false,
    })
}

pub(crate) fn validate_metric_name(name: &str) -> Result<()> {
    track_assert!(
        is_valid_metric_name(name),
        ErrorKind::InvalidInput,
        "malformed metric name: {:?}",
        name
    );
    Ok(())
}

pub(crate) fn validate_label_name(name: &str) -> Result<()> {
    track_assert!(
        is_valid_label_name(name),
        ErrorKind::InvalidInput,
        "malformed label name: {:?}",
        name
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn metric_name_grammar() {
        assert!(is_valid_metric_name("_foo:bar9"));
        assert!(is_valid_metric_name("http_requests_total"));
        assert!(is_valid_metric_name(":leading_colon"));
        assert!(!is_valid_metric_name("9foo"));
        assert!(!is_valid_metric_name(""));
        assert!(!is_valid_metric_name("foo-bar"));
        assert!(!is_valid_metric_name("foo bar"));
    }

    #[test]
    fn label_name_grammar() {
        assert!(is_valid_label_name("animal"));
        assert!(is_valid_label_name("_private"));
        assert!(is_valid_label_name(""));
        assert!(!is_valid_label_name("__reserved"));
        assert!(!is_valid_label_name("9lives"));
        assert!(!is_valid_label_name("no-dash"));
        assert!(!is_valid_label_name("le:"));
    }

    #[test]
    fn label_values_are_positional() {
        let ab = LabelValues::from(&["a", "b"][..]);
        let ba = LabelValues::from(&["b", "a"][..]);
        assert_ne!(ab, ba);
        assert_eq!(ab, LabelValues::new(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(ab.len(), 2);
    }
}
