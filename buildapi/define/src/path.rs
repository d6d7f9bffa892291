//! Path templates with positional placeholders.
//!
//! A template is written as an ordered list of segments. Segments starting
//! with `:` are placeholders; everything else is passed through literally.
//! Placeholder order defines positional-argument order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ArityMismatch;

/// A single segment of a [`PathTemplate`].
///
/// Serialized in the table form: literals as-is, placeholders prefixed with `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PathSegment {
    /// Passed through unchanged.
    Literal(String),
    /// Replaced by the next positional argument.
    Placeholder(String),
}

impl PathSegment {
    /// Returns `true` if this segment is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl From<&str> for PathSegment {
    fn from(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Self::Placeholder(name.to_string()),
            None => Self::Literal(raw.to_string()),
        }
    }
}

impl From<String> for PathSegment {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<PathSegment> for String {
    fn from(segment: PathSegment) -> Self {
        segment.to_string()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Placeholder(name) => write!(f, ":{name}"),
        }
    }
}

/// Ordered path segments relative to the API root.
///
/// ## Examples
///
/// ```
/// use buildapi_define::PathTemplate;
///
/// let template = PathTemplate::from_segments(&[":branch_id", "rev", ":revision", "is_done"]);
///
/// assert_eq!(template.placeholder_count(), 2);
/// assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["branch_id", "revision"]);
/// assert_eq!(template.to_string(), ":branch_id/rev/:revision/is_done");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTemplate(Vec<PathSegment>);

impl PathTemplate {
    /// Creates a template from already-classified segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Creates a template from table-form segments (`:name` for placeholders).
    pub fn from_segments(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| PathSegment::from(*s)).collect())
    }

    /// The segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Number of placeholder segments.
    pub fn placeholder_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_placeholder()).count()
    }

    /// Placeholder names in positional order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|s| match s {
            PathSegment::Placeholder(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }

    /// Substitutes positional values into the template, one output segment
    /// per template segment.
    ///
    /// Values are inserted verbatim; escaping is left to the URL layer.
    ///
    /// ## Errors
    ///
    /// Returns [`ArityMismatch`] when the number of values differs from the
    /// number of placeholders.
    pub fn bind<'a, S: AsRef<str>>(&'a self, values: &'a [S]) -> Result<Vec<&'a str>, ArityMismatch> {
        let expected = self.placeholder_count();
        if values.len() != expected {
            return Err(ArityMismatch {
                expected,
                actual: values.len(),
            });
        }

        let mut values = values.iter();
        Ok(self
            .0
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => text.as_str(),
                // Counted above, so there is always a value left here.
                PathSegment::Placeholder(_) => values.next().map(|v| v.as_ref()).unwrap_or_default(),
            })
            .collect())
    }

    /// Substitutes positional values and joins the result with `/`.
    ///
    /// The result has no leading or trailing `/`.
    ///
    /// ## Errors
    ///
    /// Returns [`ArityMismatch`] when the number of values differs from the
    /// number of placeholders.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> Result<String, ArityMismatch> {
        Ok(self.bind(values)?.join("/"))
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_classification() {
        assert_eq!(
            PathSegment::from(":branch_id"),
            PathSegment::Placeholder("branch_id".to_string())
        );
        assert_eq!(
            PathSegment::from("builders"),
            PathSegment::Literal("builders".to_string())
        );
        assert!(PathSegment::from(":x").is_placeholder());
    }

    #[test]
    fn render_substitutes_in_order() {
        let template = PathTemplate::from_segments(&[":a", "build", ":b"]);
        assert_eq!(template.render(&["X", "Y"]).unwrap(), "X/build/Y");
    }

    #[test]
    fn render_literal_only() {
        let template = PathTemplate::from_segments(&["branches"]);
        let none: [&str; 0] = [];
        assert_eq!(template.render(&none).unwrap(), "branches");
    }

    #[test]
    fn render_values_are_opaque() {
        let template = PathTemplate::from_segments(&[":branch_id", "user", ":user"]);
        let rendered = template.render(&["try", "someone@example.com"]).unwrap();
        assert_eq!(rendered, "try/user/someone@example.com");
    }

    #[test]
    fn bind_keeps_one_output_per_segment() {
        let template = PathTemplate::from_segments(&[":branch_id", "user", ":user"]);
        let bound = template.bind(&["try", "a/b"]).unwrap();
        assert_eq!(bound, vec!["try", "user", "a/b"]);

        let err = template.bind(&["try"]).unwrap_err();
        assert_eq!(err, ArityMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn render_rejects_too_few_and_too_many() {
        let template = PathTemplate::from_segments(&[":a", "build", ":b"]);

        let err = template.render(&["X"]).unwrap_err();
        assert_eq!(err, ArityMismatch { expected: 2, actual: 1 });

        let err = template.render(&["X", "Y", "Z"]).unwrap_err();
        assert_eq!(err, ArityMismatch { expected: 2, actual: 3 });
    }

    #[test]
    fn serde_uses_table_form() {
        let template: PathTemplate = serde_json::from_str(r#"[":branch_id", "builders"]"#).unwrap();
        assert_eq!(template.placeholder_count(), 1);
        assert_eq!(
            serde_json::to_string(&template).unwrap(),
            r#"[":branch_id","builders"]"#
        );
    }

    #[test]
    fn display_joins_segments() {
        let template = PathTemplate::from_segments(&[":branch_id", "request", ":request_id"]);
        assert_eq!(template.to_string(), ":branch_id/request/:request_id");
    }
}
