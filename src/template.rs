//! Request path templates.
//!
//! Templates use `{name}` placeholders, e.g.
//! `/v1.0/{project_id}/instances/{instance_id}/backups`.

use std::collections::BTreeMap;

use crate::error::{OtcError, Result};

/// A request path with named placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate(&'static str);

enum Segment {
    Literal(&'static str),
    Placeholder(&'static str),
}

impl PathTemplate {
    /// Wrap a template string. Well-formedness is checked by [`Self::validate`].
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// The raw template text.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Check that every brace is part of a non-empty `{name}` placeholder.
    pub fn validate(&self) -> Result<()> {
        self.segments().map(|_| ())
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> Result<Vec<&'static str>> {
        Ok(self
            .segments()?
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect())
    }

    /// Substitute every placeholder with its percent-encoded value.
    ///
    /// Values not referenced by the template are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OtcError::MissingPathParam`] when a placeholder has no value
    /// and [`OtcError::InvalidTemplate`] when the template is malformed.
    pub fn render(&self, params: &BTreeMap<String, String>) -> Result<String> {
        let mut path = String::with_capacity(self.0.len() + 32);
        for segment in self.segments()? {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder(name) => {
                    let value = params.get(name).ok_or_else(|| OtcError::MissingPathParam {
                        template: self.0,
                        name: name.to_string(),
                    })?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
        Ok(path)
    }

    fn segments(&self) -> Result<Vec<Segment>> {
        let template = self.0;
        let invalid = |reason| OtcError::InvalidTemplate { template, reason };

        let mut segments = Vec::new();
        let mut rest = template;
        while let Some(open) = rest.find(['{', '}']) {
            if rest.as_bytes()[open] == b'}' {
                return Err(invalid("unmatched '}'"));
            }
            if open > 0 {
                segments.push(Segment::Literal(&rest[..open]));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| invalid("unclosed '{'"))?;
            let name = &after[..close];
            if name.is_empty() {
                return Err(invalid("empty placeholder"));
            }
            if name.contains('{') {
                return Err(invalid("nested '{'"));
            }
            segments.push(Segment::Placeholder(name));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        Ok(segments)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = PathTemplate::new("/v1.0/{project_id}/instances/{instance_id}/backups");
        let path = template
            .render(&params(&[("project_id", "p1"), ("instance_id", "i-9")]))
            .unwrap();
        assert_eq!(path, "/v1.0/p1/instances/i-9/backups");
    }

    #[test]
    fn test_render_ignores_extra_values() {
        let template = PathTemplate::new("/v1.0/{project_id}/queues");
        let path = template
            .render(&params(&[("project_id", "p1"), ("queue_id", "q")]))
            .unwrap();
        assert_eq!(path, "/v1.0/p1/queues");
    }

    #[test]
    fn test_render_missing_value_fails() {
        let template = PathTemplate::new("/v1.0/{project_id}/queues/{queue_id}/groups");
        let err = template.render(&params(&[("project_id", "p1")])).unwrap_err();
        match err {
            OtcError::MissingPathParam { name, .. } => assert_eq!(name, "queue_id"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_encodes_values() {
        let template = PathTemplate::new("/v2/{project_id}/fgs/triggers/{function_urn}");
        let path = template
            .render(&params(&[
                ("project_id", "p1"),
                ("function_urn", "urn:fss:eu-de:p1:function:default/hello"),
            ]))
            .unwrap();
        assert_eq!(
            path,
            "/v2/p1/fgs/triggers/urn%3Afss%3Aeu-de%3Ap1%3Afunction%3Adefault%2Fhello"
        );
    }

    #[test]
    fn test_placeholders_in_order() {
        let template = PathTemplate::new("/a/{x}/b/{y}");
        assert_eq!(template.placeholders().unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_malformed_templates_rejected() {
        for raw in ["/a/{x", "/a/x}", "/a/{}", "/a/{x{y}}"] {
            let template = PathTemplate::new(raw);
            assert!(
                matches!(template.validate(), Err(OtcError::InvalidTemplate { .. })),
                "{raw} should be rejected"
            );
        }
    }
}
