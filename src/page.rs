//! Page templates with named regions.
//!
//! A template marks a region with `{{id}}` or `{{id:initial markup}}`. A
//! region exists on a page exactly when its placeholder appears in the
//! template; renderers write into regions by id, and anything they do not
//! touch keeps its initial markup.

use crate::errors::RenderError;
use crate::markup::{escape, Markup};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Region(String),
}

#[derive(Debug, Clone)]
struct Region {
    initial: String,
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Page {
    segments: Vec<Segment>,
    regions: BTreeMap<String, Region>,
}

impl Page {
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut regions = BTreeMap::new();
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            let Some(len) = rest[start + 2..].find("}}") else {
                break;
            };
            let inner = &rest[start + 2..start + 2 + len];
            let (id, initial) = inner.split_once(':').unwrap_or((inner, ""));
            let id = id.trim();

            if id.is_empty() || !id.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_') {
                segments.push(Segment::Literal(rest[..start + 4 + len].to_string()));
            } else {
                segments.push(Segment::Literal(rest[..start].to_string()));
                segments.push(Segment::Region(id.to_string()));
                regions.entry(id.to_string()).or_insert_with(|| Region {
                    initial: initial.to_string(),
                    content: None,
                });
            }
            rest = &rest[start + 4 + len..];
        }
        segments.push(Segment::Literal(rest.to_string()));

        Self { segments, regions }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> Result<(), RenderError> {
        self.write(id, escape(text))
    }

    pub fn set_markup(&mut self, id: &str, markup: Markup) -> Result<(), RenderError> {
        self.write(id, markup.into_string())
    }

    /// Current contents of a region, written or initial.
    pub fn region(&self, id: &str) -> Option<&str> {
        self.regions
            .get(id)
            .map(|region| region.content.as_deref().unwrap_or(&region.initial))
    }

    pub fn finish(self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Region(id) => {
                    if let Some(content) = self.region(id) {
                        out.push_str(content);
                    }
                }
            }
        }
        out
    }

    fn write(&mut self, id: &str, content: String) -> Result<(), RenderError> {
        let region = self
            .regions
            .get_mut(id)
            .ok_or_else(|| RenderError::MissingElement(id.to_string()))?;
        region.content = Some(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_are_discovered_with_their_initial_markup() {
        let page = Page::parse("<p id=\"a\">{{a:Loading…}}</p><p>{{b}}</p>");
        assert!(page.contains("a"));
        assert!(page.contains("b"));
        assert!(!page.contains("c"));
        assert_eq!(page.region("a"), Some("Loading…"));
        assert_eq!(page.finish(), "<p id=\"a\">Loading…</p><p></p>");
    }

    #[test]
    fn written_text_is_escaped_on_output() {
        let mut page = Page::parse("<span>{{name}}</span>");
        page.set_text("name", "<b>bold</b>").unwrap();
        assert_eq!(page.finish(), "<span>&lt;b&gt;bold&lt;/b&gt;</span>");
    }

    #[test]
    fn writing_a_missing_region_fails() {
        let mut page = Page::parse("<span>{{name}}</span>");
        let err = page.set_text("other", "x").unwrap_err();
        assert!(matches!(err, RenderError::MissingElement(id) if id == "other"));
    }

    #[test]
    fn braces_that_are_not_region_ids_stay_literal() {
        let page = Page::parse("a {{ not an id }} b {{x}}");
        assert!(!page.contains("not an id"));
        assert_eq!(page.finish(), "a {{ not an id }} b ");
    }
}
