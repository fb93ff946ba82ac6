//! A small HTML builder that escapes every piece of data it is given.

use url::Url;

/// An HTML fragment whose text and attribute values went through [`escape`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(value: &str) -> Self {
        Self(escape(value))
    }

    pub fn element(tag: &'static str) -> Element {
        Element {
            tag,
            attrs: Vec::new(),
            children: Markup::new(),
        }
    }

    pub fn push(&mut self, fragment: Markup) {
        self.0.push_str(&fragment.0);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::new();
        for fragment in iter {
            out.push(fragment);
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Markup,
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, escape(value)));
        self
    }

    pub fn class(self, value: &str) -> Self {
        self.attr("class", value)
    }

    pub fn text(mut self, value: &str) -> Self {
        self.children.push(Markup::text(value));
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Renders a void element such as `<img>`; children are ignored.
    pub fn void(self) -> Markup {
        let mut out = String::new();
        self.open_tag(&mut out);
        Markup(out)
    }

    pub fn build(self) -> Markup {
        let mut out = String::new();
        self.open_tag(&mut out);
        out.push_str(self.children.as_str());
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        Markup(out)
    }

    fn open_tag(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        element.build()
    }
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Keeps `http(s)` URLs and relative references; anything else becomes `#`.
pub fn safe_href(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "#";
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => trimmed,
        Ok(_) => "#",
        Err(url::ParseError::RelativeUrlWithoutBase) => trimmed,
        Err(_) => "#",
    }
}
