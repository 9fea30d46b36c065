//! Common types for parsed documents.

use std::collections::HashMap;

use super::span::{Span, Spanned};

/// A raw parsed document before sprite-specific processing.
///
/// Every descriptor document has the same outline:
/// - YAML frontmatter with metadata
/// - Optional body content (inside ```px blocks)
/// - Optional legend section (glyph mappings)
///
/// All spans carry absolute file lines.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// The document name (required, from frontmatter)
    pub name: Spanned<String>,

    /// All frontmatter key-value pairs
    pub frontmatter: HashMap<String, Spanned<serde_yaml::Value>>,

    /// Body content (inside ```px block), if present
    pub body: Option<Spanned<String>>,

    /// Legend mappings (glyph -> value), if present
    pub legend: Option<HashMap<char, Spanned<LegendValue>>>,

    /// Span covering the entire document
    pub span: Span,
}

/// A legend entry value, before it is checked against a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendValue {
    /// Palette role: `O: $outline`
    Role(String),

    /// Literal colour, still unparsed: `s: #F2C8A0`
    Hex(String),
}

impl RawDocument {
    /// Get a frontmatter value by key.
    pub fn get_frontmatter(&self, key: &str) -> Option<&Spanned<serde_yaml::Value>> {
        self.frontmatter.get(key)
    }

    /// Get a frontmatter string value by key.
    pub fn get_frontmatter_str(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key).and_then(|v| v.value.as_str())
    }

    /// Line on which the document starts.
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    /// Move every span down by `lines` lines.
    pub(crate) fn shift_lines(&mut self, lines: u32) {
        self.name.span = self.name.span.shift_lines(lines);
        self.span = self.span.shift_lines(lines);
        for value in self.frontmatter.values_mut() {
            value.span = value.span.shift_lines(lines);
        }
        if let Some(body) = &mut self.body {
            body.span = body.span.shift_lines(lines);
        }
        if let Some(legend) = &mut self.legend {
            for value in legend.values_mut() {
                value.span = value.span.shift_lines(lines);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::span::Location;

    fn span_at(line: u32) -> Span {
        Span::new(Location::new(0, line, 1), Location::new(0, line, 1))
    }

    #[test]
    fn test_shift_lines_moves_every_span() {
        let mut frontmatter = HashMap::new();
        frontmatter.insert(
            "size".to_string(),
            Spanned::new(serde_yaml::Value::String("8x8".to_string()), span_at(3)),
        );
        let legend = [('B', Spanned::new(LegendValue::Role("base".into()), span_at(9)))]
            .into_iter()
            .collect();

        let mut doc = RawDocument {
            name: Spanned::new("heart".to_string(), span_at(2)),
            frontmatter,
            body: Some(Spanned::new("BB".to_string(), span_at(6))),
            legend: Some(legend),
            span: span_at(1),
        };

        doc.shift_lines(100);

        assert_eq!(doc.line(), 101);
        assert_eq!(doc.name.line(), 102);
        assert_eq!(doc.get_frontmatter("size").unwrap().line(), 103);
        assert_eq!(doc.get_frontmatter_str("size"), Some("8x8"));
        assert_eq!(doc.body.as_ref().unwrap().line(), 106);
        assert_eq!(doc.legend.as_ref().unwrap()[&'B'].line(), 109);
    }
}
