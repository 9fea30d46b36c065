//! Document splitting and parsing.
//!
//! Files can contain multiple definitions, each starting with `---` followed
//! by YAML frontmatter containing at least `name:`.

use crate::error::{Result, SpriteError};

use super::body::extract_body;
use super::frontmatter::extract_frontmatter;
use super::legend::extract_legend;
use super::span::{Span, Spanned};
use super::types::RawDocument;

/// Parse a file containing one or more document definitions.
///
/// Each definition starts with `---` and YAML frontmatter containing `name:`.
/// Spans in the result carry absolute file lines.
pub fn parse_documents(source: &str) -> Result<Vec<RawDocument>> {
    let mut documents = Vec::new();

    for section in split_documents(source) {
        let mut doc = parse_single_document(section.text, section.offset).map_err(|e| {
            at_line(e, section.first_line)
        })?;
        doc.shift_lines(section.first_line - 1);
        documents.push(doc);
    }

    if documents.is_empty() {
        return Err(SpriteError::Parse {
            message: "No documents found in file".to_string(),
            help: Some("Add a document with ---\\nname: my-name\\n---".to_string()),
        });
    }

    Ok(documents)
}

/// One document's slice of the file.
struct Section<'a> {
    text: &'a str,
    offset: usize,
    first_line: u32,
}

/// Split source into document sections.
fn split_documents(source: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current_start = 0;
    let mut current_line = 1;
    let mut in_code_block = false;

    let lines: Vec<&str> = source.lines().collect();
    let mut offset = 0;

    for (i, line) in lines.iter().enumerate() {
        // Never split inside a code block
        if line.trim().starts_with("```") {
            in_code_block = !in_code_block;
        }

        let starts_document = !in_code_block
            && i > 0
            && line.trim() == "---"
            && lines
                .get(i + 1)
                .is_some_and(|next| next.trim().starts_with("name:"));

        if starts_document {
            let text = &source[current_start..offset];
            if !text.trim().is_empty() {
                sections.push(Section {
                    text,
                    offset: current_start,
                    first_line: current_line,
                });
            }
            current_start = offset;
            current_line = i as u32 + 1;
        }

        offset += line.len() + 1;
    }

    let text = &source[current_start.min(source.len())..];
    if !text.trim().is_empty() {
        sections.push(Section {
            text,
            offset: current_start,
            first_line: current_line,
        });
    }

    sections
}

/// Prefix a section error with the line the section starts on.
fn at_line(err: SpriteError, line: u32) -> SpriteError {
    match err {
        SpriteError::Parse { message, help } => SpriteError::Parse {
            message: format!("document at line {}: {}", line, message),
            help,
        },
        other => other,
    }
}

/// Parse a single document section.
fn parse_single_document(source: &str, base_offset: usize) -> Result<RawDocument> {
    let frontmatter = extract_frontmatter(source, base_offset)?;

    let name = frontmatter
        .values
        .get("name")
        .and_then(|v| v.value.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| SpriteError::Parse {
            message: "Document missing required 'name' field".to_string(),
            help: Some("Add name: my-name to frontmatter".to_string()),
        })?;

    let name_span = frontmatter
        .values
        .get("name")
        .map(|v| v.span)
        .unwrap_or(frontmatter.span);

    let remaining = &source[frontmatter.content_start..];
    let remaining_offset = base_offset + frontmatter.content_start;

    let (body, legend_source_start) = match extract_body(remaining, remaining_offset) {
        Some(body_result) => (
            Some(body_result.content),
            frontmatter.content_start + body_result.content_end,
        ),
        None => (None, frontmatter.content_start),
    };

    // Body spans were measured within `remaining`; bring their lines in
    // line with the rest of the section.
    let body = body.map(|b| {
        let lines_before = source[..frontmatter.content_start].matches('\n').count() as u32;
        Spanned::new(b.value, b.span.shift_lines(lines_before))
    });

    let legend_source = &source[legend_source_start..];
    let legend_offset = base_offset + legend_source_start;
    let lines_before_legend = source[..legend_source_start].matches('\n').count() as u32;

    let legend = extract_legend(legend_source, legend_offset)
        .map_err(|e| match e {
            SpriteError::Parse { message, help } => SpriteError::Parse {
                message: format!("{}: {}", name, message),
                help,
            },
            other => other,
        })?
        .map(|legend| {
            legend
                .entries
                .into_iter()
                .map(|(glyph, v)| {
                    let span = v.span.shift_lines(lines_before_legend);
                    (glyph, Spanned::new(v.value, span))
                })
                .collect()
        });

    let doc_span = Span::from_local_offsets(source, 0, source.len(), base_offset);

    Ok(RawDocument {
        name: Spanned::new(name, name_span),
        frontmatter: frontmatter.values,
        body,
        legend,
        span: doc_span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::LegendValue;

    #[test]
    fn test_parse_single_document() {
        let source = r#"---
name: heart
size: 2x2
---

```px
B.
.B
```

---
B: $base
"#;

        let docs = parse_documents(source).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name.value, "heart");
        assert_eq!(docs[0].body.as_ref().unwrap().value, "B.\n.B");
        assert_eq!(
            docs[0].legend.as_ref().unwrap()[&'B'].value,
            LegendValue::Role("base".to_string())
        );
    }

    #[test]
    fn test_parse_multiple_documents() {
        let source = r#"---
name: sprite-a
---

```px
AB
```

---
A: $one

---
name: sprite-b
---

```px
XY
```

---
X: #FFFFFF
"#;

        let docs = parse_documents(source).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name.value, "sprite-a");
        assert_eq!(docs[1].name.value, "sprite-b");

        assert!(docs[0].legend.as_ref().unwrap().contains_key(&'A'));
        assert!(docs[1].legend.as_ref().unwrap().contains_key(&'X'));
    }

    #[test]
    fn test_parse_frontmatter_only_documents() {
        let source = "---\nname: idle_left\n---\n\n---\nname: idle_right\nmirror: idle_left\n---\n";

        let docs = parse_documents(source).unwrap();

        assert_eq!(docs.len(), 2);
        assert!(docs[1].body.is_none());
        assert!(docs[1].legend.is_none());
        assert_eq!(docs[1].get_frontmatter_str("mirror"), Some("idle_left"));
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_documents("").is_err());
    }

    #[test]
    fn test_parse_missing_name() {
        let source = "---\nsize: 8x8\n---\n\n```px\n..\n```\n";

        let err = parse_documents(source).unwrap_err();

        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_absolute_lines() {
        let source = r#"---
name: first
---

```px
A
```

---
A: $a

---
name: second
size: 1x1
---

```px
B
```

---
B: $b
"#;

        let docs = parse_documents(source).unwrap();
        let second = &docs[1];

        assert_eq!(docs[0].line(), 1);
        assert_eq!(docs[0].legend.as_ref().unwrap()[&'A'].line(), 10);
        assert_eq!(second.line(), 12);
        assert_eq!(second.name.line(), 13);
        assert_eq!(second.get_frontmatter("size").unwrap().line(), 14);
        assert_eq!(second.body.as_ref().unwrap().line(), 18);
        assert_eq!(second.legend.as_ref().unwrap()[&'B'].line(), 22);
    }

    #[test]
    fn test_legend_error_names_document() {
        let source = "---\nname: broken\n---\n\n```px\nA\n```\n\n---\nA: nope\n";

        let err = parse_documents(source).unwrap_err().to_string();

        assert!(err.contains("broken"));
        assert!(err.contains("line 1"));
    }
}
