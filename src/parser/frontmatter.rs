//! YAML frontmatter extraction.

use std::collections::HashMap;

use crate::error::{Result, SpriteError};

use super::span::{Span, Spanned};

/// Result of extracting frontmatter from a document section.
#[derive(Debug)]
pub struct FrontmatterResult {
    /// Parsed top-level keys, each spanning its own `key:` line
    pub values: HashMap<String, Spanned<serde_yaml::Value>>,
    /// Span of the frontmatter section (including --- markers)
    pub span: Span,
    /// Byte offset where content after frontmatter begins
    pub content_start: usize,
}

/// Extract YAML frontmatter from the beginning of a document.
///
/// Expects the document to start with `---`, contain YAML, and end with `---`.
/// Returns the parsed values and the position where remaining content begins.
pub fn extract_frontmatter(source: &str, base_offset: usize) -> Result<FrontmatterResult> {
    let trimmed = source.trim_start();
    let leading_whitespace = source.len() - trimmed.len();

    let Some(after_first) = trimmed.strip_prefix("---") else {
        return Err(SpriteError::Parse {
            message: "Document must start with ---".to_string(),
            help: Some("Add YAML frontmatter: ---\\nname: idle_down\\n---".to_string()),
        });
    };

    let first_newline = after_first.find('\n').unwrap_or(after_first.len());
    let yaml_start = (3 + first_newline + 1).min(trimmed.len());

    let yaml_section = &trimmed[yaml_start..];
    let Some(closing) = find_closing_delimiter(yaml_section) else {
        return Err(SpriteError::Parse {
            message: "Unclosed frontmatter: missing closing ---".to_string(),
            help: Some("Add --- after the YAML content".to_string()),
        });
    };
    let yaml_content = &yaml_section[..closing];
    let closing_offset = yaml_start + closing;

    let parsed: serde_yaml::Value =
        serde_yaml::from_str(yaml_content).map_err(|e| SpriteError::Parse {
            message: format!("Invalid YAML in frontmatter: {}", e),
            help: Some("Quote hex colours: outline: \"#181425\"".to_string()),
        })?;

    let mapping = match parsed {
        serde_yaml::Value::Mapping(map) => map,
        serde_yaml::Value::Null => serde_yaml::Mapping::new(),
        _ => {
            return Err(SpriteError::Parse {
                message: "Frontmatter must be a YAML mapping".to_string(),
                help: Some("Use key: value format".to_string()),
            });
        }
    };

    let yaml_base = leading_whitespace + yaml_start;
    let mut values = HashMap::new();
    for (key, value) in mapping {
        let Some(key) = key.as_str() else { continue };
        let span = match key_line(yaml_content, key) {
            Some((start, end)) => {
                Span::from_local_offsets(source, yaml_base + start, yaml_base + end, base_offset)
            }
            None => Span::from_local_offsets(
                source,
                yaml_base,
                leading_whitespace + closing_offset,
                base_offset,
            ),
        };
        values.insert(key.to_string(), Spanned::new(value, span));
    }

    // Content starts after the closing --- and its newline
    let after_closing = &trimmed[closing_offset + 3..];
    let newline_after = after_closing.find('\n').map(|i| i + 1).unwrap_or(0);
    let content_start = leading_whitespace + closing_offset + 3 + newline_after;

    let span = Span::from_local_offsets(
        source,
        leading_whitespace,
        leading_whitespace + closing_offset + 3,
        base_offset,
    );

    Ok(FrontmatterResult {
        values,
        span,
        content_start,
    })
}

/// Find the unindented `key:` line in a YAML block.
///
/// Returns the byte range of that line.
fn key_line(yaml: &str, key: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in yaml.lines() {
        if line
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with(':'))
        {
            return Some((offset, offset + line.len()));
        }
        offset += line.len() + 1;
    }
    None
}

/// Find the closing --- delimiter in a string.
///
/// The delimiter must be at the start of a line.
fn find_closing_delimiter(s: &str) -> Option<usize> {
    let mut offset = 0;
    for line in s.lines() {
        if line.trim() == "---" {
            return Some(offset);
        }
        offset += line.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_frontmatter() {
        let source = "---\nname: test\nsize: 16x24\n---\nbody content";

        let result = extract_frontmatter(source, 0).unwrap();

        assert_eq!(
            result.values.get("name").unwrap().value.as_str(),
            Some("test")
        );
        assert_eq!(
            result.values.get("size").unwrap().value.as_str(),
            Some("16x24")
        );
        assert_eq!(result.content_start, 31); // After closing "---\n"
    }

    #[test]
    fn test_values_span_their_own_line() {
        let source = "---\nname: test\nsize: 8x8\npalette:\n  base: \"#E02020\"\n---\n";

        let result = extract_frontmatter(source, 0).unwrap();

        assert_eq!(result.values["name"].span.start.line, 2);
        assert_eq!(result.values["size"].span.start.line, 3);
        assert_eq!(result.values["palette"].span.start.line, 4);
        assert!(result.values["palette"].value.is_mapping());
    }

    #[test]
    fn test_extract_frontmatter_no_opening() {
        let source = "name: test\n---\nbody";

        assert!(extract_frontmatter(source, 0).is_err());
    }

    #[test]
    fn test_extract_frontmatter_unclosed() {
        let source = "---\nname: test\nbody content";

        assert!(extract_frontmatter(source, 0).is_err());
    }

    #[test]
    fn test_unquoted_hex_is_a_yaml_comment() {
        // `#` starts a YAML comment, so the role ends up null.
        let source = "---\nname: t\npalette:\n  base: #E02020\n---\n";

        let result = extract_frontmatter(source, 0).unwrap();
        let palette = result.values["palette"].value.as_mapping().unwrap();

        assert!(palette.get("base").unwrap().is_null());
    }

    #[test]
    fn test_extract_empty_frontmatter() {
        let source = "---\n---\nbody";

        let result = extract_frontmatter(source, 0).unwrap();
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_extract_frontmatter_with_base_offset() {
        let source = "---\nname: test\n---\n";

        let result = extract_frontmatter(source, 100).unwrap();

        assert!(result.span.start.offset >= 100);
        assert!(result.values["name"].span.start.offset >= 104);
    }
}
