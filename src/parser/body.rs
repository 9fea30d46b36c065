//! Code block body extraction.

use super::span::{Span, Spanned};

/// Result of extracting a code block body.
#[derive(Debug)]
pub struct BodyResult {
    /// The content inside the code block (without fence markers)
    pub content: Spanned<String>,
    /// Byte offset where content after the code block begins
    pub content_end: usize,
}

/// Extract the body content from a ```px code block.
///
/// Searches for the first ```px fence and extracts the content until the
/// closing ```. Returns `None` when there is no complete fence.
pub fn extract_body(source: &str, base_offset: usize) -> Option<BodyResult> {
    let fence_start = find_code_fence_start(source)?;
    let after_fence = &source[fence_start..];

    let fence_line_end = after_fence.find('\n')?;
    let content_start = fence_start + fence_line_end + 1;

    let content_section = &source[content_start..];
    let closing_offset = find_closing_fence(content_section)?;

    let body_content = &content_section[..closing_offset];
    let body_trimmed = body_content.strip_suffix('\n').unwrap_or(body_content);

    let span = Span::from_local_offsets(
        source,
        content_start,
        content_start + body_trimmed.len(),
        base_offset,
    );

    // After the closing ``` and its newline
    let after_closing = &content_section[closing_offset..];
    let fence_end = after_closing.find('\n').map(|i| i + 1).unwrap_or(after_closing.len());
    let content_end = content_start + closing_offset + fence_end;

    Some(BodyResult {
        content: Spanned::new(body_trimmed.to_string(), span),
        content_end,
    })
}

/// Split a body into its grid rows, each with its line number.
///
/// Leading and trailing blank lines are dropped; blank lines in the middle
/// are kept so that the row count stays honest.
pub fn body_rows(body: &Spanned<String>) -> Vec<(u32, &str)> {
    let mut rows = Vec::new();

    for (i, line) in body.value.lines().enumerate() {
        let line = line.trim_end();
        if !line.trim().is_empty() || !rows.is_empty() {
            rows.push((body.line() + i as u32, line));
        }
    }

    while rows.last().is_some_and(|(_, row)| row.is_empty()) {
        rows.pop();
    }

    rows
}

/// Find the start of a ```px code fence.
fn find_code_fence_start(source: &str) -> Option<usize> {
    let mut offset = 0;
    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```px") || trimmed.starts_with("``` px") {
            let leading = line.len() - trimmed.len();
            return Some(offset + leading);
        }
        offset += line.len() + 1;
    }
    None
}

/// Find the closing ``` fence.
fn find_closing_fence(source: &str) -> Option<usize> {
    let mut offset = 0;
    for line in source.lines() {
        if line.trim() == "```" {
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
    fn test_extract_simple_body() {
        let source = "```px\n.OO.\nOssO\n```\n";

        let result = extract_body(source, 0).unwrap();

        assert_eq!(result.content.value, ".OO.\nOssO");
        assert_eq!(result.content_end, source.len());
    }

    #[test]
    fn test_extract_body_with_prefix() {
        let source = "some text\n```px\nbody\n```\nafter";

        let result = extract_body(source, 0).unwrap();

        assert_eq!(result.content.value, "body");
        assert_eq!(&source[result.content_end..], "after");
    }

    #[test]
    fn test_extract_body_no_fence() {
        assert!(extract_body("no code fence here", 0).is_none());
        assert!(extract_body("```rust\nfn main() {}\n```", 0).is_none());
    }

    #[test]
    fn test_extract_body_unclosed() {
        assert!(extract_body("```px\nhello\nworld", 0).is_none());
    }

    #[test]
    fn test_extract_body_span_location() {
        let source = "```px\nAB\nCD\n```";

        let result = extract_body(source, 0).unwrap();

        assert_eq!(result.content.span.start.line, 2);
        assert_eq!(result.content.span.start.column, 1);
    }

    #[test]
    fn test_body_rows_lines() {
        let source = "```px\n\nAB\nCD\n\n```";

        let result = extract_body(source, 100).unwrap();
        let rows = body_rows(&result.content);

        assert_eq!(rows, vec![(3, "AB"), (4, "CD")]);
    }

    #[test]
    fn test_body_rows_keeps_inner_blank_line() {
        let source = "```px\nAB\n\nCD\n```";

        let result = extract_body(source, 0).unwrap();
        let rows: Vec<&str> = body_rows(&result.content).into_iter().map(|(_, r)| r).collect();

        assert_eq!(rows, vec!["AB", "", "CD"]);
    }
}
