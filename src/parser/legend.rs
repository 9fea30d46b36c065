//! Legend section parsing.

use std::collections::HashMap;

use crate::error::{Result, SpriteError};

use super::span::{Span, Spanned};
use super::types::LegendValue;

/// Result of extracting a legend section.
#[derive(Debug)]
pub struct LegendResult {
    /// Parsed legend mappings
    pub entries: HashMap<char, Spanned<LegendValue>>,
}

/// Extract legend section from after a code block.
///
/// Legend starts with `---` and contains `glyph: value` lines.
/// It ends at EOF or the next `---` that starts a new definition (has `name:`).
pub fn extract_legend(source: &str, base_offset: usize) -> Result<Option<LegendResult>> {
    let trimmed = skip_html_comments(source.trim_start());
    let leading_whitespace = source.len() - trimmed.len();

    let Some(after_delimiter) = trimmed.strip_prefix("---") else {
        return Ok(None);
    };

    let first_newline = after_delimiter.find('\n').unwrap_or(after_delimiter.len());
    let legend_start = 3 + first_newline + 1;

    if legend_start > trimmed.len() {
        return Ok(None);
    }

    let legend_section = &trimmed[legend_start..];
    let legend_end = find_legend_end(legend_section);
    let legend_content = &legend_section[..legend_end];

    if legend_content.trim().is_empty() {
        return Ok(None);
    }

    let mut entries = HashMap::new();
    let mut line_offset = legend_start;

    for line in legend_content.lines() {
        let line_trimmed = line.trim();

        if !line_trimmed.is_empty() {
            let value_span = Span::from_local_offsets(
                source,
                leading_whitespace + line_offset,
                leading_whitespace + line_offset + line.len(),
                base_offset,
            );

            let (glyph, value) = parse_legend_line(line_trimmed)?;

            if entries
                .insert(glyph, Spanned::new(value, value_span))
                .is_some()
            {
                return Err(SpriteError::Parse {
                    message: format!("Legend glyph '{}' is defined twice", glyph),
                    help: None,
                });
            }
        }

        line_offset += line.len() + 1;
    }

    Ok(Some(LegendResult { entries }))
}

/// Skip leading HTML comment lines and whitespace.
///
/// Markdown files may contain HTML comments between the code block
/// and the legend `---` delimiter.
fn skip_html_comments(s: &str) -> &str {
    let mut remaining = s;
    loop {
        let trimmed = remaining.trim_start();
        if trimmed.starts_with("<!--") {
            if let Some(end) = trimmed.find("-->") {
                remaining = &trimmed[end + 3..];
                continue;
            }
        }
        return trimmed;
    }
}

/// Find where the legend section ends.
///
/// Legend ends at a `---` line followed by a `name:` line, or at the end
/// of the string.
fn find_legend_end(s: &str) -> usize {
    let lines: Vec<&str> = s.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "---"
            && lines
                .get(i + 1)
                .is_some_and(|next| next.trim().starts_with("name:"))
        {
            return lines[..i].iter().map(|l| l.len() + 1).sum();
        }
    }

    s.len()
}

/// Parse a single legend line into (glyph, value).
///
/// Glyphs may be quoted to allow `:` or `#`: `":": $rim`.
fn parse_legend_line(line: &str) -> Result<(char, LegendValue)> {
    let (glyph_str, rest) = match line.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &line[1..];
            let end_quote = inner.find(quote).ok_or_else(|| SpriteError::Parse {
                message: format!("Unclosed quote in legend: {}", line),
                help: None,
            })?;
            let rest = inner[end_quote + 1..].trim_start();
            let rest = rest.strip_prefix(':').ok_or_else(|| SpriteError::Parse {
                message: format!("Legend line must contain ':': {}", line),
                help: None,
            })?;
            (&inner[..end_quote], rest)
        }
        _ => line.split_once(':').ok_or_else(|| SpriteError::Parse {
            message: format!("Legend line must contain ':': {}", line),
            help: Some("Use glyph: $role or glyph: #RRGGBB".to_string()),
        })?,
    };

    let glyph_str = glyph_str.trim();
    let mut chars = glyph_str.chars();
    let glyph = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(SpriteError::Parse {
                message: format!("Legend glyph must be a single character: '{}'", glyph_str),
                help: Some("Use quotes for special characters: \":\": $rim".to_string()),
            })
        }
    };

    if glyph == crate::types::TRANSPARENT_GLYPH {
        return Err(SpriteError::Parse {
            message: "'.' always means transparent and cannot be mapped".to_string(),
            help: None,
        });
    }

    Ok((glyph, parse_legend_value(rest)?))
}

/// Parse a legend value: `$role` or a hex colour.
fn parse_legend_value(s: &str) -> Result<LegendValue> {
    let trimmed = s.trim();

    if let Some(role) = trimmed.strip_prefix('$') {
        if role.is_empty() {
            return Err(SpriteError::Parse {
                message: "Empty palette role in legend".to_string(),
                help: None,
            });
        }
        Ok(LegendValue::Role(role.to_string()))
    } else if trimmed.starts_with('#') {
        Ok(LegendValue::Hex(trimmed.to_string()))
    } else {
        Err(SpriteError::Parse {
            message: format!("Unknown legend value '{}'", trimmed),
            help: Some("Use a palette role ($outline) or a hex colour (#181425)".to_string()),
        })
    }
}
