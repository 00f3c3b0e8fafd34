//! YAML front matter splitting and parsing.
//!
//! A document starts with front matter when its first line is a `---`
//! delimiter; the block runs until the next `---` line. The block is parsed
//! with `serde_yaml` into JSON-compatible values, so quoted strings, block
//! scalars and nested structures all behave as expected.
//!
//! A document without a leading delimiter has no front matter: the metadata
//! is empty and the body is the full text.

use std::collections::BTreeMap;

use serde_json::Value;

/// Front matter delimiter line.
const DELIMITER: &str = "---";

/// Result of splitting a source file into metadata and body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontMatter {
    /// Parsed front-matter mapping. Empty when the file has no front matter.
    pub metadata: BTreeMap<String, Value>,
    /// Markdown source with the front-matter block stripped.
    pub body: String,
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The opening delimiter has no matching closing delimiter.
    #[error("unterminated front matter block")]
    Unterminated,

    /// The block is not valid YAML.
    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The block parsed to something other than a mapping.
    #[error("front matter must be a YAML mapping")]
    NotAMapping,
}

/// Split raw file content into front matter and body.
///
/// # Errors
///
/// Returns an error if a front-matter block is opened but never closed, or
/// if its content is not a YAML mapping.
pub fn split(content: &str) -> Result<FrontMatter, FrontMatterError> {
    let Some(rest) = strip_open_delimiter(content) else {
        return Ok(FrontMatter {
            metadata: BTreeMap::new(),
            body: content.to_owned(),
        });
    };

    let (block, body) = split_at_close_delimiter(rest)?;

    Ok(FrontMatter {
        metadata: parse_block(block)?,
        body: body.to_owned(),
    })
}

/// Strip the opening `---` line, returning the remainder.
///
/// Returns `None` if the content does not start with a delimiter line.
fn strip_open_delimiter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(DELIMITER)?;
    match rest.strip_prefix('\n') {
        Some(rest) => Some(rest),
        None => rest.strip_prefix("\r\n"),
    }
}

/// Find the closing delimiter line, returning `(block, body)`.
fn split_at_close_delimiter(rest: &str) -> Result<(&str, &str), FrontMatterError> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((block, body));
        }
        offset += line.len();
    }
    // Closing delimiter as the very last line without a trailing newline is
    // handled by split_inclusive above; anything else is unterminated.
    Err(FrontMatterError::Unterminated)
}

/// Parse a front-matter block into a string-keyed mapping.
fn parse_block(block: &str) -> Result<BTreeMap<String, Value>, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let value: Value = serde_yaml::from_str(block)?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(BTreeMap::new()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_split_no_front_matter() {
        let fm = split("# Just markdown\n").unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "# Just markdown\n");
    }

    #[test]
    fn test_split_basic_front_matter() {
        let content = "---\ntitle: Hello\n---\n# Body\n";
        let fm = split(content).unwrap();
        assert_eq!(fm.metadata.get("title"), Some(&json!("Hello")));
        assert_eq!(fm.body, "# Body\n");
    }

    #[test]
    fn test_split_empty_block() {
        let fm = split("---\n---\nbody").unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_split_list_values() {
        let content = "---\nimplements:\n  - a\n  - b\n---\n";
        let fm = split(content).unwrap();
        assert_eq!(fm.metadata.get("implements"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_split_scalar_value() {
        let content = "---\nimplements: queue\n---\n";
        let fm = split(content).unwrap();
        assert_eq!(fm.metadata.get("implements"), Some(&json!("queue")));
    }

    #[test]
    fn test_split_closing_delimiter_at_eof() {
        let fm = split("---\ntitle: X\n---").unwrap();
        assert_eq!(fm.metadata.get("title"), Some(&json!("X")));
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_split_crlf_line_endings() {
        let content = "---\r\ntitle: X\r\n---\r\nbody\r\n";
        let fm = split(content).unwrap();
        assert_eq!(fm.metadata.get("title"), Some(&json!("X")));
        assert_eq!(fm.body, "body\r\n");
    }

    #[test]
    fn test_split_unterminated_block() {
        let result = split("---\ntitle: X\n");
        assert!(matches!(result, Err(FrontMatterError::Unterminated)));
    }

    #[test]
    fn test_split_invalid_yaml() {
        let result = split("---\ntitle: [unclosed\n---\n");
        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }

    #[test]
    fn test_split_non_mapping_block() {
        let result = split("---\n- just\n- a list\n---\n");
        assert!(matches!(result, Err(FrontMatterError::NotAMapping)));
    }

    #[test]
    fn test_split_body_keeps_later_delimiters() {
        let content = "---\ntitle: X\n---\nintro\n\n---\n\noutro\n";
        let fm = split(content).unwrap();
        assert_eq!(fm.body, "intro\n\n---\n\noutro\n");
    }

    #[test]
    fn test_split_nested_values() {
        let content = "---\nmeta:\n  owner: team-a\n  tags: [core]\n---\n";
        let fm = split(content).unwrap();
        assert_eq!(
            fm.metadata.get("meta"),
            Some(&json!({"owner": "team-a", "tags": ["core"]}))
        );
    }
}
