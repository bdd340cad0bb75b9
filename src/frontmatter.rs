//! Frontmatter extraction for markdown content files.
//!
//! Collection entries carry their metadata in a leading YAML block fenced
//! by `---` lines:
//!
//! ```text
//! ---
//! title: Mandelbrot
//! featured: true
//! ---
//!
//! Body markdown…
//! ```
//!
//! This module only splits the document into its two halves. Deserializing
//! the YAML against a collection schema happens in [`crate::content`].
//!
//! The opening fence must be the very first line of the file. A document
//! without one is not a collection entry and is rejected rather than
//! treated as all-body — every file in a collection directory must carry
//! intentional metadata.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterError {
    #[error("missing frontmatter block (file must start with a `---` line)")]
    Missing,
    #[error("unterminated frontmatter block (no closing `---` line)")]
    Unterminated,
}

/// Split a markdown document into `(yaml, body)`.
///
/// The closing fence is the next line consisting of `---` alone; the body
/// is everything after it. Both halves may be empty.
pub fn split(input: &str) -> Result<(&str, &str), FrontmatterError> {
    let rest = input
        .strip_prefix("---\n")
        .or_else(|| input.strip_prefix("---\r\n"))
        .ok_or(FrontmatterError::Missing)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((yaml, body));
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_yaml_from_body() {
        let doc = "---\ntitle: Hello\n---\n\nBody text.\n";
        let (yaml, body) = split(doc).unwrap();
        assert_eq!(yaml, "title: Hello\n");
        assert_eq!(body, "\nBody text.\n");
    }

    #[test]
    fn empty_block_and_empty_body() {
        let (yaml, body) = split("---\n---\n").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "");
    }

    #[test]
    fn closing_fence_without_trailing_newline() {
        let (yaml, body) = split("---\ntitle: x\n---").unwrap();
        assert_eq!(yaml, "title: x\n");
        assert_eq!(body, "");
    }

    #[test]
    fn crlf_line_endings() {
        let doc = "---\r\ntitle: Hello\r\n---\r\nBody\r\n";
        let (yaml, body) = split(doc).unwrap();
        assert_eq!(yaml, "title: Hello\r\n");
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn missing_fence_is_error() {
        assert_eq!(split("title: Hello\n"), Err(FrontmatterError::Missing));
    }

    #[test]
    fn empty_document_is_error() {
        assert_eq!(split(""), Err(FrontmatterError::Missing));
    }

    #[test]
    fn fence_not_on_first_line_is_error() {
        let doc = "\n---\ntitle: Hello\n---\n";
        assert_eq!(split(doc), Err(FrontmatterError::Missing));
    }

    #[test]
    fn unterminated_block_is_error() {
        let doc = "---\ntitle: Hello\ndescription: x\n";
        assert_eq!(split(doc), Err(FrontmatterError::Unterminated));
    }

    #[test]
    fn bare_opening_fence_only_is_missing() {
        // `---` with no newline never opens a block
        assert_eq!(split("---"), Err(FrontmatterError::Missing));
    }

    #[test]
    fn dashes_inside_yaml_do_not_close_the_block() {
        let doc = "---\ntags:\n  - one\n  - two\n---\nBody\n";
        let (yaml, body) = split(doc).unwrap();
        assert!(yaml.contains("- one"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn horizontal_rule_in_body_is_preserved() {
        let doc = "---\ntitle: x\n---\nabove\n\n---\n\nbelow\n";
        let (_, body) = split(doc).unwrap();
        assert!(body.contains("above"));
        assert!(body.contains("below"));
        assert!(body.contains("---"));
    }
}
