//! Front-matter extraction and parsing.
//!
//! Posts carry a YAML header block delimited by `---` lines at the very top
//! of the file. Only the field needed for legacy resolution is parsed;
//! unknown keys are ignored.

use serde::Deserialize;

/// Error reading a front-matter header.
///
/// Callers that merely want "no legacy id" can treat every variant as a
/// skip, but the variants stay distinct: a file without a header block is
/// not the same situation as one whose header fails to parse.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The file does not begin with a `---` delimiter line.
    #[error("no front-matter header")]
    Missing,
    /// The opening delimiter is never closed.
    #[error("unterminated front-matter header")]
    Unterminated,
    /// The header block is not valid YAML.
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parsed front-matter fields.
#[derive(Debug, Default, Deserialize)]
pub struct FrontMatter {
    /// Legacy identifier as written in the header. Kept as a raw YAML value
    /// so `wordpress_id: 100` and `wordpress_id: "100"` read the same.
    #[serde(default)]
    wordpress_id: Option<serde_yaml::Value>,
}

impl FrontMatter {
    /// Extract and parse the front-matter block at the top of `content`.
    ///
    /// An empty block (`---` immediately followed by `---`) is valid and
    /// carries no fields.
    pub fn parse(content: &str) -> Result<Self, FrontMatterError> {
        let block = front_matter_block(content)?;
        if block.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(block)?)
    }

    /// The legacy identifier, normalised to its literal string form.
    ///
    /// The identifier is an opaque key matched verbatim against incoming
    /// path segments; scalar values are rendered as written (`100` and
    /// `"100"` both yield `100`). Returns `None` when the field is absent
    /// or not a scalar.
    #[must_use]
    pub fn legacy_id(&self) -> Option<String> {
        match self.wordpress_id.as_ref()? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Slice the header block between the opening and closing `---` lines.
fn front_matter_block(content: &str) -> Result<&str, FrontMatterError> {
    let body = content
        .strip_prefix("---")
        .and_then(|rest| rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')))
        .ok_or(FrontMatterError::Missing)?;

    let mut end = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Ok(&body[..end]);
        }
        end += line.len();
    }
    Err(FrontMatterError::Unterminated)
}
