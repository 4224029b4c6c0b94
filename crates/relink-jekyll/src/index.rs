//! Legacy identifier index construction and lookup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use crate::front_matter::FrontMatter;
use crate::permalink::permalink;
use crate::scanner::Scanner;

/// Error building a [`LegacyIndex`].
///
/// Both variants are configuration problems: the caller must abort startup
/// rather than serve from a partial or empty index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The configured site directory does not exist.
    #[error("site directory not found: {}", .0.display())]
    SiteDirNotFound(PathBuf),
    /// Two posts declare the same legacy identifier, so the redirect target
    /// would be ambiguous.
    #[error("duplicate legacy id {id:?} in {}", .path.display())]
    DuplicateId {
        /// The identifier both posts claim.
        id: String,
        /// The post encountered second.
        path: PathBuf,
    },
}

/// Immutable mapping from legacy post identifier to permalink.
///
/// Built once from the site's `_posts` files before the server starts and
/// read-only afterwards, so request handlers share it without locking.
#[derive(Debug, Default)]
pub struct LegacyIndex {
    entries: HashMap<String, String>,
}

impl LegacyIndex {
    /// Build the index by scanning `site_dir` for posts carrying a legacy
    /// identifier.
    ///
    /// Files that are unreadable, not named like posts, lack a front-matter
    /// header, or carry no identifier are skipped with a debug log line.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::SiteDirNotFound`] when `site_dir` is not a
    /// directory, and [`IndexError::DuplicateId`] when two posts declare the
    /// same identifier.
    pub fn build(site_dir: &Path) -> Result<Self, IndexError> {
        if !site_dir.is_dir() {
            return Err(IndexError::SiteDirNotFound(site_dir.to_path_buf()));
        }

        let mut entries = HashMap::new();
        for post in Scanner::new(site_dir).scan() {
            let Some(permalink) = permalink(&post.file_name) else {
                tracing::debug!(path = %post.path.display(), "skipping non-post file name");
                continue;
            };
            let content = match fs::read_to_string(&post.path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!(path = %post.path.display(), error = %e, "skipping unreadable post");
                    continue;
                }
            };
            let front_matter = match FrontMatter::parse(&content) {
                Ok(front_matter) => front_matter,
                Err(e) => {
                    tracing::debug!(path = %post.path.display(), error = %e, "skipping post with unusable front matter");
                    continue;
                }
            };
            let Some(id) = front_matter.legacy_id() else {
                continue;
            };

            match entries.entry(id) {
                Entry::Occupied(existing) => {
                    return Err(IndexError::DuplicateId {
                        id: existing.key().clone(),
                        path: post.path,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(permalink);
                }
            }
        }

        Ok(Self { entries })
    }

    /// Look up the permalink for a legacy identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Number of indexed identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no post carries a legacy identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_post(site: &Path, name: &str, content: &str) {
        let posts = site.join("_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join(name), content).unwrap();
    }

    #[test]
    fn test_builds_index_from_posts() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2014-05-28-test.md",
            "---\nwordpress_id: 100\n---\n",
        );
        write_post(
            dir.path(),
            "2016-11-03-other.md",
            "---\nwordpress_id: \"2a\"\n---\nbody\n",
        );

        let index = LegacyIndex::build(dir.path()).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("100"), Some("/2014/05/28/test.html"));
        assert_eq!(index.get("2a"), Some("/2016/11/03/other.html"));
    }

    #[test]
    fn test_identifier_is_matched_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2014-05-28-test.md",
            "---\nwordpress_id: 100\n---\n",
        );

        let index = LegacyIndex::build(dir.path()).unwrap();

        // The identifier is an opaque key; no numeric re-encoding happens.
        assert_eq!(index.get("100"), Some("/2014/05/28/test.html"));
        assert_eq!(index.get("0100"), None);
        assert_eq!(index.get("64"), None);
    }

    #[test]
    fn test_duplicate_id_fails_build() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2014-05-28-test.md",
            "---\nwordpress_id: 100\n---\n",
        );
        write_post(
            dir.path(),
            "2015-01-01-clash.md",
            "---\nwordpress_id: 100\n---\n",
        );

        let err = LegacyIndex::build(dir.path()).unwrap_err();

        match err {
            IndexError::DuplicateId { id, .. } => assert_eq!(id, "100"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_site_dir_fails_build() {
        let dir = tempfile::tempdir().unwrap();
        let err = LegacyIndex::build(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, IndexError::SiteDirNotFound(_)));
    }

    #[test]
    fn test_posts_without_usable_metadata_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "notes.txt", "not a post\n");
        write_post(dir.path(), "2014-05-28-no-header.md", "plain body\n");
        write_post(dir.path(), "2014-05-29-no-id.md", "---\ntitle: Hi\n---\n");
        write_post(
            dir.path(),
            "2014-05-30-bad-yaml.md",
            "---\nwordpress_id: [oops\n---\n",
        );
        write_post(
            dir.path(),
            "2014-05-31-good.md",
            "---\nwordpress_id: 7\n---\n",
        );

        let index = LegacyIndex::build(dir.path()).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("7"), Some("/2014/05/31/good.html"));
    }

    #[test]
    fn test_site_without_posts_yields_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_posts")).unwrap();

        let index = LegacyIndex::build(dir.path()).unwrap();

        assert!(index.is_empty());
        assert_eq!(index.get("100"), None);
    }
}
