//! Post discovery by filesystem walking.
//!
//! Discovery only identifies candidate files, returning lightweight
//! references; reading and indexing happen in
//! [`LegacyIndex::build`](crate::LegacyIndex::build).

use std::fs;
use std::path::{Path, PathBuf};

/// Directory name Jekyll keeps dated posts under.
const POSTS_DIR: &str = "_posts";

/// Reference to a discovered post file. No content is read at this stage.
#[derive(Debug, Clone)]
pub(crate) struct PostRef {
    /// Path to the file.
    pub path: PathBuf,
    /// Base file name, used for permalink derivation.
    pub file_name: String,
}

/// Discovers post files by walking a site directory.
///
/// Only regular files below a `_posts` directory component are candidates.
/// Sites may nest category directories inside `_posts`, so the walk keeps
/// collecting once inside one.
pub(crate) struct Scanner {
    site_dir: PathBuf,
}

impl Scanner {
    /// Create a new Scanner rooted at `site_dir`.
    pub fn new(site_dir: &Path) -> Self {
        Self {
            site_dir: site_dir.to_path_buf(),
        }
    }

    /// Walk the site directory and return a reference for every post file.
    pub fn scan(&self) -> Vec<PostRef> {
        let mut refs = Vec::new();
        self.scan_directory(&self.site_dir, false, &mut refs);
        refs
    }

    fn scan_directory(&self, dir: &Path, in_posts: bool, refs: &mut Vec<PostRef>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(&path, in_posts || name == POSTS_DIR, refs);
            } else if in_posts {
                refs.push(PostRef {
                    path,
                    file_name: name,
                });
            }
        }
    }
}
