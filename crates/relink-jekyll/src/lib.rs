//! Legacy post-id resolution for Jekyll sites.
//!
//! WordPress-era short links carry an opaque identifier; the corresponding
//! post lives in the Jekyll site as `_posts/YYYY-MM-DD-slug.md` with the
//! identifier recorded in its front matter. This crate scans the site once,
//! derives each post's canonical permalink from its file name, and builds an
//! immutable [`LegacyIndex`] from identifier to permalink.
//!
//! Construction is synchronous and happens before the server starts; the
//! index is read-only afterwards. Files that cannot contribute an entry
//! (wrong name, unreadable, no front matter, no identifier) are skipped
//! without failing the build; they are simply unreachable through short
//! links. Two posts claiming the same identifier fail the build, because
//! the redirect target would be ambiguous.

mod front_matter;
mod index;
mod permalink;
mod scanner;

pub use front_matter::{FrontMatter, FrontMatterError};
pub use index::{IndexError, LegacyIndex};
pub use permalink::permalink;
