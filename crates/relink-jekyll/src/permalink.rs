//! Permalink derivation from post file names.
//!
//! Jekyll posts are named `YYYY-MM-DD-slug.<ext>`; the canonical permalink
//! under the static-site scheme is `/YYYY/MM/DD/slug.html`.

use std::sync::LazyLock;

use regex::Regex;

static POST_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)\.[^.]+$").unwrap());

/// Derive the canonical permalink for a post file name.
///
/// The date digits are taken verbatim from the name; the slug keeps interior
/// dots and has its extension replaced by `.html`. Returns `None` for names
/// that do not follow the date-slug convention; such files are not
/// reachable through legacy short links.
///
/// ```
/// assert_eq!(
///     relink_jekyll::permalink("2014-05-28-test.md").as_deref(),
///     Some("/2014/05/28/test.html")
/// );
/// ```
#[must_use]
pub fn permalink(file_name: &str) -> Option<String> {
    let caps = POST_NAME.captures(file_name)?;
    let (year, month, day, slug) = (&caps[1], &caps[2], &caps[3], &caps[4]);
    Some(format!("/{year}/{month}/{day}/{slug}.html"))
}
