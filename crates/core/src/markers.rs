//! Removal of bookkeeping comments left behind by renderers and formatters.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Comment markers removed from rendered HTML.
///
/// The formatter region markers plus the empty and fragment comments a
/// server renderer emits around conditional and multi-root output.
pub const MARKER_COMMENTS: &[&str] = &[
    "<!-- prettier-ignore-start -->",
    "<!-- prettier-ignore-end -->",
    "<!---->",
    "<!--[-->",
    "<!--]-->",
];

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = MARKER_COMMENTS
        .iter()
        .map(|marker| regex::escape(marker))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("marker alternation is a valid regex")
});

/// Removes every marker comment from `html`.
///
/// Only the exact strings in [`MARKER_COMMENTS`] are removed; any other
/// comment and all surrounding whitespace are left untouched.
///
/// # Examples
///
/// ```
/// use htmlssr_core::strip_marker_comments;
///
/// let html = "<div><!--[--><p>a</p><!---->\n<!-- keep --><!--]--></div>";
/// assert_eq!(
///     strip_marker_comments(html),
///     "<div><p>a</p>\n<!-- keep --></div>"
/// );
/// ```
pub fn strip_marker_comments(html: &str) -> String {
    strip_marker_comments_cow(html).into_owned()
}

/// Like [`strip_marker_comments`], borrowing the input when nothing matches.
pub fn strip_marker_comments_cow(html: &str) -> Cow<'_, str> {
    if !html.contains("<!--") {
        return Cow::Borrowed(html);
    }
    MARKER_RE.replace_all(html, "")
}
