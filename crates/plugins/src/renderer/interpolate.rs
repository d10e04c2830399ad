//! `{{ path }}` text interpolation.

use super::expr::{display_value, parse_path};
use htmlssr_core::{RenderError, RenderRoot};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Comments and raw-text elements are copied through without interpolation.
const RAW_SECTIONS: [(&str, &str); 3] = [
    ("<!--", "-->"),
    ("<script", "</script"),
    ("<style", "</style"),
];

/// Replaces every `{{ path }}` in the template with the escaped value at `path`.
///
/// Text inside comments and `<script>`/`<style>` elements is left as written.
pub(crate) fn interpolate(root: &RenderRoot) -> Result<String, RenderError> {
    let template = root.template.as_str();
    if !template.contains(OPEN) {
        return Ok(template.to_string());
    }

    // ASCII lowercasing keeps byte offsets, so indexes found here slice `template`.
    let lower = template.to_ascii_lowercase();
    let mut out = String::with_capacity(template.len());
    let mut pos = 0;

    while let Some(start) = template[pos..].find(OPEN).map(|i| pos + i) {
        let raw_end = raw_section(&lower, pos)
            .filter(|&(raw, _)| raw < start)
            .map(|(_, end)| end);
        if let Some(end) = raw_end {
            out.push_str(&template[pos..end]);
            pos = end;
            continue;
        }

        out.push_str(&template[pos..start]);
        let body_start = start + OPEN.len();
        let end = template[body_start..]
            .find(CLOSE)
            .ok_or(RenderError::UnclosedInterpolation { offset: start })?;

        let path = parse_path(&template[body_start..body_start + end])?;
        let value = root.lookup(path);
        if value.is_none() {
            log::debug!("interpolated path `{}` is not in the render data", path);
        }
        out.push_str(&html_escape::encode_quoted_attribute(&display_value(value)));

        pos = body_start + end + CLOSE.len();
    }
    out.push_str(&template[pos..]);

    Ok(out)
}

/// Finds the first raw section at or after `from`, returning its start and the
/// offset just past its end. An unterminated section runs to the end of input.
fn raw_section(lower: &str, from: usize) -> Option<(usize, usize)> {
    RAW_SECTIONS
        .iter()
        .filter_map(|&(open, close)| {
            let start = find_opener(lower, from, open)?;
            let body = start + open.len();
            let end = match lower[body..].find(close) {
                Some(i) if close.ends_with('>') => body + i + close.len(),
                Some(i) => {
                    let tag_end = body + i + close.len();
                    lower[tag_end..]
                        .find('>')
                        .map_or(lower.len(), |gt| tag_end + gt + 1)
                }
                None => lower.len(),
            };
            Some((start, end))
        })
        .min_by_key(|&(start, _)| start)
}

/// Like `find`, but a tag opener must be followed by a name boundary so
/// `<styles>` is not taken for `<style>`.
fn find_opener(lower: &str, from: usize, open: &str) -> Option<usize> {
    let mut at = from;
    while let Some(i) = lower[at..].find(open) {
        let start = at + i;
        let next = lower[start + open.len()..].chars().next();
        if open.ends_with('-')
            || matches!(next, None | Some('>' | '/'))
            || next.is_some_and(|c| c.is_ascii_whitespace())
        {
            return Some(start);
        }
        at = start + open.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmlssr_core::RenderContext;
    use serde_json::json;

    fn root(template: &str, data: serde_json::Value) -> RenderRoot {
        RenderRoot::new(template, RenderContext::from_json(data))
    }

    #[test]
    fn substitutes_nested_values() {
        let root = root(
            "<h1>{{ site.title }}</h1><p>{{count}} posts</p>",
            json!({ "site": { "title": "Notes" }, "count": 12 }),
        );
        assert_eq!(
            interpolate(&root).unwrap(),
            "<h1>Notes</h1><p>12 posts</p>"
        );
    }

    #[test]
    fn escapes_markup_in_values() {
        let root = root("<p>{{ name }}</p>", json!({ "name": "<b>\"Tom\" & Jerry</b>" }));
        assert_eq!(
            interpolate(&root).unwrap(),
            "<p>&lt;b&gt;&quot;Tom&quot; &amp; Jerry&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn missing_values_render_empty() {
        let root = root("<p>[{{ nope }}]</p>", json!({}));
        assert_eq!(interpolate(&root).unwrap(), "<p>[]</p>");
    }

    #[test]
    fn reports_unclosed_interpolation_offset() {
        let root = root("<p>{{ a }}</p><p>{{ b </p>", json!({ "a": 1 }));
        let err = interpolate(&root).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnclosedInterpolation { offset: 17 }
        ));
    }

    #[test]
    fn leaves_scripts_styles_and_comments_alone() {
        let template = concat!(
            "<title>{{ title }}</title>",
            "<script type=\"module\">const t = `{{`; if (a) { b({{}}) }</SCRIPT>",
            "<style>.x{{}}</style>",
            "<!-- {{ not.rendered -->",
            "<p>{{ title }}</p>",
        );
        let out = interpolate(&root(template, json!({ "title": "Home" }))).unwrap();
        assert_eq!(
            out,
            concat!(
                "<title>Home</title>",
                "<script type=\"module\">const t = `{{`; if (a) { b({{}}) }</SCRIPT>",
                "<style>.x{{}}</style>",
                "<!-- {{ not.rendered -->",
                "<p>Home</p>",
            )
        );
    }

    #[test]
    fn similar_tag_names_are_still_interpolated() {
        let out = interpolate(&root("<styles>{{ n }}</styles>", json!({ "n": 2 }))).unwrap();
        assert_eq!(out, "<styles>2</styles>");
    }

    #[test]
    fn rejects_expressions() {
        let root = root("{{ a + b }}", json!({}));
        assert!(matches!(
            interpolate(&root),
            Err(RenderError::UnsupportedExpression { ref expression }) if expression == "a + b"
        ));
    }
}
