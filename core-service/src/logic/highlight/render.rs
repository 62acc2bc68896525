//! Highlight Rendering
//!
//! Each rendering is a left fold over the sorted matches. The fold state
//! carries its own insertion offset, so the rich and light passes never
//! share an accumulator.

use super::types::Match;

/// Markup wrapped around one matched span
pub trait Marker {
    fn open(&self, m: &Match) -> String;
    fn close(&self, m: &Match) -> String;
}

/// HTML span with the source field and keyword as a tooltip
pub struct RichMarker;

impl Marker for RichMarker {
    fn open(&self, m: &Match) -> String {
        format!(
            r#"<span style="background-color: #FFFF99;" title="{}: {}">"#,
            escape_attribute(&m.field),
            escape_attribute(&m.keyword)
        )
    }

    fn close(&self, _m: &Match) -> String {
        "</span>".to_string()
    }
}

/// Markdown bold
pub struct LightMarker;

impl Marker for LightMarker {
    fn open(&self, _m: &Match) -> String {
        "**".to_string()
    }

    fn close(&self, _m: &Match) -> String {
        "**".to_string()
    }
}

/// Fold accumulator
#[derive(Debug)]
struct RenderState {
    text: String,
    /// Bytes of markup inserted so far
    offset: usize,
    /// End of the last wrapped span in original coordinates
    covered_until: usize,
}

/// Wrap every non-overlapping match of `original` with `marker`
///
/// `matches` must be sorted by start. A match overlapping an already wrapped
/// span is left unmarked.
pub fn render(original: &str, matches: &[Match], marker: &dyn Marker) -> String {
    let initial = RenderState {
        text: original.to_string(),
        offset: 0,
        covered_until: 0,
    };

    matches
        .iter()
        .fold(initial, |state, m| wrap_span(state, m, marker))
        .text
}

fn wrap_span(state: RenderState, m: &Match, marker: &dyn Marker) -> RenderState {
    if m.is_empty() || m.start < state.covered_until {
        return state;
    }

    let start = m.start + state.offset;
    let end = m.end + state.offset;
    if end > state.text.len()
        || !state.text.is_char_boundary(start)
        || !state.text.is_char_boundary(end)
    {
        log::warn!("Dropping out-of-range span {}..{} ({})", m.start, m.end, m.keyword);
        return state;
    }

    let open = marker.open(m);
    let close = marker.close(m);

    let mut text = state.text;
    text.insert_str(end, &close);
    text.insert_str(start, &open);

    RenderState {
        text,
        offset: state.offset + open.len() + close.len(),
        covered_until: m.end,
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(field: &str, keyword: &str, start: usize, end: usize) -> Match {
        Match {
            field: field.to_string(),
            keyword: keyword.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_light_render_multiple_spans() {
        let text = "Python and SQL";
        let matches = vec![m("skills", "Python", 0, 6), m("skills", "SQL", 11, 14)];
        assert_eq!(render(text, &matches, &LightMarker), "**Python** and **SQL**");
    }

    #[test]
    fn test_rich_render_carries_metadata() {
        let text = "Knows Rust";
        let matches = vec![m("skills", "Rust", 6, 10)];
        assert_eq!(
            render(text, &matches, &RichMarker),
            r#"Knows <span style="background-color: #FFFF99;" title="skills: Rust">Rust</span>"#
        );
    }

    #[test]
    fn test_title_is_escaped() {
        let matches = vec![m("skills", "\"C<>\"", 0, 5)];
        let out = render("\"C<>\"", &matches, &RichMarker);
        assert!(out.contains(r#"title="skills: &quot;C&lt;&gt;&quot;""#));
    }

    #[test]
    fn test_overlapping_spans_rendered_once() {
        let text = "machine learning";
        let matches = vec![
            m("skills", "machine learning", 0, 16),
            m("tools", "machine", 0, 7),
            m("projects", "learning", 8, 16),
        ];
        assert_eq!(render(text, &matches, &LightMarker), "**machine learning**");
    }

    #[test]
    fn test_partial_overlap_skipped() {
        let text = "abcdefgh";
        let matches = vec![m("a", "abcd", 0, 4), m("b", "cdef", 2, 6), m("c", "gh", 6, 8)];
        assert_eq!(render(text, &matches, &LightMarker), "**abcd**ef**gh**");
    }

    #[test]
    fn test_out_of_range_span_ignored() {
        let matches = vec![m("a", "zz", 3, 10)];
        assert_eq!(render("abc", &matches, &LightMarker), "abc");
    }

    #[test]
    fn test_no_matches_is_identity() {
        assert_eq!(render("plain", &[], &RichMarker), "plain");
        assert_eq!(render("", &[], &LightMarker), "");
    }
}
