//! SVG markup helpers.
//!
//! Shape templates are treated as opaque markup with a few conventions:
//! anchor markers are elements whose `id` starts with `attach-`, and the
//! compiler only ever rewrites start tags, never element content.

use std::ops::Range;
use std::sync::OnceLock;

use isokit_core::{is_anchor_name, AttachmentPoint, CanvasSize, Point};
use regex::Regex;

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| {
        Regex::new(
            r#"<([a-zA-Z][\w:.-]*)((?:\s+[\w:.-]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*(/?)>"#,
        )
        .expect("invalid regex pattern")
    })
}

fn attr_regex() -> &'static Regex {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"([\w:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid regex pattern")
    })
}

fn svg_open_regex() -> &'static Regex {
    static SVG_OPEN: OnceLock<Regex> = OnceLock::new();
    SVG_OPEN.get_or_init(|| Regex::new(r"(?s)<svg\b[^>]*>").expect("invalid regex pattern"))
}

/// Escapes an attribute value for a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decodes the entities [`escape_attr`] produces, plus `&apos;` and `&gt;`.
fn unescape_attr(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// A start tag found in markup.
#[derive(Debug, Clone)]
pub struct StartTag {
    /// Byte range of the whole tag
    pub range: Range<usize>,
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub self_closing: bool,
}

impl StartTag {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The element id when it names an anchor marker.
    pub fn anchor_id(&self) -> Option<&str> {
        self.attr("id").filter(|id| is_anchor_name(id))
    }

    fn render(&self) -> String {
        let mut out = format!("<{}", self.name);
        for (k, v) in &self.attrs {
            out.push_str(&format!(" {k}=\"{}\"", escape_attr(v)));
        }
        out.push_str(if self.self_closing { "/>" } else { ">" });
        out
    }

    fn set_attr(&mut self, key: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((key.to_string(), value.to_string())),
        }
    }
}

/// Every start tag in document order.
pub fn start_tags(markup: &str) -> Vec<StartTag> {
    tag_regex()
        .captures_iter(markup)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps
                .get(2)
                .map(|m| {
                    attr_regex()
                        .captures_iter(m.as_str())
                        .filter_map(|a| {
                            let key = a.get(1)?.as_str().to_string();
                            let value = unescape_attr(a.get(2).or_else(|| a.get(3))?.as_str());
                            Some((key, value))
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(StartTag {
                range: whole.range(),
                name: caps.get(1)?.as_str().to_string(),
                attrs,
                self_closing: caps.get(3).is_some_and(|m| !m.as_str().is_empty()),
            })
        })
        .collect()
}

fn rewrite_tags(markup: &str, mut edit: impl FnMut(&mut StartTag) -> Option<String>) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut cursor = 0;
    for mut tag in start_tags(markup) {
        if let Some(replacement) = edit(&mut tag) {
            out.push_str(&markup[cursor..tag.range.start]);
            out.push_str(&replacement);
            cursor = tag.range.end;
        }
    }
    out.push_str(&markup[cursor..]);
    out
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Inner markup of a full `<svg>` document, or the input unchanged when it
/// is already a fragment.
pub fn strip_svg_wrapper(svg: &str) -> &str {
    let Some(open) = svg_open_regex().find(svg) else {
        return svg;
    };
    let end = svg.rfind("</svg>").unwrap_or(svg.len());
    if end < open.end() {
        return "";
    }
    svg[open.end()..end].trim()
}

/// `width`/`height` declared on a root `<svg>` element, unitless or `px`.
pub fn svg_size(svg: &str) -> Option<(f64, f64)> {
    let open = svg_open_regex().find(svg)?;
    let tag = start_tags(open.as_str()).into_iter().next()?;
    let dimension = |key: &str| {
        tag.attr(key)?
            .trim()
            .trim_end_matches("px")
            .parse::<f64>()
            .ok()
    };
    Some((dimension("width")?, dimension("height")?))
}

/// Anchor markers in document order, with local coordinates.
pub fn anchor_markers(markup: &str) -> Vec<AttachmentPoint> {
    start_tags(markup)
        .iter()
        .filter_map(|tag| {
            let name = tag.anchor_id()?;
            let coord = |primary: &str, fallback: &str| {
                tag.attr(primary)
                    .or_else(|| tag.attr(fallback))
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .unwrap_or(0.0)
            };
            Some(AttachmentPoint::new(name, coord("cx", "x"), coord("cy", "y")))
        })
        .collect()
}

/// Forces the visibility of every anchor marker.
pub fn set_anchor_visibility(markup: &str, visible: bool) -> String {
    let value = if visible { "visible" } else { "hidden" };
    rewrite_tags(markup, |tag| {
        tag.anchor_id()?;
        tag.set_attr("visibility", value);
        Some(tag.render())
    })
}

/// Removes every anchor marker element.
pub fn strip_anchors(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut cursor = 0;
    for tag in start_tags(markup) {
        if tag.range.start < cursor || tag.anchor_id().is_none() {
            continue;
        }
        out.push_str(&markup[cursor..tag.range.start]);
        cursor = tag.range.end;
        if !tag.self_closing {
            let close = format!("</{}>", tag.name);
            if let Some(pos) = markup[cursor..].find(&close) {
                cursor += pos + close.len();
            }
        }
    }
    out.push_str(&markup[cursor..]);
    out
}

/// Removes every `id` attribute.
pub fn strip_ids(markup: &str) -> String {
    rewrite_tags(markup, |tag| {
        let before = tag.attrs.len();
        tag.attrs.retain(|(k, _)| k != "id");
        (tag.attrs.len() != before).then(|| tag.render())
    })
}

/// A marker element for an anchor.
pub fn anchor_marker(anchor: &AttachmentPoint, radius: f64, visible: bool) -> String {
    format!(
        "<circle id=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"#e5484d\" visibility=\"{}\"/>",
        escape_attr(&anchor.name),
        fmt_num(anchor.x),
        fmt_num(anchor.y),
        fmt_num(radius),
        if visible { "visible" } else { "hidden" }
    )
}

/// `translate(x, y)` transform attribute value.
pub fn translate(offset: Point) -> String {
    format!("translate({}, {})", fmt_num(offset.x), fmt_num(offset.y))
}

/// Wraps composed content in a root document sized to the canvas.
pub fn wrap_document(content: &str, canvas: CanvasSize) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">{content}</svg>",
        w = fmt_num(canvas.width),
        h = fmt_num(canvas.height),
    )
}
