//! Property-targeted recoloring of SVG text.
//!
//! A recolor call rewrites every occurrence of one paint property across the
//! three textual surfaces SVG uses for it: XML attributes (`fill="..."`),
//! inline `style="..."` attributes, and `<style>` block declarations. The
//! passes run in that order, each scanning the whole output of the previous
//! one. This is deliberately targeted pattern matching over immutable text,
//! not an SVG or CSS parser; the contract is defined in terms of these three
//! surfaces only.

use crate::color::{self, ColorToken};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

/// The two paintable properties the recolorer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvgProperty {
    Fill,
    Stroke,
}

impl SvgProperty {
    /// The lowercase CSS property name.
    pub fn as_str(self) -> &'static str {
        match self {
            SvgProperty::Fill => "fill",
            SvgProperty::Stroke => "stroke",
        }
    }
}

impl fmt::Display for SvgProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recoloring directive: a property, a target color, and the none rule.
///
/// When `preserve_none` is set and the target color is not `none`, existing
/// `none` values are left untouched so intentional paint holes survive.
#[derive(Debug, Clone, Copy)]
pub struct RecolorRequest {
    pub property: SvgProperty,
    pub color: ColorToken,
    pub preserve_none: bool,
}

/// `fill="..."` with the attribute name matched case-insensitively and the
/// original spacing around `=` captured for verbatim re-emission.
static FILL_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\b(fill)(\s*=\s*)"([^"]*)""#).unwrap());

static STROKE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\b(stroke)(\s*=\s*)"([^"]*)""#).unwrap());

static STYLE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\b(style)(\s*=\s*)"([^"]*)""#).unwrap());

static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<style\b[^>]*>)(.*?)(</style>)").unwrap());

/// `fill:` declarations inside a style block. The leading character class
/// keeps longer property names sharing the prefix (`fill-opacity`) and
/// suffix matches (`-fill`) from being touched: the name must sit at the
/// start of the block or right after `;`, `{`, or whitespace, and must be
/// followed by a colon before any other property character.
static FILL_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|[;{\s])(fill)(\s*:\s*)([^;}]+)").unwrap());

static STROKE_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|[;{\s])(stroke)(\s*:\s*)([^;}]+)").unwrap());

fn attr_re(property: SvgProperty) -> &'static Regex {
    match property {
        SvgProperty::Fill => &FILL_ATTR_RE,
        SvgProperty::Stroke => &STROKE_ATTR_RE,
    }
}

fn decl_re(property: SvgProperty) -> &'static Regex {
    match property {
        SvgProperty::Fill => &FILL_DECL_RE,
        SvgProperty::Stroke => &STROKE_DECL_RE,
    }
}

/// The none-preservation rule: skip a rewrite when the request preserves
/// `none`, targets a real color, and the existing value is `none`.
fn should_preserve(existing: &str, request: &RecolorRequest) -> bool {
    request.preserve_none && !request.color.is_none() && color::is_none_keyword(existing)
}

/// Rewrites every occurrence of `request.property` across all three textual
/// surfaces of `svg`, returning the new document text.
///
/// Each pass is independently idempotent: re-applying with the same request
/// is a no-op, except that values skipped by the none rule stay skipped.
pub fn recolor(svg: &str, request: &RecolorRequest) -> String {
    let new_value = request.color.to_css();
    let pass = rewrite_attributes(svg, request, &new_value);
    let pass = rewrite_inline_styles(&pass, request, &new_value);
    rewrite_style_blocks(&pass, request, &new_value)
}

/// Applies several directives in sequence. Fill and stroke target disjoint
/// attribute names, so their order does not affect the result.
pub fn apply_requests(svg: &str, requests: &[RecolorRequest]) -> String {
    requests
        .iter()
        .fold(svg.to_string(), |doc, request| recolor(&doc, request))
}

/// Pass 1: XML attribute occurrences.
fn rewrite_attributes(svg: &str, request: &RecolorRequest, new_value: &str) -> String {
    attr_re(request.property)
        .replace_all(svg, |caps: &Captures| {
            if should_preserve(&caps[3], request) {
                caps[0].to_string()
            } else {
                format!("{}{}\"{new_value}\"", &caps[1], &caps[2])
            }
        })
        .into_owned()
}

/// Pass 2: inline `style="..."` attributes.
fn rewrite_inline_styles(svg: &str, request: &RecolorRequest, new_value: &str) -> String {
    STYLE_ATTR_RE
        .replace_all(svg, |caps: &Captures| {
            match rewrite_style_body(&caps[3], request, new_value) {
                Some(body) => format!("{}{}\"{body}\"", &caps[1], &caps[2]),
                // No declaration changed: emit the original attribute text
                // untouched rather than re-formatting it.
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Rewrites one inline style body, or returns `None` when nothing matched.
fn rewrite_style_body(body: &str, request: &RecolorRequest, new_value: &str) -> Option<String> {
    let mut changed = false;
    let declarations: Vec<String> = body
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .map(|decl| {
            let Some((name, value)) = decl.split_once(':') else {
                return decl.to_string();
            };
            if !name.trim().eq_ignore_ascii_case(request.property.as_str())
                || should_preserve(value, request)
            {
                return decl.to_string();
            }
            changed = true;
            format!("{}: {new_value}", name.trim())
        })
        .collect();
    changed.then(|| declarations.join("; "))
}

/// Pass 3: `<style>` block declarations.
fn rewrite_style_blocks(svg: &str, request: &RecolorRequest, new_value: &str) -> String {
    STYLE_BLOCK_RE
        .replace_all(svg, |caps: &Captures| {
            let body = decl_re(request.property).replace_all(&caps[2], |decl: &Captures| {
                let raw = &decl[4];
                let value = raw.trim_end();
                if should_preserve(value, request) {
                    return decl[0].to_string();
                }
                let trailing = &raw[value.len()..];
                format!("{}{}{}{new_value}{trailing}", &decl[1], &decl[2], &decl[3])
            });
            format!("{}{body}{}", &caps[1], &caps[3])
        })
        .into_owned()
}
