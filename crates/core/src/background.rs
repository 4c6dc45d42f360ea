//! Inset background rectangle computation and injection.
//!
//! The inactive variant gets a rounded backdrop rectangle inserted as the
//! first child of the SVG root. When the root carries a usable `viewBox`,
//! the rectangle is computed in viewBox units and centered; otherwise it
//! falls back to percentage units. The rectangle carries a reserved marker
//! attribute so repeated injection replaces the previous rectangle instead
//! of stacking duplicates.

use crate::color::ColorToken;
use crate::error::TintError;
use regex::Regex;
use std::sync::LazyLock;

/// Marker attribute identifying a rectangle injected by this crate.
pub const BACKGROUND_MARKER: &str = "data-icon-background";

/// Upper bound on the inset ratio; guarantees the rectangle never shrinks
/// past 10% of either dimension.
pub const MAX_INSET_RATIO: f64 = 0.9;

static SVG_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b[^>]*>").unwrap());

static VIEW_BOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bviewBox\s*=\s*"([^"]*)""#).unwrap());

static MARKED_RECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?is)<rect\b[^>]*{BACKGROUND_MARKER}="true"[^>]*/?>"#
    ))
    .unwrap()
});

/// The `viewBox` rectangle of an SVG root element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parses the `viewBox` attribute of the document's root opening tag.
    ///
    /// Returns `None` unless the attribute holds exactly four finite,
    /// whitespace-separated numeric tokens.
    pub fn parse(svg: &str) -> Option<ViewBox> {
        let open = SVG_OPEN_RE.find(svg)?;
        let caps = VIEW_BOX_RE.captures(open.as_str())?;
        let tokens: Vec<&str> = caps[1].split_whitespace().collect();
        if tokens.len() != 4 {
            return None;
        }
        let mut values = [0.0_f64; 4];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            *slot = token.parse().ok().filter(|v: &f64| v.is_finite())?;
        }
        Some(ViewBox {
            min_x: values[0],
            min_y: values[1],
            width: values[2],
            height: values[3],
        })
    }
}

/// Finds the root `<svg ...>` opening tag, if any.
pub(crate) fn root_open_tag(svg: &str) -> Option<regex::Match<'_>> {
    SVG_OPEN_RE.find(svg)
}

/// Inserts or replaces the marked background rectangle.
///
/// `inset_ratio` is clamped to [0, 0.9] and `corner_radius` to >= 0. Fails
/// with `TintError::InvalidSvgDocument` when no opening `<svg>` tag exists
/// to anchor the insertion.
pub fn inject_background(
    svg: &str,
    color: ColorToken,
    corner_radius: f64,
    inset_ratio: f64,
) -> Result<String, TintError> {
    let inset = inset_ratio.clamp(0.0, MAX_INSET_RATIO);
    let radius = corner_radius.max(0.0);
    let rect = match ViewBox::parse(svg) {
        Some(vb) => {
            let width = vb.width * (1.0 - inset);
            let height = vb.height * (1.0 - inset);
            let x = vb.min_x + (vb.width - width) / 2.0;
            let y = vb.min_y + (vb.height - height) / 2.0;
            format_rect(
                &coord(x),
                &coord(y),
                &coord(width),
                &coord(height),
                &coord(radius),
                &color.to_css(),
            )
        }
        None => {
            let offset = inset * 100.0 / 2.0;
            let size = 100.0 - inset * 100.0;
            format_rect(
                &format!("{}%", coord(offset)),
                &format!("{}%", coord(offset)),
                &format!("{}%", coord(size)),
                &format!("{}%", coord(size)),
                &coord(radius),
                &color.to_css(),
            )
        }
    };

    if MARKED_RECT_RE.is_match(svg) {
        return Ok(MARKED_RECT_RE.replace(svg, rect.as_str()).into_owned());
    }
    let open = root_open_tag(svg).ok_or_else(|| {
        TintError::InvalidSvgDocument(
            "no opening <svg> tag to anchor the background rectangle".into(),
        )
    })?;
    let mut out = String::with_capacity(svg.len() + rect.len());
    out.push_str(&svg[..open.end()]);
    out.push_str(&rect);
    out.push_str(&svg[open.end()..]);
    Ok(out)
}

fn format_rect(x: &str, y: &str, width: &str, height: &str, radius: &str, fill: &str) -> String {
    format!(
        r#"<rect {BACKGROUND_MARKER}="true" x="{x}" y="{y}" width="{width}" height="{height}" rx="{radius}" ry="{radius}" fill="{fill}"/>"#
    )
}

/// Formats a coordinate without trailing zeros or a trailing decimal point;
/// whole numbers print as integers. Values are rounded to three decimals to
/// keep float noise out of the markup.
fn coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}
