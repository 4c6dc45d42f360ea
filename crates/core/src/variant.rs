//! Variant generation: the single entry point collaborators call.
//!
//! A generation call takes one validated set of options and produces the
//! ordered variant list: the `active` rendering with the caller's colors,
//! and optionally the `inactive` rendering with a desaturated palette and an
//! injected backdrop rectangle. Everything is a pure function over the
//! options; there is no shared or module-level state.

use crate::background::{inject_background, root_open_tag};
use crate::color::ColorToken;
use crate::error::TintError;
use crate::recolor::{apply_requests, RecolorRequest, SvgProperty};
use crate::shade::{derive_inactive_background, derive_inactive_color};
use serde::{Deserialize, Serialize};

/// Default mix ratio for the inactive transform.
pub const DEFAULT_INACTIVE_MIX: f64 = 0.5;
/// Default corner radius of the injected background rectangle.
pub const DEFAULT_CORNER_RADIUS: f64 = 6.0;
/// Default inset ratio of the injected background rectangle.
pub const DEFAULT_INSET_RATIO: f64 = 0.1;

/// The complete configuration for one generation call.
///
/// Out-of-range numeric values are clamped during generation rather than
/// rejected, so the generator stays total for any finite input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Raw SVG document text.
    pub svg: String,
    /// Target fill color; absent means the fill surfaces are left alone.
    #[serde(default)]
    pub fill: Option<ColorToken>,
    /// Target stroke color; absent means the stroke surfaces are left alone.
    #[serde(default)]
    pub stroke: Option<ColorToken>,
    /// Leave existing `fill="none"` values untouched.
    #[serde(default)]
    pub preserve_fill_none: bool,
    /// Leave existing `stroke="none"` values untouched.
    #[serde(default)]
    pub preserve_stroke_none: bool,
    /// Also produce the `inactive` variant.
    #[serde(default)]
    pub generate_inactive: bool,
    /// Strength of the inactive desaturation/lightening, in [0, 1].
    #[serde(default = "default_inactive_mix")]
    pub inactive_mix: f64,
    /// Corner radius of the inactive backdrop rectangle.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    /// Fraction of the bounding box the backdrop shrinks from each edge.
    #[serde(default = "default_inset_ratio")]
    pub inset_ratio: f64,
}

fn default_inactive_mix() -> f64 {
    DEFAULT_INACTIVE_MIX
}

fn default_corner_radius() -> f64 {
    DEFAULT_CORNER_RADIUS
}

fn default_inset_ratio() -> f64 {
    DEFAULT_INSET_RATIO
}

impl GenerationOptions {
    /// Options for recoloring `svg` with defaults everywhere else.
    pub fn new(svg: impl Into<String>) -> Self {
        Self {
            svg: svg.into(),
            fill: None,
            stroke: None,
            preserve_fill_none: false,
            preserve_stroke_none: false,
            generate_inactive: false,
            inactive_mix: DEFAULT_INACTIVE_MIX,
            corner_radius: DEFAULT_CORNER_RADIUS,
            inset_ratio: DEFAULT_INSET_RATIO,
        }
    }
}

/// One fully rendered output document plus the colors that produced it.
///
/// `name` is `"active"` or `"inactive"` by convention, but the generator
/// treats it as an opaque label for callers to build filenames from.
#[derive(Debug, Clone, Serialize)]
pub struct IconVariant {
    pub name: String,
    pub svg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ColorToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorToken>,
}

/// Generates the ordered variant list for one set of options.
///
/// Returns `[active, inactive?]`; on any failure the whole call aborts with
/// no partial output.
pub fn generate(options: &GenerationOptions) -> Result<Vec<IconVariant>, TintError> {
    if root_open_tag(&options.svg).is_none() {
        return Err(TintError::InvalidSvgDocument(
            "no <svg> root element found".into(),
        ));
    }

    let active_svg = apply_requests(&options.svg, &requests_for(options.fill, options.stroke, options));
    let mut variants = vec![IconVariant {
        name: "active".to_string(),
        svg: active_svg,
        fill: options.fill,
        stroke: options.stroke,
        background: None,
    }];

    if options.generate_inactive {
        let inactive_fill = options
            .fill
            .map(|c| derive_inactive_color(c, options.inactive_mix));
        let inactive_stroke = options
            .stroke
            .map(|c| derive_inactive_color(c, options.inactive_mix));

        // Recolor before injecting so the backdrop's own fill attribute is
        // not rewritten by the fill pass.
        let mut svg = apply_requests(&options.svg, &requests_for(inactive_fill, inactive_stroke, options));

        // A supplied fill takes precedence even when it is the none
        // sentinel: an icon whose fill is explicitly `none` gets no backdrop
        // from its stroke alone.
        let primary = options.fill.or(options.stroke).filter(|c| !c.is_none());
        let background = primary.map(|c| derive_inactive_background(c, options.inactive_mix));
        if let Some(background) = background {
            svg = inject_background(&svg, background, options.corner_radius, options.inset_ratio)?;
        }

        variants.push(IconVariant {
            name: "inactive".to_string(),
            svg,
            fill: inactive_fill,
            stroke: inactive_stroke,
            background,
        });
    }

    Ok(variants)
}

fn requests_for(
    fill: Option<ColorToken>,
    stroke: Option<ColorToken>,
    options: &GenerationOptions,
) -> Vec<RecolorRequest> {
    let mut requests = Vec::with_capacity(2);
    if let Some(color) = fill {
        requests.push(RecolorRequest {
            property: SvgProperty::Fill,
            color,
            preserve_none: options.preserve_fill_none,
        });
    }
    if let Some(color) = stroke {
        requests.push(RecolorRequest {
            property: SvgProperty::Stroke,
            color,
            preserve_none: options.preserve_stroke_none,
        });
    }
    requests
}
