//! Derivation of the inactive ("disabled") palette from a base color.
//!
//! Both derivations run through HSL space: the foreground mixes toward low
//! saturation and higher lightness at a ratio-controlled strength, which
//! keeps hue identity at low ratios and approaches pale near-white at ratio
//! 1. The background is an independent lightness-only blend toward a light
//! gray, so its contrast stays legible regardless of the foreground hue.

use crate::color::{hsl_to_rgb, rgb_to_hsl, ColorToken, Hsla};

/// Lightness the inactive background blends toward at mix ratio 1.
const BACKGROUND_TARGET_LIGHTNESS: f64 = 0.85;

/// Derives the desaturated, lightened foreground used by the inactive
/// variant. The `none` sentinel passes through unchanged; `mix_ratio` is
/// clamped to [0, 1]. Alpha-explicitness of the input is preserved.
pub fn derive_inactive_color(token: ColorToken, mix_ratio: f64) -> ColorToken {
    let (color, alpha_explicit) = match token {
        ColorToken::None => return ColorToken::None,
        ColorToken::Rgba {
            color,
            alpha_explicit,
        } => (color, alpha_explicit),
    };
    let mix = clamp_unit(mix_ratio);
    let hsla = rgb_to_hsl(color);
    let desaturation = 0.3 + 0.3 * mix;
    let light_boost = 0.2 + 0.2 * mix;
    let shifted = Hsla {
        h: hsla.h,
        s: clamp_unit(hsla.s * (1.0 - desaturation)),
        l: clamp_unit(hsla.l + light_boost),
        a: clamp_unit(hsla.a * (1.0 - 0.1 * mix)),
    };
    ColorToken::Rgba {
        color: hsl_to_rgb(shifted),
        alpha_explicit,
    }
}

/// Derives the neutral-gray backdrop for the inactive variant: a fully
/// desaturated color whose lightness is the input's lightness blended toward
/// 0.85 by `mix_ratio`, at full opacity, serialized without alpha.
pub fn derive_inactive_background(token: ColorToken, mix_ratio: f64) -> ColorToken {
    let color = match token.rgba() {
        Some(color) => color,
        None => return ColorToken::None,
    };
    let mix = clamp_unit(mix_ratio);
    let l = rgb_to_hsl(color).l;
    let gray = Hsla {
        h: 0.0,
        s: 0.0,
        l: clamp_unit(l * (1.0 - mix) + BACKGROUND_TARGET_LIGHTNESS * mix),
        a: 1.0,
    };
    ColorToken::Rgba {
        color: hsl_to_rgb(gray),
        alpha_explicit: false,
    }
}

fn clamp_unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
