//! Color tokens and RGB <-> HSL conversion for the icon-tint core.
//!
//! A `ColorToken` is either the CSS keyword `none` or an 8-bit RGBA value
//! that remembers whether its textual form carried an explicit alpha channel
//! (3/6-digit vs 4/8-digit hex), so serialization round-trips the original
//! width. `Hsla` is a transient view used by the inactive-shade derivation;
//! it is never the stored representation. All conversions are pure functions
//! over value types.

use crate::error::TintError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit RGBA color. Alpha 255 means fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Serializes as lowercase zero-padded hex, with the alpha byte appended
    /// only when `include_alpha` is true.
    pub fn to_hex(self, include_alpha: bool) -> String {
        if include_alpha {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        } else {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }
}

/// HSLA view of an RGBA color: hue in [0, 360), saturation, lightness, and
/// alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

/// A parsed color value: the `none` keyword or an RGBA color.
///
/// `alpha_explicit` records whether the source text encoded an alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    None,
    Rgba { color: Rgba, alpha_explicit: bool },
}

impl ColorToken {
    /// Parses a color string: the keyword `none` (case insensitive) or `#`
    /// followed by exactly 3, 4, 6, or 8 hex digits. Surrounding whitespace
    /// is ignored. Short forms expand each digit by duplication (`a` -> `aa`).
    ///
    /// Returns `TintError::InvalidColor` naming the offending input for any
    /// other shape.
    pub fn parse(text: &str) -> Result<ColorToken, TintError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(ColorToken::None);
        }
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| TintError::InvalidColor(trimmed.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TintError::InvalidColor(trimmed.to_string()));
        }
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_owned(),
            _ => return Err(TintError::InvalidColor(trimmed.to_string())),
        };
        let parse_byte = |i: usize| {
            u8::from_str_radix(&expanded[2 * i..2 * i + 2], 16)
                .map_err(|_| TintError::InvalidColor(trimmed.to_string()))
        };
        let r = parse_byte(0)?;
        let g = parse_byte(1)?;
        let b = parse_byte(2)?;
        let alpha_explicit = expanded.len() == 8;
        let a = if alpha_explicit { parse_byte(3)? } else { 255 };
        Ok(ColorToken::Rgba {
            color: Rgba { r, g, b, a },
            alpha_explicit,
        })
    }

    /// Serializes as CSS text with an explicit choice of alpha width.
    pub fn format(&self, include_alpha: bool) -> String {
        match self {
            ColorToken::None => "none".to_string(),
            ColorToken::Rgba { color, .. } => color.to_hex(include_alpha),
        }
    }

    /// Serializes as CSS text, honoring the alpha-explicitness of the
    /// original textual form.
    pub fn to_css(&self) -> String {
        match self {
            ColorToken::None => "none".to_string(),
            ColorToken::Rgba {
                color,
                alpha_explicit,
            } => color.to_hex(*alpha_explicit),
        }
    }

    /// True for the `none` sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, ColorToken::None)
    }

    /// Returns the RGBA value, or `None` for the `none` sentinel.
    pub fn rgba(&self) -> Option<Rgba> {
        match self {
            ColorToken::None => None,
            ColorToken::Rgba { color, .. } => Some(*color),
        }
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for ColorToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ColorToken::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// True when `text` is the `none` keyword up to surrounding whitespace and case.
pub fn is_none_keyword(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("none")
}

/// Converts RGBA to HSLA.
///
/// Lightness is `(max + min) / 2` of the normalized channels; saturation is
/// `delta / (1 - |2L - 1|)` for chromatic colors; hue comes from whichever
/// channel is largest (checked red, then green, then blue) and is wrapped
/// into [0, 360) by adding 360 when negative.
pub fn rgb_to_hsl(c: Rgba) -> Hsla {
    let r = c.r as f64 / 255.0;
    let g = c.g as f64 / 255.0;
    let b = c.b as f64 / 255.0;
    let a = c.a as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return Hsla { h: 0.0, s: 0.0, l, a };
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    Hsla { h, s, l, a }
}

/// Converts HSLA back to RGBA.
///
/// Zero saturation takes the achromatic fast path (all channels equal
/// `round(l * 255)`); otherwise the standard (p, q) piecewise interpolation
/// samples the hue at three 120-degree offsets for R, G, B. Channels are
/// rounded to the nearest integer and clamped to [0, 255].
pub fn hsl_to_rgb(c: Hsla) -> Rgba {
    let a = channel_byte(c.a);

    if c.s == 0.0 {
        let gray = channel_byte(c.l);
        return Rgba {
            r: gray,
            g: gray,
            b: gray,
            a,
        };
    }

    let q = if c.l < 0.5 {
        c.l * (1.0 + c.s)
    } else {
        c.l + c.s - c.l * c.s
    };
    let p = 2.0 * c.l - q;
    let h = c.h / 360.0;

    Rgba {
        r: channel_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        g: channel_byte(hue_to_channel(p, q, h)),
        b: channel_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
        a,
    }
}

/// Samples one channel of the piecewise hue interpolation at offset `t`.
fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Quantizes a [0, 1] channel to a byte, rounding and clamping.
fn channel_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 255 }
    }

    // -- parsing --

    #[test]
    fn parse_none_keyword() {
        assert_eq!(ColorToken::parse("none").unwrap(), ColorToken::None);
    }

    #[test]
    fn parse_none_is_case_insensitive_and_trimmed() {
        assert_eq!(ColorToken::parse("  NoNe  ").unwrap(), ColorToken::None);
    }

    #[test]
    fn parse_six_digit_hex() {
        let token = ColorToken::parse("#ff8040").unwrap();
        assert_eq!(
            token,
            ColorToken::Rgba {
                color: Rgba {
                    r: 0xff,
                    g: 0x80,
                    b: 0x40,
                    a: 255
                },
                alpha_explicit: false,
            }
        );
    }

    #[test]
    fn parse_three_digit_hex_expands_by_duplication() {
        let token = ColorToken::parse("#f80").unwrap();
        assert_eq!(token.rgba().unwrap(), opaque(0xff, 0x88, 0x00));
    }

    #[test]
    fn parse_four_digit_hex_sets_explicit_alpha() {
        let token = ColorToken::parse("#f808").unwrap();
        assert_eq!(
            token,
            ColorToken::Rgba {
                color: Rgba {
                    r: 0xff,
                    g: 0x88,
                    b: 0x00,
                    a: 0x88
                },
                alpha_explicit: true,
            }
        );
    }

    #[test]
    fn parse_eight_digit_hex() {
        let token = ColorToken::parse("#11223344").unwrap();
        assert_eq!(
            token,
            ColorToken::Rgba {
                color: Rgba {
                    r: 0x11,
                    g: 0x22,
                    b: 0x33,
                    a: 0x44
                },
                alpha_explicit: true,
            }
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        let upper = ColorToken::parse("#FF00AA").unwrap();
        let lower = ColorToken::parse("#ff00aa").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn parse_rejects_two_digits_naming_input() {
        let err = ColorToken::parse("#12").unwrap_err();
        assert!(matches!(err, TintError::InvalidColor(ref s) if s == "#12"));
    }

    #[test]
    fn parse_rejects_five_digits() {
        assert!(ColorToken::parse("#12345").is_err());
    }

    #[test]
    fn parse_rejects_seven_digits() {
        assert!(ColorToken::parse("#1234567").is_err());
    }

    #[test]
    fn parse_rejects_missing_hash() {
        assert!(ColorToken::parse("ff0000").is_err());
    }

    #[test]
    fn parse_rejects_non_hex_digits() {
        assert!(ColorToken::parse("#gggggg").is_err());
    }

    #[test]
    fn parse_rejects_empty_and_bare_hash() {
        assert!(ColorToken::parse("").is_err());
        assert!(ColorToken::parse("#").is_err());
    }

    #[test]
    fn parse_rejects_named_colors() {
        assert!(ColorToken::parse("red").is_err());
    }

    // -- serialization --

    #[test]
    fn to_css_lowercases_and_omits_implicit_alpha() {
        let token = ColorToken::parse("#FFAA00").unwrap();
        assert_eq!(token.to_css(), "#ffaa00");
    }

    #[test]
    fn to_css_keeps_explicit_alpha() {
        let token = ColorToken::parse("#FFAA0080").unwrap();
        assert_eq!(token.to_css(), "#ffaa0080");
    }

    #[test]
    fn to_css_none() {
        assert_eq!(ColorToken::None.to_css(), "none");
    }

    #[test]
    fn format_overrides_alpha_width() {
        let token = ColorToken::parse("#ff0000").unwrap();
        assert_eq!(token.format(true), "#ff0000ff");
        let token = ColorToken::parse("#ff000080").unwrap();
        assert_eq!(token.format(false), "#ff0000");
    }

    #[test]
    fn short_form_round_trips_to_long_form() {
        let token = ColorToken::parse("#abc").unwrap();
        assert_eq!(token.to_css(), "#aabbcc");
    }

    #[test]
    fn is_none_keyword_trims_and_ignores_case() {
        assert!(is_none_keyword(" none "));
        assert!(is_none_keyword("NONE"));
        assert!(!is_none_keyword("nones"));
        assert!(!is_none_keyword("#000"));
    }

    // -- serde --

    #[test]
    fn token_serializes_as_css_string() {
        let token = ColorToken::parse("#ff0000").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"#ff0000\"");
        assert_eq!(serde_json::to_string(&ColorToken::None).unwrap(), "\"none\"");
    }

    #[test]
    fn token_deserializes_from_css_string() {
        let token: ColorToken = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(token.rgba().unwrap(), opaque(0, 255, 0));
        let none: ColorToken = serde_json::from_str("\"none\"").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn token_deserialize_rejects_invalid_input() {
        let result: Result<ColorToken, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    // -- RGB -> HSL --

    #[test]
    fn rgb_to_hsl_pure_red() {
        let hsla = rgb_to_hsl(opaque(255, 0, 0));
        assert!(approx_eq(hsla.h, 0.0));
        assert!(approx_eq(hsla.s, 1.0));
        assert!(approx_eq(hsla.l, 0.5));
        assert!(approx_eq(hsla.a, 1.0));
    }

    #[test]
    fn rgb_to_hsl_pure_green_has_hue_120() {
        let hsla = rgb_to_hsl(opaque(0, 255, 0));
        assert!(approx_eq(hsla.h, 120.0));
    }

    #[test]
    fn rgb_to_hsl_pure_blue_has_hue_240() {
        let hsla = rgb_to_hsl(opaque(0, 0, 255));
        assert!(approx_eq(hsla.h, 240.0));
    }

    #[test]
    fn rgb_to_hsl_magenta_wraps_negative_hue_to_300() {
        // max channel is red with blue > green, so the raw hue is negative
        // before the +360 wrap.
        let hsla = rgb_to_hsl(opaque(255, 0, 255));
        assert!(approx_eq(hsla.h, 300.0));
    }

    #[test]
    fn rgb_to_hsl_white_is_achromatic() {
        let hsla = rgb_to_hsl(opaque(255, 255, 255));
        assert!(approx_eq(hsla.h, 0.0));
        assert!(approx_eq(hsla.s, 0.0));
        assert!(approx_eq(hsla.l, 1.0));
    }

    #[test]
    fn rgb_to_hsl_black_is_achromatic() {
        let hsla = rgb_to_hsl(opaque(0, 0, 0));
        assert!(approx_eq(hsla.s, 0.0));
        assert!(approx_eq(hsla.l, 0.0));
    }

    #[test]
    fn rgb_to_hsl_passes_alpha_through() {
        let hsla = rgb_to_hsl(Rgba {
            r: 10,
            g: 20,
            b: 30,
            a: 51,
        });
        assert!(approx_eq(hsla.a, 0.2));
    }

    // -- HSL -> RGB --

    #[test]
    fn hsl_to_rgb_achromatic_fast_path() {
        let rgba = hsl_to_rgb(Hsla {
            h: 123.0,
            s: 0.0,
            l: 0.5,
            a: 1.0,
        });
        assert_eq!(rgba, opaque(128, 128, 128));
    }

    #[test]
    fn hsl_to_rgb_pure_red() {
        let rgba = hsl_to_rgb(Hsla {
            h: 0.0,
            s: 1.0,
            l: 0.5,
            a: 1.0,
        });
        assert_eq!(rgba, opaque(255, 0, 0));
    }

    #[test]
    fn hsl_to_rgb_pure_green() {
        let rgba = hsl_to_rgb(Hsla {
            h: 120.0,
            s: 1.0,
            l: 0.5,
            a: 1.0,
        });
        assert_eq!(rgba, opaque(0, 255, 0));
    }

    #[test]
    fn hsl_to_rgb_pure_blue() {
        let rgba = hsl_to_rgb(Hsla {
            h: 240.0,
            s: 1.0,
            l: 0.5,
            a: 1.0,
        });
        assert_eq!(rgba, opaque(0, 0, 255));
    }

    #[test]
    fn hsl_to_rgb_quantizes_alpha() {
        let rgba = hsl_to_rgb(Hsla {
            h: 0.0,
            s: 0.0,
            l: 0.0,
            a: 0.5,
        });
        assert_eq!(rgba.a, 128);
    }

    #[test]
    fn hsl_to_rgb_clamps_out_of_range_lightness() {
        let rgba = hsl_to_rgb(Hsla {
            h: 0.0,
            s: 0.0,
            l: 1.5,
            a: 1.0,
        });
        assert_eq!(rgba, opaque(255, 255, 255));
    }

    #[test]
    fn rgb_hsl_round_trip_known_colors() {
        let colors = [
            opaque(255, 0, 0),
            opaque(0, 255, 0),
            opaque(0, 0, 255),
            opaque(255, 255, 255),
            opaque(0, 0, 0),
            opaque(128, 64, 32),
            opaque(17, 34, 51),
        ];
        for color in colors {
            let round_tripped = hsl_to_rgb(rgb_to_hsl(color));
            assert_eq!(round_tripped, color, "round trip failed for {color:?}");
        }
    }

    // -- property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_never_panics(input in ".*") {
                let _ = ColorToken::parse(&input);
            }

            #[test]
            fn hex_parse_format_round_trips_up_to_case(
                r in 0u8..=255,
                g in 0u8..=255,
                b in 0u8..=255,
                a in 0u8..=255,
                with_alpha in proptest::bool::ANY,
            ) {
                let text = if with_alpha {
                    format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
                } else {
                    format!("#{r:02X}{g:02X}{b:02X}")
                };
                let token = ColorToken::parse(&text).unwrap();
                prop_assert_eq!(token.to_css(), text.to_lowercase());
            }

            #[test]
            fn rgb_hsl_round_trip_within_one_step(
                r in 0u8..=255,
                g in 0u8..=255,
                b in 0u8..=255,
                a in 0u8..=255,
            ) {
                let color = Rgba { r, g, b, a };
                let rt = hsl_to_rgb(rgb_to_hsl(color));
                prop_assert!(rt.r.abs_diff(color.r) <= 1, "r: {} vs {}", rt.r, color.r);
                prop_assert!(rt.g.abs_diff(color.g) <= 1, "g: {} vs {}", rt.g, color.g);
                prop_assert!(rt.b.abs_diff(color.b) <= 1, "b: {} vs {}", rt.b, color.b);
                prop_assert_eq!(rt.a, color.a);
            }

            #[test]
            fn rgb_to_hsl_stays_in_range(
                r in 0u8..=255,
                g in 0u8..=255,
                b in 0u8..=255,
            ) {
                let hsla = rgb_to_hsl(Rgba { r, g, b, a: 255 });
                prop_assert!((0.0..360.0).contains(&hsla.h), "h out of range: {}", hsla.h);
                // saturation may exceed 1.0 by a rounding ulp near the extremes
                prop_assert!(hsla.s >= 0.0 && hsla.s <= 1.0 + 1e-9, "s out of range: {}", hsla.s);
                prop_assert!((0.0..=1.0).contains(&hsla.l), "l out of range: {}", hsla.l);
            }
        }
    }
}
